use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU32;

/// Maximum number of nested shadow boundaries a traversal will follow.
///
/// Levels are counted per boundary crossing, starting at 1 for the
/// container's own tree. Entering the container's own shadow root is the
/// first crossing, like entering any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawDepth")]
pub enum Depth {
    #[default]
    Unbounded,
    Levels(NonZeroU32),
}

impl Depth {
    /// A bounded depth; `None` for zero, which would forbid even the container.
    pub fn limited(levels: u32) -> Option<Self> {
        NonZeroU32::new(levels).map(Depth::Levels)
    }

    /// Whether a boundary found while walking nesting level `level` may be
    /// queued for full expansion at `level + 1`.
    ///
    /// When this is false the boundary root's own tree is still listed, one
    /// level deep, but nothing inside it is expanded.
    pub fn allows_expansion(&self, level: u32) -> bool {
        match self {
            Depth::Unbounded => true,
            Depth::Levels(max) => level < max.get(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Depth::Unbounded)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Unbounded => write!(f, "unbounded"),
            Depth::Levels(n) => write!(f, "{n}"),
        }
    }
}

impl std::str::FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("unbounded") || trimmed.eq_ignore_ascii_case("infinity") {
            return Ok(Depth::Unbounded);
        }
        let levels: u32 = trimmed.parse().map_err(|_| {
            format!("invalid depth '{trimmed}': expected a positive integer or \"unbounded\"")
        })?;
        Depth::limited(levels).ok_or_else(|| "depth must be at least 1".to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDepth {
    Levels(i64),
    Keyword(String),
}

impl TryFrom<RawDepth> for Depth {
    type Error = String;

    fn try_from(raw: RawDepth) -> Result<Self, Self::Error> {
        match raw {
            RawDepth::Levels(n) if n < 1 => Err(format!("depth must be at least 1, got {n}")),
            RawDepth::Levels(n) => u32::try_from(n)
                .ok()
                .and_then(Depth::limited)
                .ok_or_else(|| format!("depth {n} is out of range")),
            RawDepth::Keyword(word) => word.parse(),
        }
    }
}

/// Options accepted by [`crate::find_all`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryOptions {
    #[serde(default)]
    pub depth: Depth,
}

impl QueryOptions {
    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// Default options bounded to `levels`; `None` for zero, as with
    /// [`Depth::limited`].
    pub fn levels(levels: u32) -> Option<Self> {
        Depth::limited(levels).map(|depth| Self::default().with_depth(depth))
    }
}
