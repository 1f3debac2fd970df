use crate::options::schema::{Depth, QueryOptions};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    /// `depth` given both at the top level and under `[query]`.
    Conflict { path: Option<PathBuf> },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Io { .. } => self,
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Conflict { path: None } => ConfigError::Conflict { path: Some(path) },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "failed to read query options from {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse query options TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse query options TOML: {}", source),
            },
            ConfigError::Conflict { path } => {
                let msg = "depth is set both at the top level and in [query]";
                match path {
                    Some(path) => write!(f, "invalid query options ({}): {}", path.display(), msg),
                    None => write!(f, "invalid query options: {}", msg),
                }
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Conflict { .. } => None,
        }
    }
}

/// On-disk layout: `depth` either at the top level or under `[query]`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    #[serde(default)]
    depth: Option<Depth>,
    #[serde(default)]
    query: Option<QueryOptions>,
}

pub fn load_from_str(input: &str) -> Result<QueryOptions, ConfigError> {
    let file: OptionsFile = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;

    match (file.depth, file.query) {
        (Some(_), Some(_)) => Err(ConfigError::Conflict { path: None }),
        (Some(depth), None) => Ok(QueryOptions::default().with_depth(depth)),
        (None, Some(query)) => Ok(query),
        (None, None) => Ok(QueryOptions::default()),
    }
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<QueryOptions, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.with_path(path))
}
