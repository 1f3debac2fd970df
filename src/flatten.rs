//! Depth-limited traversal that flattens a tree of shadow trees.
//!
//! Ordinary local queries stop at every shadow boundary, so reaching nodes
//! inside nested shadow roots means re-issuing a query inside each open
//! root that is discovered. [`flatten`] does that with a FIFO worklist of
//! anchors, each tagged with the nesting level it lives at.
//!
//! The output lists, in first-discovery order and without duplicates:
//!
//! - the (normalized) container, always first;
//! - every open shadow root discovered, the container's own included,
//!   followed by every node of that root's local tree;
//! - every node without an open boundary that a local query reaches.
//!
//! A host of an open shadow root is listed when it sits inside a shadow
//! root's local tree; a host in the container's light tree comes back when
//! the selector layer re-queries its parent. Entering the container's own
//! shadow root counts as the first boundary crossing. Closed boundaries are
//! opaque: the host is listed as a plain node and nothing below it is ever
//! visited.

use crate::host::{Shadow, ShadowTree};
use crate::options::QueryOptions;
use indexmap::IndexSet;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// Selector that enumerates every node of a local tree.
pub const UNIVERSAL: &str = "*";

/// Level assigned to the container's own tree.
const CONTAINER_LEVEL: u32 = 1;

/// Flatten `container` and every open shadow tree reachable from it.
///
/// A whole-document root is first replaced by its document element so the
/// top-level element is not walked twice. The traversal never fails on its
/// own; errors come only from the host's local queries.
pub fn flatten<T>(
    tree: &T,
    container: T::Node,
    options: &QueryOptions,
) -> Result<Vec<T::Node>, T::Error>
where
    T: ShadowTree + ?Sized,
{
    let container = normalize(tree, container);
    let mut walk = Walk::new(container);

    // A host and its own shadow root are discovered together.
    if let Some(root) = tree.shadow(container).open_root() {
        walk.cross(tree, root, CONTAINER_LEVEL, options)?;
    }

    while let Some((anchor, level)) = walk.queue.pop_front() {
        for node in tree.query_local(anchor, UNIVERSAL)? {
            match tree.shadow(node) {
                Shadow::None => {
                    walk.found.insert(node);
                }
                Shadow::Closed => {
                    trace!(?node, "closed shadow root left unexpanded");
                    walk.found.insert(node);
                }
                Shadow::Open(root) => walk.cross(tree, root, level, options)?,
            }
        }
    }

    debug!(
        ?container,
        depth = %options.depth,
        nodes = walk.found.len(),
        "flattened shadow trees"
    );
    Ok(walk.found.into_iter().collect())
}

/// Replace a whole-document root with its document element.
pub fn normalize<T>(tree: &T, container: T::Node) -> T::Node
where
    T: ShadowTree + ?Sized,
{
    tree.document_element(container).unwrap_or(container)
}

/// Accumulator and worklist owned by a single [`flatten`] call.
struct Walk<N> {
    found: IndexSet<N>,
    queue: VecDeque<(N, u32)>,
}

impl<N: Copy + Eq + Hash + Debug> Walk<N> {
    fn new(container: N) -> Self {
        let mut found = IndexSet::new();
        found.insert(container);
        let mut queue = VecDeque::new();
        queue.push_back((container, CONTAINER_LEVEL));
        Self { found, queue }
    }

    /// Record an open shadow root found while walking `level`.
    ///
    /// The root and the nodes of its own tree are always listed. The root
    /// is queued for expansion only while the depth budget allows it.
    fn cross<T>(
        &mut self,
        tree: &T,
        root: N,
        level: u32,
        options: &QueryOptions,
    ) -> Result<(), T::Error>
    where
        T: ShadowTree<Node = N> + ?Sized,
    {
        self.found.insert(root);
        self.found.extend(tree.query_local(root, UNIVERSAL)?);

        if options.depth.allows_expansion(level) {
            trace!(?root, level = level + 1, "entering shadow root");
            self.queue.push_back((root, level + 1));
        } else {
            trace!(?root, level, "depth exhausted, listing shadow root one level deep");
        }
        Ok(())
    }
}
