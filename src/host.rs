//! The capabilities a host tree must provide for cross-boundary lookup.
//!
//! The traversal in [`crate::flatten`] never inspects nodes directly. Every
//! question it asks about the tree (what lies below a node, whether a node
//! hosts an encapsulated sub-tree, whether a node is a whole-document root)
//! goes through [`ShadowTree`].

use std::fmt::Debug;
use std::hash::Hash;

/// Encapsulation state of a node, as reported by [`ShadowTree::shadow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shadow<N> {
    /// The node hosts no encapsulated sub-tree.
    None,
    /// The node hosts an accessible sub-tree rooted at the carried node.
    Open(N),
    /// The node hosts a sub-tree whose contents are unreachable.
    Closed,
}

impl<N: Copy> Shadow<N> {
    /// The traversable root, if the boundary is open.
    pub fn open_root(&self) -> Option<N> {
        match self {
            Shadow::Open(root) => Some(*root),
            Shadow::None | Shadow::Closed => None,
        }
    }
}

/// A tree-of-trees that can be queried one local tree at a time.
///
/// Node identity is the `Node` value: two handles are the same node exactly
/// when they compare equal. Arena ids and interned pointers both work.
pub trait ShadowTree {
    type Node: Copy + Eq + Hash + Debug;
    type Error: std::error::Error;

    /// Descendants of `anchor` matching `selector`, in tree order.
    ///
    /// Must not cross into any shadow root below `anchor`. Selector syntax
    /// errors are the host's to report.
    fn query_local(
        &self,
        anchor: Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, Self::Error>;

    /// Whether `node` itself matches `selector`.
    ///
    /// Shadow roots and document roots are not elements and never match.
    fn matches(&self, node: Self::Node, selector: &str) -> Result<bool, Self::Error>;

    /// Whether `node` hosts an encapsulated sub-tree, and its root if open.
    fn shadow(&self, node: Self::Node) -> Shadow<Self::Node>;

    /// The single top-level element when `node` is a whole-document root.
    fn document_element(&self, node: Self::Node) -> Option<Self::Node>;
}

impl<T: ShadowTree + ?Sized> ShadowTree for &T {
    type Node = T::Node;
    type Error = T::Error;

    fn query_local(
        &self,
        anchor: Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, Self::Error> {
        (**self).query_local(anchor, selector)
    }

    fn matches(&self, node: Self::Node, selector: &str) -> Result<bool, Self::Error> {
        (**self).matches(node, selector)
    }

    fn shadow(&self, node: Self::Node) -> Shadow<Self::Node> {
        (**self).shadow(node)
    }

    fn document_element(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).document_element(node)
    }
}
