use crate::dom::document::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("node {node} does not belong to this document")]
    UnknownNode { node: NodeId },

    #[error("node {node} is not an element")]
    NotAnElement { node: NodeId },

    #[error("element {host} already has a shadow root")]
    ShadowAlreadyAttached { host: NodeId },

    #[error("node {child} already has a parent")]
    AlreadyAttached { child: NodeId },

    #[error("appending {child} would make it its own ancestor")]
    Cycle { child: NodeId },

    #[error("a document has at most one top-level element")]
    MultipleRoots,

    #[error("markup contains no elements")]
    EmptyDocument,

    #[error("invalid shadowrootmode '{value}', expected \"open\" or \"closed\"")]
    InvalidShadowMode { value: String },

    #[error("declarative shadow root has no host element")]
    ShadowWithoutHost,

    #[error("unbalanced markup: <{open}> is never closed")]
    UnbalancedMarkup { open: String },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
}
