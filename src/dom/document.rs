use crate::cache;
use crate::dom::errors::DomError;
use crate::host::{Shadow, ShadowTree};
use crate::selector::{SelectorError, Subject};
use std::fmt;
use std::str::FromStr;

/// Handle to a node in a [`Document`]. Equal ids are the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowMode {
    Open,
    Closed,
}

impl fmt::Display for ShadowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowMode::Open => write!(f, "open"),
            ShadowMode::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for ShadowMode {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(ShadowMode::Open),
            "closed" => Ok(ShadowMode::Closed),
            _ => Err(DomError::InvalidShadowMode {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    ShadowRoot {
        mode: ShadowMode,
        host: NodeId,
    },
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    shadow_root: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            shadow_root: None,
        }
    }
}

/// Arena-backed document tree.
///
/// Node 0 is always the document root. Elements are created detached and
/// placed with [`Document::append_child`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Document)],
        }
    }

    /// Parse XHTML-like markup. See [`crate::dom::markup`].
    pub fn parse(markup: &str) -> Result<Self, DomError> {
        crate::dom::markup::parse(markup)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_element(self.root()).is_none()
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0)
    }

    fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes
            .get_mut(node.0)
            .ok_or(DomError::UnknownNode { node })
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        id
    }

    /// Create a detached element. Tag names are stored lowercase.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// `child` must be a detached element. A document accepts a single
    /// element child.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_kind = &self
            .data(parent)
            .ok_or(DomError::UnknownNode { node: parent })?
            .kind;
        if matches!(parent_kind, NodeKind::Document) && self.document_element(parent).is_some() {
            return Err(DomError::MultipleRoots);
        }

        let child_data = self
            .data(child)
            .ok_or(DomError::UnknownNode { node: child })?;
        if !matches!(child_data.kind, NodeKind::Element { .. }) {
            return Err(DomError::NotAnElement { node: child });
        }
        if child_data.parent.is_some() {
            return Err(DomError::AlreadyAttached { child });
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Cycle { child });
        }

        self.data_mut(child)?.parent = Some(parent);
        self.data_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Create an element and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DomError> {
        let child = self.create_element(tag);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        match &mut self.data_mut(node)?.kind {
            NodeKind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|(n, _)| n == name) {
                    Some((_, v)) => *v = value.to_string(),
                    None => attributes.push((name.to_string(), value.to_string())),
                }
                Ok(())
            }
            _ => Err(DomError::NotAnElement { node }),
        }
    }

    /// Attach a shadow root to `host` and return it.
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowMode) -> Result<NodeId, DomError> {
        let data = self.data(host).ok_or(DomError::UnknownNode { node: host })?;
        if !matches!(data.kind, NodeKind::Element { .. }) {
            return Err(DomError::NotAnElement { node: host });
        }
        if data.shadow_root.is_some() {
            return Err(DomError::ShadowAlreadyAttached { host });
        }

        let root = self.push(NodeKind::ShadowRoot { mode, host });
        self.data_mut(host)?.shadow_root = Some(root);
        Ok(root)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.data(node).map(|d| &d.kind)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::Element { .. }))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.data(node)
            .map(|d| d.children.as_slice())
            .unwrap_or_default()
    }

    /// The shadow root hosted by `host`, whatever its mode.
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.data(host)?.shadow_root
    }

    pub fn shadow_mode(&self, root: NodeId) -> Option<ShadowMode> {
        match self.kind(root)? {
            NodeKind::ShadowRoot { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    pub fn host_of(&self, root: NodeId) -> Option<NodeId> {
        match self.kind(root)? {
            NodeKind::ShadowRoot { host, .. } => Some(*host),
            _ => None,
        }
    }

    /// Root of the local tree containing `node`: a shadow root, the
    /// document, or the top of a detached subtree.
    pub fn tree_root(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Descendants of `node` in tree order, not entering shadow roots.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// First element anywhere in the arena, shadow trees included, whose
    /// `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .find(|&n| self.attribute(n, "id") == Some(id))
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n).or_else(|| self.host_of(n));
        }
        false
    }

    pub fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.is_element(node).then_some(ElementRef { doc: self, node })
    }

    /// Human-readable location of `node`, crossing shadow boundaries.
    ///
    /// ```text
    /// html > body > my-el > #shadow-root(open) > slot[name="blah"]
    /// ```
    pub fn describe(&self, node: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            match self.kind(n) {
                Some(NodeKind::Document) => {
                    if n == node {
                        segments.push("#document".to_string());
                    }
                    current = None;
                }
                Some(NodeKind::ShadowRoot { mode, host }) => {
                    segments.push(format!("#shadow-root({mode})"));
                    current = Some(*host);
                }
                Some(NodeKind::Element { .. }) => {
                    segments.push(self.label(n));
                    current = self.parent(n);
                }
                None => {
                    segments.push(format!("<unknown {n}>"));
                    current = None;
                }
            }
        }
        segments.reverse();
        segments.join(" > ")
    }

    /// `tag#id.class[name="..."]` for one element.
    fn label(&self, node: NodeId) -> String {
        let mut label = self.tag_name(node).unwrap_or_default().to_string();
        if let Some(id) = self.attribute(node, "id") {
            label.push('#');
            label.push_str(id);
        }
        if let Some(classes) = self.attribute(node, "class") {
            for class in classes.split_ascii_whitespace() {
                label.push('.');
                label.push_str(class);
            }
        }
        if let Some(name) = self.attribute(node, "name") {
            label.push_str(&format!("[name=\"{name}\"]"));
        }
        label
    }
}

impl ShadowTree for Document {
    type Node = NodeId;
    type Error = SelectorError;

    fn query_local(&self, anchor: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let compiled = cache::get_or_compile_selector(selector)?;
        Ok(self
            .descendants(anchor)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|el| compiled.matches(el)))
            .collect())
    }

    fn matches(&self, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let compiled = cache::get_or_compile_selector(selector)?;
        Ok(self.element(node).is_some_and(|el| compiled.matches(el)))
    }

    fn shadow(&self, node: NodeId) -> Shadow<NodeId> {
        match self.shadow_root(node) {
            None => Shadow::None,
            Some(root) => match self.shadow_mode(root) {
                Some(ShadowMode::Open) => Shadow::Open(root),
                _ => Shadow::Closed,
            },
        }
    }

    fn document_element(&self, node: NodeId) -> Option<NodeId> {
        match self.kind(node)? {
            NodeKind::Document => self.children(node).first().copied(),
            _ => None,
        }
    }
}

/// Borrowed view of one element, used for selector matching.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    node: NodeId,
}

impl<'a> Subject for ElementRef<'a> {
    fn local_name(&self) -> Option<&str> {
        self.doc.tag_name(self.node)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.doc.attribute(self.node, name)
    }

    fn parent(&self) -> Option<Self> {
        self.doc.parent(self.node).and_then(|p| self.doc.element(p))
    }

    fn previous_sibling(&self) -> Option<Self> {
        let parent = self.doc.parent(self.node)?;
        let siblings = self.doc.children(parent);
        let index = siblings.iter().position(|&s| s == self.node)?;
        siblings[..index]
            .iter()
            .rev()
            .find_map(|&s| self.doc.element(s))
    }
}
