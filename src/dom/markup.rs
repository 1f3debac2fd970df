//! Markup loading for [`Document`].
//!
//! Input is well-formed XML in HTML clothing: every element is closed
//! (`<br/>`, not `<br>`), text and comments are ignored, and a
//! `<template shadowrootmode="open|closed">` becomes the shadow root of its
//! parent element instead of an ordinary child.
//!
//! ```text
//! <my-element>
//!   <template shadowrootmode="open">
//!     <slot name="blah"/>
//!     <div/>
//!   </template>
//!   <div/>
//! </my-element>
//! ```

use crate::dom::document::{Document, NodeId, ShadowMode};
use crate::dom::errors::DomError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

const SHADOW_MODE_ATTR: &str = "shadowrootmode";

/// Parse markup into a fresh document.
pub fn parse(markup: &str) -> Result<Document, DomError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut doc = Document::new();
    let mut stack = vec![doc.root()];

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let node = open(&mut doc, &stack, &start)?;
                stack.push(node);
            }
            Event::Empty(start) => {
                open(&mut doc, &stack, &start)?;
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(&unclosed) = stack.get(1) {
        return Err(DomError::UnbalancedMarkup {
            open: doc.describe(unclosed),
        });
    }
    if doc.is_empty() {
        return Err(DomError::EmptyDocument);
    }

    debug!(nodes = doc.node_count(), "parsed markup");
    Ok(doc)
}

/// Create the node for a start tag beneath the current top of `stack`.
///
/// Returns the node that subsequent children belong to: the new element,
/// or the new shadow root for a declarative shadow template.
fn open(doc: &mut Document, stack: &[NodeId], start: &BytesStart<'_>) -> Result<NodeId, DomError> {
    let parent = *stack.last().unwrap_or(&doc.root());
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    if tag.eq_ignore_ascii_case("template") {
        if let Some((_, mode)) = attributes.iter().find(|(k, _)| k == SHADOW_MODE_ATTR) {
            let mode: ShadowMode = mode.parse()?;
            if !doc.is_element(parent) {
                return Err(DomError::ShadowWithoutHost);
            }
            return doc.attach_shadow(parent, mode);
        }
    }

    let element = doc.create_element(&tag);
    for (key, value) in &attributes {
        doc.set_attribute(element, key, value)?;
    }
    doc.append_child(parent, element)?;
    Ok(element)
}
