//! In-memory document with shadow roots.
//!
//! [`Document`] is an arena of nodes addressed by [`NodeId`]. Elements may
//! host one shadow root each, attached with [`Document::attach_shadow`] or
//! declared in markup with `<template shadowrootmode="open">`. Shadow roots
//! are not children of their host: ordinary traversal, and therefore every
//! local selector query, stops at them.

pub mod document;
pub mod errors;
pub mod markup;

pub use document::{Document, ElementRef, NodeId, NodeKind, ShadowMode};
pub use errors::DomError;
