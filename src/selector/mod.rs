//! CSS selector subset used by the in-memory document.
//!
//! Selectors are parsed once into a [`SelectorList`] and matched right to
//! left against anything implementing [`Subject`]. Combinators only walk
//! within one local tree: a subject's parent stops at its tree root, so a
//! selector can never match across a shadow boundary.
//!
//! # Supported syntax
//!
//! ```text
//! *  div  #main  .card  [hidden]  [name="blah"]  [lang|=en]
//! [href^=https]  [src$='.png']  [title*=draft]  [rel~=nofollow]
//! a b   a > b   a + b   a ~ b   a, b
//! ```

pub mod ast;
pub mod errors;
pub mod matcher;
pub mod parser;

pub use ast::{AttrOp, AttributeSelector, Combinator, ComplexSelector, Compound, SelectorList};
pub use errors::SelectorError;
pub use matcher::Subject;
pub use parser::parse;
