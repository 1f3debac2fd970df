//! Shadow Query: selector lookup across nested shadow trees.
//!
//! Ordinary selector queries stop at every shadow boundary. This crate
//! finds matches anywhere below a container, including inside any number
//! of nested open shadow roots, up to a configurable nesting depth.
//!
//! # Architecture
//!
//! - [`host::ShadowTree`] is the only view of the tree the lookup needs:
//!   local (non-crossing) selector queries, shadow-root access, and a
//!   whole-document check.
//! - [`flatten()`] walks the tree-of-trees with a worklist and returns every
//!   reachable anchor once.
//! - [`find_all`] / [`find_first`] re-run the caller's selector from each
//!   anchor and deduplicate the union.
//! - [`dom::Document`] is a ready-made in-memory host with a CSS selector
//!   subset and declarative shadow roots in markup.
//!
//! # Guarantees
//!
//! - No node appears twice in a result
//! - Closed shadow roots and everything beneath them are never reached
//! - Depth counts boundary crossings, not element nesting
//! - Read-only: a lookup never mutates the tree and caches no results
//!
//! # Example
//!
//! ```
//! use shadow_query::dom::Document;
//! use shadow_query::{find_all, find_first, Depth, QueryOptions};
//!
//! let doc = Document::parse(
//!     r#"<main>
//!          <app-shell>
//!            <template shadowrootmode="open">
//!              <nav-bar>
//!                <template shadowrootmode="open"><a id="home"/></template>
//!              </nav-bar>
//!            </template>
//!          </app-shell>
//!        </main>"#,
//! )?;
//!
//! let home = find_first(&doc, doc.root(), "#home", &QueryOptions::default())?;
//! assert_eq!(home, doc.element_by_id("home"));
//!
//! // The link sits two shadow roots down; depth 1 does not reach it.
//! let shallow = QueryOptions::default().with_depth(Depth::limited(1).unwrap());
//! assert!(find_all(&doc, doc.root(), "a", &shallow)?.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod dom;
pub mod flatten;
pub mod host;
pub mod options;
pub mod query;
pub mod selector;

// Re-exports
pub use flatten::flatten;
pub use host::{Shadow, ShadowTree};
pub use options::{load_from_path, load_from_str, ConfigError, Depth, QueryOptions};
pub use query::{find_all, find_first};
