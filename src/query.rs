//! Selector lookup across shadow boundaries.
//!
//! Lookup runs in two phases. [`flatten`] first collects every anchor
//! reachable from the container: the container, every open shadow root
//! within the depth budget, and every plain node. The caller's selector is
//! then run as a local query from each of those anchors and the union is
//! deduplicated in first-discovery order.
//!
//! Re-querying from every anchor, shadow roots included, covers nodes
//! that are only reachable as descendants of a shadow root as well as
//! queries that must be anchored at the shadow root rather than its host.

use crate::flatten::flatten;
use crate::host::ShadowTree;
use crate::options::QueryOptions;
use indexmap::IndexSet;
use tracing::debug;

/// Every node matching `selector` in `container` and the open shadow trees
/// below it, without duplicates, in first-discovery order.
///
/// The (normalized) container is included first when it matches the
/// selector itself. Shadow roots are never returned as matches. Selector
/// errors from the host are returned unchanged.
///
/// # Example
///
/// ```
/// use shadow_query::dom::Document;
/// use shadow_query::{find_all, QueryOptions};
///
/// let doc = Document::parse(
///     r#"<my-element>
///          <template shadowrootmode="open"><slot name="blah"/></template>
///        </my-element>"#,
/// )?;
/// let slots = find_all(&doc, doc.root(), "slot[name='blah']", &QueryOptions::default())?;
/// assert_eq!(slots.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn find_all<T>(
    tree: &T,
    container: T::Node,
    selector: &str,
    options: &QueryOptions,
) -> Result<Vec<T::Node>, T::Error>
where
    T: ShadowTree + ?Sized,
{
    let anchors = flatten(tree, container, options)?;
    let mut found = IndexSet::new();

    // flatten always lists the normalized container first
    if let Some(&container) = anchors.first() {
        if tree.matches(container, selector)? {
            found.insert(container);
        }
    }

    for &anchor in &anchors {
        found.extend(tree.query_local(anchor, selector)?);
    }

    debug!(
        selector,
        anchors = anchors.len(),
        matches = found.len(),
        "deep query"
    );
    Ok(found.into_iter().collect())
}

/// The first node [`find_all`] would return, or `None`.
pub fn find_first<T>(
    tree: &T,
    container: T::Node,
    selector: &str,
    options: &QueryOptions,
) -> Result<Option<T::Node>, T::Error>
where
    T: ShadowTree + ?Sized,
{
    Ok(find_all(tree, container, selector, options)?.into_iter().next())
}
