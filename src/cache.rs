//! Thread-local compilation cache for selectors.
//!
//! Lookup re-runs the same selector against every anchor of a flattened
//! tree, and `*` on every traversal step, so parsed selectors are cached
//! by their source text. Only compilation is cached, never query results.
//! Cache is capped at 256 entries; it is cleared when full.

use crate::selector::{self, SelectorError, SelectorList};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const MAX_CACHE_ENTRIES: usize = 256;

thread_local! {
    static SELECTOR_CACHE: RefCell<HashMap<String, Rc<SelectorList>>> =
        RefCell::new(HashMap::new());
}

/// Get a compiled selector from cache, or parse and cache it.
///
/// Parse failures are returned as-is and are not cached.
pub fn get_or_compile_selector(source: &str) -> Result<Rc<SelectorList>, SelectorError> {
    SELECTOR_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(compiled) = cache.get(source) {
            return Ok(Rc::clone(compiled));
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }

        let compiled = Rc::new(selector::parse(source)?);
        cache.insert(source.to_string(), Rc::clone(&compiled));
        Ok(compiled)
    })
}

/// Clear the selector cache (mainly for testing).
pub fn clear_cache() {
    SELECTOR_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

pub fn cache_size() -> usize {
    SELECTOR_CACHE.with(|cache| cache.borrow().len())
}
