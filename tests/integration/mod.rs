//! Integration tests for lookup, options files and the CLI.

mod cli;
mod lookup;
mod options_files;

use shadow_query::dom::Document;

pub fn components() -> Document {
    Document::parse(include_str!("../fixtures/components.xhtml"))
        .unwrap_or_else(|err| panic!("failed to parse components fixture: {err}"))
}

pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}
