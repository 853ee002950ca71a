//! Test fixtures: definition trees as JSON, generated and rendered.

use gluegen_core::{SourceFile, parse_file_set};

use crate::{GlueConfig, Generated, RenderedFile, generate};

/// Parse a file set, panicking on malformed fixtures.
pub fn files(json: &str) -> Vec<SourceFile> {
    parse_file_set(json).expect("fixture must be a valid file set")
}

/// Generate with the default configuration.
pub fn generated(json: &str) -> Generated {
    generate(&files(json), &GlueConfig::default()).expect("fixture must generate")
}

/// Generate and render with the default configuration.
pub fn rendered(json: &str) -> Vec<RenderedFile> {
    generated(json).render()
}

/// Text of the rendered file at `path`.
pub fn text<'a>(files: &'a [RenderedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.text.as_str())
        .unwrap_or_else(|| {
            let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
            panic!("no rendered file `{path}` among {paths:?}")
        })
}

/// Number of non-overlapping occurrences of `needle`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
