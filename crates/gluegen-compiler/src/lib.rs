//! gluegen compiler: turns definition trees into C++ scripting glue.
//!
//! Pipeline pieces, leaves first:
//! - `section` - hierarchical code buffer with lazy scope brackets and slots
//! - `registry` - ordered (tag, name) identifier tables
//! - `types` - type table resolving names used by members
//! - `binding` - per-type marshaling ("binding models")
//! - `context` - per-container generation state, owning or shared
//! - `emit` - per-member dispatch recipes and container glue
//! - `generator` - two-pass orchestrator aggregating namespaces across files
//! - `output` - include resolution and final text
//! - `docs` - documentation stub generation
//! - `diagnostics` - recoverable findings

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod binding;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod docs;
pub mod emit;
pub mod generator;
mod invariants;
pub mod output;
pub mod registry;
pub mod section;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::GlueConfig;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use docs::{DocsOutput, generate_docs};
pub use generator::{Generated, generate};
pub use output::{OutputBuffer, RenderedFile};
pub use section::Section;

/// Structural input errors. Any of these aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A callable with no return type that is neither a constructor nor a destructor.
    #[error("function `{member}` in `{container}` has no return type")]
    MissingReturnType { member: String, container: String },

    #[error("type `{name}` used by `{member}` is not defined")]
    UnresolvedType { name: String, member: String },

    #[error("unknown binding model `{name}` on `{member}`")]
    UnknownBindingModel { name: String, member: String },

    #[error(transparent)]
    Load(#[from] gluegen_core::LoadError),
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, Error>;
