//! Loading of already-parsed definition trees.
//!
//! Input is JSON: either a single source file object, or a file set
//! (`{"files": [...]}` or a bare array). File order in a set is the order
//! the generator processes files in, and it is significant.

use serde_json::Value;

use crate::SourceFile;

/// Errors from reading definition-tree input.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid definition file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source file at index {0} has an empty path")]
    EmptyPath(usize),

    #[error("source file `{0}` appears more than once")]
    DuplicatePath(String),
}

#[derive(serde::Deserialize)]
struct WrappedFileSet {
    files: Vec<SourceFile>,
}

/// Parse one source file object.
pub fn parse_source_file(json: &str) -> Result<SourceFile, LoadError> {
    let file: SourceFile = serde_json::from_str(json)?;
    if file.path.trim().is_empty() {
        return Err(LoadError::EmptyPath(0));
    }
    Ok(file)
}

/// Parse an ordered set of source files.
pub fn parse_file_set(json: &str) -> Result<Vec<SourceFile>, LoadError> {
    // Dispatch on shape first so serde errors point at the real problem
    // instead of "did not match any variant".
    let value: Value = serde_json::from_str(json)?;
    let wrapped = matches!(
        &value,
        Value::Object(map) if map.contains_key("files") && !map.contains_key("path")
    );
    let files = if value.is_array() {
        serde_json::from_value::<Vec<SourceFile>>(value)?
    } else if wrapped {
        serde_json::from_value::<WrappedFileSet>(value)?.files
    } else {
        vec![serde_json::from_value::<SourceFile>(value)?]
    };
    validate_file_set(&files)?;
    Ok(files)
}

/// Check that every file has a distinct, non-empty path.
pub fn validate_file_set(files: &[SourceFile]) -> Result<(), LoadError> {
    let mut seen = std::collections::HashSet::new();
    for (idx, file) in files.iter().enumerate() {
        if file.path.trim().is_empty() {
            return Err(LoadError::EmptyPath(idx));
        }
        if !seen.insert(file.path.as_str()) {
            return Err(LoadError::DuplicatePath(file.path.clone()));
        }
    }
    Ok(())
}
