//! Reading definition files from disk.

use std::fs;
use std::path::{Path, PathBuf};

use gluegen_core::{SourceFile, load};

use super::CliError;

/// Load every path in order. A path may hold one source file or a whole set;
/// the result is the concatenation, validated as one set.
pub fn load_files(paths: &[PathBuf]) -> Result<Vec<SourceFile>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        files.extend(load_file(path)?);
    }
    load::validate_file_set(&files).map_err(|source| CliError::Parse {
        path: paths.first().cloned().unwrap_or_default(),
        source,
    })?;
    tracing::debug!(inputs = paths.len(), files = files.len(), "definitions loaded");
    Ok(files)
}

fn load_file(path: &Path) -> Result<Vec<SourceFile>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load::parse_file_set(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
