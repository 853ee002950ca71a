//! Writing rendered files, only where the content changed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gluegen_compiler::RenderedFile;

use super::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub status: WriteStatus,
}

/// Outcome of one command, printed at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub files: Vec<WrittenFile>,
    pub warnings: usize,
    pub dry_run: bool,
}

impl Summary {
    pub fn changed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status != WriteStatus::Unchanged)
            .count()
    }

    pub fn render(&self) -> String {
        let verb = if self.dry_run { "would change" } else { "changed" };
        let mut out = String::new();
        for file in self.files.iter().filter(|f| f.status != WriteStatus::Unchanged) {
            let status = match file.status {
                WriteStatus::Created => "create",
                WriteStatus::Updated => "update",
                WriteStatus::Unchanged => continue,
            };
            out.push_str(&format!("  {status} {}\n", file.path.display()));
        }
        out.push_str(&format!(
            "{} of {} file(s) {verb}, {} warning(s)\n",
            self.changed(),
            self.files.len(),
            self.warnings
        ));
        out
    }
}

/// Write `file` under `dir` unless it already holds the same text.
///
/// A missing file is created; an unreadable one is an error.
pub fn write_if_changed(dir: &Path, file: &RenderedFile, dry_run: bool) -> Result<WrittenFile, CliError> {
    let path = dir.join(&file.path);
    let status = match fs::read(&path) {
        Ok(existing) if existing == file.text.as_bytes() => WriteStatus::Unchanged,
        Ok(_) => WriteStatus::Updated,
        Err(e) if e.kind() == ErrorKind::NotFound => WriteStatus::Created,
        Err(source) => return Err(CliError::Read { path, source }),
    };

    if status != WriteStatus::Unchanged && !dry_run {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CliError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.text).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
    }
    tracing::debug!(path = %path.display(), ?status, dry_run, "output file");
    Ok(WrittenFile { path, status })
}

/// Write every file, in order.
pub fn write_all(dir: &Path, files: &[RenderedFile], dry_run: bool) -> Result<Vec<WrittenFile>, CliError> {
    files
        .iter()
        .map(|file| write_if_changed(dir, file, dry_run))
        .collect()
}
