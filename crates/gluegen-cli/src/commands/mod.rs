pub mod check;
pub mod docs;
pub mod generate;
pub mod input;
pub mod output;

#[cfg(test)]
mod input_tests;

use std::path::PathBuf;

/// Failures that end a command with exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("`{path}`: {source}")]
    Parse {
        path: PathBuf,
        source: gluegen_core::LoadError,
    },

    #[error("cannot write `{path}`: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Generate(#[from] gluegen_compiler::Error),

    #[error("{0} warning(s) reported in strict mode")]
    Strict(usize),
}

/// Print `err` and exit with status 1.
pub fn fail(err: CliError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
