use std::path::PathBuf;

use gluegen_compiler::{DiagnosticsPrinter, GlueConfig};

use super::output::{Summary, write_all};
use super::{CliError, fail, input};

pub struct DocsArgs {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub config: GlueConfig,
    pub color: bool,
}

pub fn run(args: DocsArgs) {
    match execute(&args) {
        Ok(summary) => print!("{}", summary.render()),
        Err(err) => fail(err),
    }
}

/// Write documentation stubs for definitions that lack a docs block.
pub fn execute(args: &DocsArgs) -> Result<Summary, CliError> {
    let files = input::load_files(&args.files)?;
    let docs = gluegen_compiler::generate_docs(&files, &args.config);

    if !docs.diagnostics.is_empty() {
        eprint!(
            "{}",
            DiagnosticsPrinter::new(&docs.diagnostics)
                .colored(args.color)
                .render()
        );
    }

    let written = write_all(&args.output_dir, &docs.files, args.dry_run)?;
    Ok(Summary {
        files: written,
        warnings: docs.diagnostics.warning_count(),
        dry_run: args.dry_run,
    })
}
