use std::path::PathBuf;

use gluegen_compiler::{DiagnosticsPrinter, GlueConfig};

use super::output::{Summary, write_all};
use super::{CliError, fail, input};

pub struct GenerateArgs {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub json: bool,
    pub config: GlueConfig,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    match execute(&args) {
        Ok(summary) if args.json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        Ok(summary) => print!("{}", summary.render()),
        Err(err) => fail(err),
    }
}

/// Generate glue for every input and write the changed outputs.
///
/// Warnings are printed to stderr and never fail the run.
pub fn execute(args: &GenerateArgs) -> Result<Summary, CliError> {
    let files = input::load_files(&args.files)?;
    let generated = gluegen_compiler::generate(&files, &args.config)?;

    if !generated.diagnostics.is_empty() {
        eprint!(
            "{}",
            DiagnosticsPrinter::new(&generated.diagnostics)
                .colored(args.color)
                .render()
        );
    }
    let warnings = generated.diagnostics.warning_count();
    tracing::info!(
        namespaces = generated.finalized.len(),
        buffers = generated.buffers.len(),
        "glue generated"
    );

    let rendered = generated.render();
    let written = write_all(&args.output_dir, &rendered, args.dry_run)?;
    Ok(Summary {
        files: written,
        warnings,
        dry_run: args.dry_run,
    })
}
