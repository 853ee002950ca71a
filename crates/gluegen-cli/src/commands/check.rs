use std::path::PathBuf;

use gluegen_compiler::{Diagnostics, DiagnosticsPrinter, GlueConfig};

use super::{CliError, fail, input};

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub config: GlueConfig,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    match execute(&args) {
        Ok(diagnostics) => {
            // Silent on success (like cargo check), except for warnings
            if !diagnostics.is_empty() {
                eprint!(
                    "{}",
                    DiagnosticsPrinter::new(&diagnostics)
                        .colored(args.color)
                        .render()
                );
            }
        }
        Err(err) => fail(err),
    }
}

/// Run generation without writing anything.
///
/// In strict mode any warning fails the check; the diagnostics are printed
/// before the error is returned.
pub fn execute(args: &CheckArgs) -> Result<Diagnostics, CliError> {
    let files = input::load_files(&args.files)?;
    let generated = gluegen_compiler::generate(&files, &args.config)?;
    let diagnostics = generated.diagnostics;

    if args.strict && diagnostics.has_warnings() {
        eprint!(
            "{}",
            DiagnosticsPrinter::new(&diagnostics)
                .colored(args.color)
                .render()
        );
        return Err(CliError::Strict(diagnostics.warning_count()));
    }
    Ok(diagnostics)
}
