//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! `check` accepts the output flags of `generate` hidden, so one can be
//! swapped for the other in build scripts.

use clap::Command;

use super::args::*;

/// Add the generation settings every command shares.
fn with_config_args(cmd: Command) -> Command {
    cmd.arg(glue_namespace_arg())
        .arg(globals_arg())
        .arg(no_include_guards_arg())
}

/// Add hidden output args (for commands that don't write).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(output_dir_arg().hide(true))
        .arg(dry_run_arg().hide(true))
        .arg(json_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("gluegen")
        .about("Scripting glue generator for interface definitions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg().global(true))
        .subcommand(generate_command())
        .subcommand(docs_command())
        .subcommand(check_command())
}

/// Generate glue for a set of definition files.
pub fn generate_command() -> Command {
    let cmd = Command::new("generate")
        .about("Generate C++ glue for definition files")
        .override_usage(
            "\
  gluegen generate <FILES>... [-o <DIR>]
  gluegen generate <FILES>... --dry-run",
        )
        .after_help(
            r#"EXAMPLES:
  gluegen generate media.json player.json       # write glue next to the cwd
  gluegen generate defs/*.json -o out           # write into out/
  gluegen generate defs/*.json --dry-run        # list files that would change
  gluegen generate defs/*.json --json           # machine-readable summary"#,
        )
        .arg(files_arg())
        .arg(output_dir_arg())
        .arg(dry_run_arg())
        .arg(json_arg())
        .arg(color_arg());

    with_config_args(cmd)
}

/// Generate documentation stubs.
pub fn docs_command() -> Command {
    Command::new("docs")
        .about("Generate documentation stubs for undocumented definitions")
        .override_usage("  gluegen docs <FILES>... [-o <DIR>] [--suffix <SUFFIX>]")
        .after_help(
            r#"EXAMPLES:
  gluegen docs media.json                       # media_docs.idl if anything is missing
  gluegen docs media.json --suffix .docs.idl    # custom stub file suffix"#,
        )
        .arg(files_arg())
        .arg(output_dir_arg())
        .arg(dry_run_arg())
        .arg(docs_suffix_arg())
        .arg(color_arg())
}

/// Run generation without writing anything.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate definition files and report diagnostics")
        .override_usage("  gluegen check <FILES>... [--strict]")
        .after_help(
            r#"EXAMPLES:
  gluegen check defs/*.json                     # fail on hard errors only
  gluegen check defs/*.json --strict            # fail on warnings too"#,
        )
        .arg(files_arg())
        .arg(strict_arg())
        .arg(color_arg());

    with_hidden_output_args(with_config_args(cmd))
}
