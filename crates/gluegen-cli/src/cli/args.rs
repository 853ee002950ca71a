//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same arg can be added visible to one command and hidden (via
//! `.hide(true)`) to another, so commands accept each other's flags.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Definition files, processed in the order given (positional).
pub fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILES")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("JSON definition files, in processing order")
}

/// Output directory (-o/--output-dir).
pub fn output_dir_arg() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .long("output-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .default_value(".")
        .help("Directory generated files are written to")
}

/// Namespace wrapping the generated code (--glue-namespace).
pub fn glue_namespace_arg() -> Arg {
    Arg::new("glue_namespace")
        .long("glue-namespace")
        .value_name("NS")
        .help("C++ namespace wrapping generated code [default: glue]")
}

/// Basename of the root static object output (--globals).
pub fn globals_arg() -> Arg {
    Arg::new("globals")
        .long("globals")
        .value_name("NAME")
        .help("Basename of the output holding the root object [default: globals]")
}

/// Skip `#ifndef` guards (--no-include-guards).
pub fn no_include_guards_arg() -> Arg {
    Arg::new("no_include_guards")
        .long("no-include-guards")
        .action(ArgAction::SetTrue)
        .help("Don't wrap glue headers in include guards")
}

/// Report what would be written without touching the disk (--dry-run).
pub fn dry_run_arg() -> Arg {
    Arg::new("dry_run")
        .long("dry-run")
        .action(ArgAction::SetTrue)
        .help("Report changed files without writing them")
}

/// Machine-readable summary (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the summary as JSON")
}

/// Documentation file suffix (--suffix).
pub fn docs_suffix_arg() -> Arg {
    Arg::new("docs_suffix")
        .long("suffix")
        .value_name("SUFFIX")
        .help("Suffix of documentation stub files [default: _docs.idl]")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Log progress (-v debug, -vv trace); RUST_LOG overrides")
}
