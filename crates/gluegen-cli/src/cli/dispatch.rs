//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields, ignoring hidden ones
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use gluegen_compiler::GlueConfig;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::docs::DocsArgs;
use crate::commands::generate::GenerateArgs;

/// Generation settings shared by `generate` and `check`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigParams {
    pub glue_namespace: Option<String>,
    pub globals: Option<String>,
    pub no_include_guards: bool,
}

impl ConfigParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            glue_namespace: m.get_one::<String>("glue_namespace").cloned(),
            globals: m.get_one::<String>("globals").cloned(),
            no_include_guards: m.get_flag("no_include_guards"),
        }
    }

    pub fn into_config(self) -> GlueConfig {
        let mut config = GlueConfig::default().include_guards(!self.no_include_guards);
        if let Some(ns) = self.glue_namespace {
            config = config.glue_namespace(ns);
        }
        if let Some(globals) = self.globals {
            config = config.globals_basename(globals);
        }
        config
    }
}

pub struct GenerateParams {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub json: bool,
    pub config: ConfigParams,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            output_dir: parse_output_dir(m),
            dry_run: m.get_flag("dry_run"),
            json: m.get_flag("json"),
            config: ConfigParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            files: p.files,
            output_dir: p.output_dir,
            dry_run: p.dry_run,
            json: p.json,
            config: p.config.into_config(),
            color: p.color.should_colorize(),
        }
    }
}

pub struct DocsParams {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub suffix: Option<String>,
    pub color: ColorChoice,
}

impl DocsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            output_dir: parse_output_dir(m),
            dry_run: m.get_flag("dry_run"),
            suffix: m.get_one::<String>("docs_suffix").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DocsParams> for DocsArgs {
    fn from(p: DocsParams) -> Self {
        let mut config = GlueConfig::default();
        if let Some(suffix) = p.suffix {
            config = config.docs_suffix(suffix);
        }
        Self {
            files: p.files,
            output_dir: p.output_dir,
            dry_run: p.dry_run,
            config,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub config: ConfigParams,
    pub color: ColorChoice,
    // output_dir, dry_run and json are accepted but not extracted
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            strict: m.get_flag("strict"),
            config: ConfigParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            files: p.files,
            strict: p.strict,
            config: p.config.into_config(),
            color: p.color.should_colorize(),
        }
    }
}

/// Number of `-v` flags, from whichever level they were given at.
pub fn parse_verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn parse_files(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default()
}

fn parse_output_dir(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("output_dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
