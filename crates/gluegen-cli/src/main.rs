mod cli;
mod commands;

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{CheckParams, DocsParams, GenerateParams, build_cli, parse_verbosity};

/// Install the stderr logger. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);
    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(filter).with(fmt).try_init();
}

fn main() {
    let matches = build_cli().get_matches();
    let (name, m) = match matches.subcommand() {
        Some(sub) => sub,
        None => unreachable!("clap should have caught this"),
    };
    init_tracing(parse_verbosity(&matches).max(parse_verbosity(m)));
    tracing::debug!(command = name, "starting");

    match name {
        "generate" => commands::generate::run(GenerateParams::from_matches(m).into()),
        "docs" => commands::docs::run(DocsParams::from_matches(m).into()),
        "check" => commands::check::run(CheckParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    }
}
