use std::process::ExitCode;

use clap::Parser;
use ferrum_config::cli::{self, parsers::CliParser};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

fn main() -> ExitCode {
    // library logs go through `log`; the subscriber picks them up via its log bridge
    fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run(CliParser::parse())
}
