mod api;
mod args;
mod commands;
mod config;
mod feed;
mod refresh;
mod session;
mod time;
mod ui;

use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = args::Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(cli.verbose)),
    )
    .init();

    cli.run()
}

/// stderr is shared with the feed viewer's screen, so nothing is logged
/// unless asked for.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "postboard=debug" } else { "off" }
}
