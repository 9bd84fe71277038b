#![warn(clippy::all, clippy::pedantic)]

use clap::Parser;
use skill_arbiter::app;
use skill_arbiter::cli::Cli;
use skill_arbiter::config::ArbiterConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ArbiterConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    app::init_logging(config.log_level(cli.verbose));

    match app::dispatch::dispatch(cli, config).await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
