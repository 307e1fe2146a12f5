use anyhow::Result;
use clap::Parser;
use env_logger::Env;

mod cli;

/// Environment variable holding the log filter, e.g. `PUNCHER_DEBUG=debug`.
const DEBUG_ENV: &str = "PUNCHER_DEBUG";

fn main() -> Result<()> {
    if let Ok(level) = std::env::var(DEBUG_ENV) {
        eprintln!("STDERR Debug logging set to level={}", level);
    }
    env_logger::Builder::from_env(Env::new().filter(DEBUG_ENV))
        .format_timestamp_millis()
        .init();

    let cli = cli::Cli::parse();
    log::info!("puncher start");
    cli::run(cli)
}
