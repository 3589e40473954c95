//! ookstation entry point

use clap::Parser;

use ookstation_cli::{app, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    app::run(cli)
}
