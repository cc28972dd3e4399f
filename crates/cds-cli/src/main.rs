mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use cli_utils::Settings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Default to warn unless RUST_LOG says otherwise
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cds_cli=warn,cds_core=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = Settings::load(args.config.as_deref(), args.no_backup)?;

    match args.command {
        Command::Save { file, command } => {
            let path = settings.save_path(file)?;
            commands::save::run(&settings, &path, command)
        }
        Command::Exe { file, command } => {
            let path = settings.exe_path(file)?;
            commands::exe::run(&settings, &path, command)
        }
    }
}
