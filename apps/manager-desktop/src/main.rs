//! NetBird manager entry point.

mod app;
mod commands;
mod config;
mod console;
mod jobs;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Tray manager for the NetBird VPN client.
#[derive(Debug, Parser)]
#[command(name = "netbird-manager", version, about)]
struct Cli {
    /// Configuration file (defaults to ~/.config/netbird-manager/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the tray controller (default).
    Run,
    /// Print the status summary once.
    Status,
    /// List configured profiles.
    Profiles,
    /// Connect using a profile.
    Up { profile: String },
    /// Disconnect.
    Down,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration.
    let config = config::Config::load(cli.config.as_deref())?;
    tracing::debug!(binary = %config.netbird_binary, "configuration loaded");

    // Build and run the tokio runtime.
    let rt = tokio::runtime::Runtime::new()?;
    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                "starting NetBird manager"
            );
            rt.block_on(app::run(config))?;
            tracing::info!("manager shut down cleanly");
        }
        Command::Status => rt.block_on(commands::status(&config))?,
        Command::Profiles => rt.block_on(commands::profiles(&config))?,
        Command::Up { profile } => rt.block_on(commands::up(&config, &profile))?,
        Command::Down => rt.block_on(commands::down(&config))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["netbird-manager"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn up_takes_profile() {
        let cli = Cli::try_parse_from(["netbird-manager", "up", "work"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Up { profile }) if profile == "work"));
    }

    #[test]
    fn config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["netbird-manager", "status", "--config", "/tmp/nb.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Status)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/nb.toml")));
    }

    #[test]
    fn up_requires_profile() {
        assert!(Cli::try_parse_from(["netbird-manager", "up"]).is_err());
    }
}
