//! One-shot subcommands printing to stdout.

use netbird_manager_client::{NetbirdCli, detect_os_info};

use crate::app::render_status;
use crate::config::Config;

fn status_cli(config: &Config) -> NetbirdCli {
    NetbirdCli::new(&config.netbird_binary, config.status_timeout())
}

fn action_cli(config: &Config) -> NetbirdCli {
    NetbirdCli::new(&config.netbird_binary, config.action_timeout())
}

/// Prints the status summary, or the error line when it is unavailable.
pub async fn status(config: &Config) -> anyhow::Result<()> {
    let text = render_status(&status_cli(config), &detect_os_info()).await;
    print!("{text}");
    Ok(())
}

/// Prints one profile name per line.
pub async fn profiles(config: &Config) -> anyhow::Result<()> {
    for profile in status_cli(config).profiles().await? {
        println!("{profile}");
    }
    Ok(())
}

pub async fn up(config: &Config, profile: &str) -> anyhow::Result<()> {
    action_cli(config).up(profile).await?;
    println!("Connected to {profile}");
    Ok(())
}

pub async fn down(config: &Config) -> anyhow::Result<()> {
    action_cli(config).down().await?;
    println!("Disconnected");
    Ok(())
}
