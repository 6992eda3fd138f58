//! Application launch and text input command implementations

use crate::cli::args::Cli;
use crate::config::AppConfig;
use anyhow::Result;

pub async fn execute_launch_command(cli: &Cli, config: &AppConfig, component: &str) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let serial = super::resolve_device(&bridge, cli.device.as_deref()).await?;

    let output = bridge.start_activity(&serial, component).await?;
    if output.success() {
        if !output.stdout.is_empty() {
            println!("{}", output.stdout);
        }
        println!("🚀 Launched {}", component);
        Ok(())
    } else {
        anyhow::bail!(
            "launch failed (exit {:?}): {}",
            output.code,
            output.failure_text()
        )
    }
}

pub async fn execute_text_command(cli: &Cli, config: &AppConfig, text: &str) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let serial = super::resolve_device(&bridge, cli.device.as_deref()).await?;

    let output = bridge.send_text(&serial, text).await?;
    if output.success() {
        println!("⌨️  Sent {} character(s)", text.chars().count());
        Ok(())
    } else {
        anyhow::bail!(
            "text input failed (exit {:?}): {}",
            output.code,
            output.failure_text()
        )
    }
}
