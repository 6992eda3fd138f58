//! Push and pull command implementations

use crate::cli::args::Cli;
use crate::config::AppConfig;
use anyhow::Result;
use tokio::sync::mpsc;

pub async fn execute_push_command(
    cli: &Cli,
    config: &AppConfig,
    local: &str,
    remote: &str,
) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let serial = super::resolve_device(&bridge, cli.device.as_deref()).await?;

    println!("📤 Pushing {} -> {}:{}", local, serial, remote);
    let (tx, rx) = mpsc::unbounded_channel();
    let printer = super::spawn_event_printer(rx);

    let result = bridge.push(&serial, local, remote, tx).await;
    printer.await.ok();
    result?;

    println!("✅ Push completed");
    Ok(())
}

pub async fn execute_pull_command(
    cli: &Cli,
    config: &AppConfig,
    remote: &str,
    local: &str,
) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let serial = super::resolve_device(&bridge, cli.device.as_deref()).await?;

    println!("📥 Pulling {}:{} -> {}", serial, remote, local);
    let (tx, rx) = mpsc::unbounded_channel();
    let printer = super::spawn_event_printer(rx);

    let result = bridge.pull(&serial, remote, local, tx).await;
    printer.await.ok();
    result?;

    println!("✅ Pull completed");
    Ok(())
}
