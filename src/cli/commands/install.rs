//! Install command implementation

use crate::cli::args::Cli;
use crate::config::AppConfig;
use anyhow::Result;
use tokio::sync::mpsc;

pub async fn execute_install_command(cli: &Cli, config: &AppConfig, apk: &str) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let serial = super::resolve_device(&bridge, cli.device.as_deref()).await?;

    println!("📦 Installing {} on {}", apk, serial);
    let (tx, rx) = mpsc::unbounded_channel();
    let printer = super::spawn_event_printer(rx);

    let result = bridge.install(&serial, apk, tx).await;
    printer.await.ok();
    result?;

    println!("✅ Install completed");
    Ok(())
}
