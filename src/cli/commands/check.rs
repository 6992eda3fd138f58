//! Connection check command implementation

use crate::cli::args::Cli;
use crate::config::AppConfig;
use anyhow::Result;

pub async fn execute_check_command(cli: &Cli, config: &AppConfig) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let output = bridge.get_state(cli.device.as_deref()).await?;

    if output.success() && output.stdout == "device" {
        println!("✅ Bridge: device connected");
        Ok(())
    } else {
        anyhow::bail!(
            "no device connected or not authorized: {}",
            output.failure_text()
        )
    }
}
