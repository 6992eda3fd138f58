//! Devices command implementation

use crate::config::AppConfig;
use anyhow::Result;

pub async fn execute_devices_command(config: &AppConfig, json: bool) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let devices = bridge.devices().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("⚠️  No devices found. Connect a device and enable USB debugging.");
        return Ok(());
    }

    println!("🔍 Found {} device(s):", devices.len());
    for device in &devices {
        let model = device.model.as_deref().unwrap_or("-");
        println!(
            "  {} {:<24} {:<14} {}",
            device.state.symbol(),
            device.serial,
            device.state.label(),
            model
        );
    }
    Ok(())
}
