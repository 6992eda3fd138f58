//! CLI command implementations

pub mod check;
pub mod devices;
pub mod install;
pub mod launch;
pub mod mirror;
pub mod transfer;

use crate::bridge::BridgeClient;
use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::models::AppEvent;
use crate::utils::tools;
use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

/// Execute a CLI command
pub async fn execute_command(command: Commands, cli: &Cli, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Devices { json } => devices::execute_devices_command(config, json).await,
        Commands::Check => check::execute_check_command(cli, config).await,
        Commands::Mirror {
            max_size,
            no_stay_awake,
            turn_screen_off,
        } => {
            mirror::execute_mirror_command(cli, config, max_size, no_stay_awake, turn_screen_off)
                .await
        }
        Commands::Push { local, remote } => {
            transfer::execute_push_command(cli, config, &local, &remote).await
        }
        Commands::Pull { remote, local } => {
            transfer::execute_pull_command(cli, config, &remote, &local).await
        }
        Commands::Install { apk } => install::execute_install_command(cli, config, &apk).await,
        Commands::Launch { component } => {
            launch::execute_launch_command(cli, config, &component).await
        }
        Commands::Text { text } => launch::execute_text_command(cli, config, &text).await,
    }
}

/// Bridge client for CLI commands; fails loudly when the tool is missing
pub(crate) fn bridge_client(config: &AppConfig) -> Result<BridgeClient> {
    let check = tools::locate_tools(config);
    match check.bridge {
        Some(program) => Ok(BridgeClient::new(program)),
        None => anyhow::bail!(
            "bridge tool 'adb' not found; install the Android platform tools and make sure adb is on PATH"
        ),
    }
}

/// Pick the target device: an explicit `--device` wins, otherwise exactly
/// one usable connected device is required.
pub(crate) async fn resolve_device(
    bridge: &BridgeClient,
    requested: Option<&str>,
) -> Result<String> {
    if let Some(serial) = requested {
        return Ok(serial.to_string());
    }

    let devices = bridge.devices().await?;
    let usable: Vec<_> = devices.iter().filter(|d| d.state.is_usable()).collect();
    match usable.len() {
        0 => anyhow::bail!("no connected device; plug one in or pass --device <serial>"),
        1 => Ok(usable[0].serial.clone()),
        n => anyhow::bail!(
            "{} devices connected; pick one with --device <serial>",
            n
        ),
    }
}

/// Print streamed operation output until the channel closes
pub(crate) fn spawn_event_printer(
    mut rx: UnboundedReceiver<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                AppEvent::BridgeOutput(_, line) | AppEvent::MirrorOutput(line) => {
                    println!("{}", line);
                }
                AppEvent::Info(message) => println!("{}", message),
                AppEvent::Warning(message) => eprintln!("⚠️  {}", message),
                AppEvent::Error(message) => eprintln!("❌ {}", message),
                _ => {}
            }
        }
    })
}
