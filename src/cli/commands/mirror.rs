//! Mirror command implementation

use crate::cli::args::Cli;
use crate::config::AppConfig;
use crate::mirror::MirrorSession;
use crate::utils::tools;
use anyhow::Result;
use tokio::sync::mpsc;

pub async fn execute_mirror_command(
    cli: &Cli,
    config: &AppConfig,
    max_size: Option<u32>,
    no_stay_awake: bool,
    turn_screen_off: bool,
) -> Result<()> {
    let bridge = super::bridge_client(config)?;
    let check = tools::locate_tools(config);
    let Some(program) = check.mirror else {
        anyhow::bail!("mirroring tool 'scrcpy' not found; install it and make sure it is on PATH")
    };

    let serial = super::resolve_device(&bridge, cli.device.as_deref()).await?;

    let mut settings = config.mirror_settings();
    if let Some(max_size) = max_size {
        settings.max_size = max_size;
    }
    if no_stay_awake {
        settings.stay_awake = false;
    }
    if turn_screen_off {
        settings.turn_screen_off = true;
    }

    println!("🖥️  Mirroring {} (close the window or Ctrl-C to stop)", serial);

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = super::spawn_event_printer(rx);

    let session = MirrorSession::start(&program, &serial, &settings, tx).await?;
    let code = session.wait().await?;
    printer.await.ok();

    match code {
        Some(0) => {
            println!("✅ Mirroring session ended");
            Ok(())
        }
        Some(code) => anyhow::bail!("mirroring session ended with exit code {}", code),
        None => anyhow::bail!("mirroring session was killed by a signal"),
    }
}
