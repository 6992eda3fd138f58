//! Logging utilities and initialization for DexView

use anyhow::Result;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;

/// Initialize logging.
///
/// Interactive modes (TUI/GUI) log to a file so the terminal is not
/// corrupted; plain CLI mode logs to stderr.
pub fn init_logging(verbose: u8, quiet: bool, interactive: bool) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    if interactive {
        init_file_logger(level)?;
    } else {
        Builder::from_default_env()
            .target(Target::Stderr)
            .filter_level(level)
            .format_timestamp_secs()
            .format_module_path(false)
            .init();
    }

    #[cfg(debug_assertions)]
    log_panics::init();

    log::debug!("DexView logging initialized with level: {:?}", level);
    Ok(())
}

/// Initialize file-based logging for interactive modes
fn init_file_logger(level: LevelFilter) -> Result<()> {
    use std::fs::OpenOptions;

    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(crate::APP_NAME)
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let log_file = log_dir.join("dexview.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    Builder::from_default_env()
        .target(Target::Pipe(Box::new(file)))
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();

    Ok(())
}

