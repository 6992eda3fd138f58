//! Command line argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "dexview")]
#[command(about = "📱 Desktop DeX-style front-end for Android devices via adb and scrcpy")]
pub struct Cli {
    /// Launch the desktop GUI window instead of the TUI
    #[arg(long, help = "Launch the desktop GUI window")]
    pub gui: bool,

    /// Run in CLI mode without TUI - for automation and scripting
    #[arg(long, help = "Run in CLI mode without interactive TUI")]
    pub cli: bool,

    /// Target device serial for subcommands (defaults to the only connected device)
    #[arg(short = 's', long = "device", global = true)]
    pub device: Option<String>,

    /// Path to a configuration file (defaults to the per-user location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease logging verbosity (only errors)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// List connected devices (default CLI behavior)
    Devices {
        /// Emit the device list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Query the bridge connection state
    Check,
    /// Mirror the device screen until the window closes or Ctrl-C
    Mirror {
        /// Bound on the longer display dimension in pixels
        #[arg(long)]
        max_size: Option<u32>,
        /// Do not keep the device awake while mirroring
        #[arg(long)]
        no_stay_awake: bool,
        /// Turn the device screen off while mirroring
        #[arg(long)]
        turn_screen_off: bool,
    },
    /// Push a local file to the device
    Push {
        local: String,
        remote: String,
    },
    /// Pull a file from the device
    Pull {
        remote: String,
        local: String,
    },
    /// Install a package on the device (reinstall allowed)
    Install {
        apk: String,
    },
    /// Start an application component on the device
    Launch {
        /// Component name, e.g. com.example/.MainActivity
        component: String,
    },
    /// Type text on the device
    Text {
        text: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
