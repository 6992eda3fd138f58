//! Application configuration management
//!
//! Configuration is optional: a missing file means defaults. The file lives
//! at `<config_dir>/dexview/config.toml` and every section may be partial.

use crate::errors::{DexError, Result};
use crate::models::MirrorSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Bridge tool (adb) configuration
    pub bridge: BridgeConfig,
    /// Mirroring tool (scrcpy) configuration
    pub mirror: MirrorConfig,
    /// UI configuration
    pub ui: UiConfig,
}

/// Bridge-tool related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Explicit path to the bridge binary; PATH lookup when unset
    pub program: Option<PathBuf>,
}

/// Mirroring related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Explicit path to the mirroring binary; PATH lookup when unset
    pub program: Option<PathBuf>,
    /// Bound on the longer dimension of the mirrored display (pixels)
    pub max_size: u32,
    /// Keep the device awake while mirrored
    pub stay_awake: bool,
    /// Turn the physical screen off while mirroring
    pub turn_screen_off: bool,
    /// Extra arguments appended verbatim to every session
    pub extra_args: Vec<String>,
}

/// UI-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Device list poll interval in seconds
    pub poll_interval_secs: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        let settings = MirrorSettings::default();
        Self {
            program: None,
            max_size: settings.max_size,
            stay_awake: settings.stay_awake,
            turn_screen_off: settings.turn_screen_off,
            extra_args: settings.extra_args,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
        }
    }
}

impl AppConfig {
    /// Default configuration file location, if a config dir exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::APP_NAME).join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Write the configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| DexError::Config(format!("invalid config path: {}", path.display())))?;
        std::fs::create_dir_all(parent)?;
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Session settings derived from the mirror section
    pub fn mirror_settings(&self) -> MirrorSettings {
        MirrorSettings {
            max_size: self.mirror.max_size,
            stay_awake: self.mirror.stay_awake,
            turn_screen_off: self.mirror.turn_screen_off,
            extra_args: self.mirror.extra_args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_invocation() {
        let config = AppConfig::default();
        assert_eq!(config.mirror.max_size, 1280);
        assert!(config.mirror.stay_awake);
        assert!(!config.mirror.turn_screen_off);
        assert_eq!(config.ui.poll_interval_secs, 5);
        assert!(config.bridge.program.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [mirror]
            max_size = 800
            "#,
        )
        .unwrap();
        assert_eq!(config.mirror.max_size, 800);
        assert!(config.mirror.stay_awake);
        assert_eq!(config.ui.poll_interval_secs, 5);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.bridge.program = Some(PathBuf::from("/opt/platform-tools/adb"));
        config.mirror.extra_args = vec!["--no-audio".to_string()];

        let text = toml::to_string_pretty(&config).unwrap();
        let reloaded: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(
            reloaded.bridge.program.as_deref(),
            Some(Path::new("/opt/platform-tools/adb"))
        );
        assert_eq!(reloaded.mirror.extra_args, vec!["--no-audio".to_string()]);
    }
}
