//! Discovery of the external tools DexView wraps

use crate::config::AppConfig;
use std::path::PathBuf;

/// Locations of the wrapped external tools, when found
#[derive(Debug, Clone, Default)]
pub struct ToolCheck {
    /// Device bridge tool (`adb`)
    pub bridge: Option<PathBuf>,
    /// Screen mirroring tool (`scrcpy`)
    pub mirror: Option<PathBuf>,
}

impl ToolCheck {
    /// Warning text for missing tools, `None` when everything was found
    pub fn missing_message(&self) -> Option<String> {
        let mut missing = Vec::new();
        if self.bridge.is_none() {
            missing.push("'adb' (Android platform tools)");
        }
        if self.mirror.is_none() {
            missing.push("'scrcpy'");
        }
        if missing.is_empty() {
            None
        } else {
            Some(format!(
                "Missing external tool(s): {}. Install them and make sure they are on PATH.",
                missing.join(" and ")
            ))
        }
    }
}

/// Locate the bridge and mirroring tools, honoring config overrides
pub fn locate_tools(config: &AppConfig) -> ToolCheck {
    let bridge = match &config.bridge.program {
        Some(path) if path.exists() => Some(path.clone()),
        Some(path) => {
            log::warn!("configured bridge program not found: {}", path.display());
            which::which("adb").ok()
        }
        None => which::which("adb").ok(),
    };

    let mirror = match &config.mirror.program {
        Some(path) if path.exists() => Some(path.clone()),
        Some(path) => {
            log::warn!("configured mirror program not found: {}", path.display());
            which::which("scrcpy").ok()
        }
        None => which::which("scrcpy").ok(),
    };

    ToolCheck { bridge, mirror }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_names_each_tool() {
        let check = ToolCheck::default();
        let msg = check.missing_message().unwrap();
        assert!(msg.contains("adb"));
        assert!(msg.contains("scrcpy"));

        let check = ToolCheck {
            bridge: Some(PathBuf::from("/usr/bin/adb")),
            mirror: None,
        };
        let msg = check.missing_message().unwrap();
        assert!(!msg.contains("adb'"));
        assert!(msg.contains("scrcpy"));
    }

    #[test]
    fn complete_check_has_no_message() {
        let check = ToolCheck {
            bridge: Some(PathBuf::from("/usr/bin/adb")),
            mirror: Some(PathBuf::from("/usr/bin/scrcpy")),
        };
        assert!(check.missing_message().is_none());
    }

    #[test]
    fn config_override_falls_back_to_path_lookup_when_stale() {
        let mut config = AppConfig::default();
        config.bridge.program = Some(PathBuf::from("/nonexistent/adb"));
        let check = locate_tools(&config);
        // The stale override must never be reported as found
        assert_ne!(check.bridge, Some(PathBuf::from("/nonexistent/adb")));
    }
}
