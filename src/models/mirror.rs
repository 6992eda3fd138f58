//! Mirroring session settings

use serde::{Deserialize, Serialize};

/// Arguments passed to the mirroring tool when starting a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorSettings {
    /// Bound on the longer dimension of the mirrored display (pixels)
    pub max_size: u32,
    /// Keep the device awake while mirrored
    pub stay_awake: bool,
    /// Turn the physical screen off while mirroring
    pub turn_screen_off: bool,
    /// Extra arguments appended verbatim
    pub extra_args: Vec<String>,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            max_size: 1280,
            stay_awake: true,
            turn_screen_off: false,
            extra_args: Vec::new(),
        }
    }
}

impl MirrorSettings {
    /// Build the argument list for a session against `serial`
    pub fn to_args(&self, serial: &str) -> Vec<String> {
        let mut args = vec!["-s".to_string(), serial.to_string()];
        if self.stay_awake {
            args.push("--stay-awake".to_string());
        }
        args.push("--max-size".to_string());
        args.push(self.max_size.to_string());
        if self.turn_screen_off {
            args.push("--turn-screen-off".to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_classic_invocation() {
        let args = MirrorSettings::default().to_args("R5CT20ABCDE");
        assert_eq!(
            args,
            vec!["-s", "R5CT20ABCDE", "--stay-awake", "--max-size", "1280"]
        );
    }

    #[test]
    fn extra_args_are_appended_last() {
        let settings = MirrorSettings {
            max_size: 1024,
            stay_awake: false,
            turn_screen_off: true,
            extra_args: vec!["--no-audio".to_string()],
        };
        let args = settings.to_args("x");
        assert_eq!(
            args,
            vec!["-s", "x", "--max-size", "1024", "--turn-screen-off", "--no-audio"]
        );
    }
}
