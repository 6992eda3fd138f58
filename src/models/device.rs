//! Connected device data models

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Connection state of a device as reported by `adb devices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    /// Fully connected and authorized
    Device,
    Offline,
    Unauthorized,
    Recovery,
    Sideload,
    NoPermissions,
    /// Any state token this version does not know about
    Unknown,
}

impl DeviceState {
    /// Parse the state column of `adb devices -l`
    pub fn from_token(token: &str) -> Self {
        match token {
            "device" => DeviceState::Device,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            "recovery" => DeviceState::Recovery,
            "sideload" => DeviceState::Sideload,
            "no permissions" | "no_permissions" => DeviceState::NoPermissions,
            _ => DeviceState::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceState::Device => "device",
            DeviceState::Offline => "offline",
            DeviceState::Unauthorized => "unauthorized",
            DeviceState::Recovery => "recovery",
            DeviceState::Sideload => "sideload",
            DeviceState::NoPermissions => "no permissions",
            DeviceState::Unknown => "unknown",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DeviceState::Device => "✅",
            DeviceState::Offline => "💤",
            DeviceState::Unauthorized => "🔒",
            DeviceState::Recovery | DeviceState::Sideload => "🔧",
            DeviceState::NoPermissions => "⛔",
            DeviceState::Unknown => "❓",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DeviceState::Device => Color::Green,
            DeviceState::Offline => Color::DarkGray,
            DeviceState::Unauthorized => Color::Yellow,
            DeviceState::Recovery | DeviceState::Sideload => Color::Cyan,
            DeviceState::NoPermissions => Color::Red,
            DeviceState::Unknown => Color::Gray,
        }
    }

    /// Only devices in this state accept shell/push/mirror operations
    pub fn is_usable(&self) -> bool {
        matches!(self, DeviceState::Device)
    }
}

/// One row of the bridge tool's device table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Serial number, the opaque token passed back via `-s`
    pub serial: String,
    pub state: DeviceState,
    /// `product:` field from the long listing, if present
    pub product: Option<String>,
    /// `model:` field from the long listing, if present
    pub model: Option<String>,
    /// `device:` field (hardware name) from the long listing, if present
    pub hardware: Option<String>,
    /// `transport_id:` field from the long listing, if present
    pub transport_id: Option<String>,
}

impl Device {
    pub fn new(serial: impl Into<String>, state: DeviceState) -> Self {
        Self {
            serial: serial.into(),
            state,
            product: None,
            model: None,
            hardware: None,
            transport_id: None,
        }
    }

    /// Human readable label for selectors: serial plus model when known
    pub fn display_label(&self) -> String {
        match &self.model {
            Some(model) => format!("{} ({})", self.serial, model),
            None => self.serial.clone(),
        }
    }
}
