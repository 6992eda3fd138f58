//! Application events for TUI, GUI and CLI operations

use crate::models::device::Device;

/// Application events for communication between components
#[derive(Debug)]
pub enum AppEvent {
    // Device poll events
    DevicesUpdated(Vec<Device>),
    DevicesFailed(String),

    // Bridge operation events
    BridgeOutput(String, String), // operation, line
    OpFinished(String, bool),     // operation, success

    // Mirroring session events
    MirrorOutput(String), // one line of the mirror tool's stderr feed
    MirrorStarted(String), // device serial
    MirrorExited,

    // General events
    Tick,

    // User feedback events for the UI log
    Error(String),
    Warning(String),
    Info(String),
}
