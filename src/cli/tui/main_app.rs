//! Main application state and logic
//!
//! `App` is shared by the TUI event loop and the GUI window: it owns the
//! device list, the log buffer and the (at most one) mirroring session, and
//! maps user actions onto bridge/mirror invocations. Long-running calls are
//! spawned as background tasks that report through the `AppEvent` channel.

use anyhow::Result;
use ratatui::widgets::ListState;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

use crate::bridge::BridgeClient;
use crate::config::AppConfig;
use crate::mirror::MirrorSession;
use crate::models::{AppEvent, Device, DeviceAction, FocusedPane, InputPrompt};
use crate::utils::tools;

pub struct App {
    pub bridge: BridgeClient,
    pub mirror_program: Option<PathBuf>,
    pub config: AppConfig,

    pub devices: Vec<Device>,
    pub selected_device: usize,
    pub list_state: ListState,

    pub log_lines: Vec<String>,
    pub log_scroll_offset: usize,
    pub log_auto_scroll: bool,

    pub focused_pane: FocusedPane,
    pub show_help: bool,
    pub show_tool_warning: bool,
    pub tool_warning_acknowledged: bool,
    pub tool_warning_message: String,
    pub show_action_menu: bool,
    pub action_menu_selected: usize,
    pub available_actions: Vec<DeviceAction>,
    pub input_prompt: Option<InputPrompt>,
    /// Modal warning for a rejected user action; dismissed with Enter/Esc
    pub warning_message: Option<String>,

    pub mirror: Option<MirrorSession>,

    last_poll_error: Option<String>,
}

impl App {
    /// Build the app, locating the external tools via PATH/config
    pub fn new(config: AppConfig) -> Result<Self> {
        let check = tools::locate_tools(&config);
        let bridge = BridgeClient::new(check.bridge.clone().unwrap_or_else(|| "adb".into()));
        let mut app = Self::with_tools(config, bridge, check.mirror.clone());
        if let Some(message) = check.missing_message() {
            app.show_tool_warning = true;
            app.tool_warning_message = message;
        }
        Ok(app)
    }

    /// Build the app around explicit tool locations (used by tests)
    pub fn with_tools(
        config: AppConfig,
        bridge: BridgeClient,
        mirror_program: Option<PathBuf>,
    ) -> Self {
        Self {
            bridge,
            mirror_program,
            config,
            devices: Vec::new(),
            selected_device: 0,
            list_state: ListState::default(),
            log_lines: Vec::new(),
            log_scroll_offset: 0,
            log_auto_scroll: true,
            focused_pane: FocusedPane::DeviceList,
            show_help: false,
            show_tool_warning: false,
            tool_warning_acknowledged: false,
            tool_warning_message: String::new(),
            show_action_menu: false,
            action_menu_selected: 0,
            available_actions: DeviceAction::ALL.to_vec(),
            input_prompt: None,
            warning_message: None,
            mirror: None,
            last_poll_error: None,
        }
    }

    pub fn acknowledge_tool_warning(&mut self) {
        self.tool_warning_acknowledged = true;
        self.show_tool_warning = false;
    }

    // ---- device selection -------------------------------------------------

    pub fn selected_device(&self) -> Option<&Device> {
        self.devices.get(self.selected_device)
    }

    pub fn next_device(&mut self) {
        if !self.devices.is_empty() {
            self.selected_device = (self.selected_device + 1) % self.devices.len();
            self.list_state.select(Some(self.selected_device));
        }
    }

    pub fn previous_device(&mut self) {
        if !self.devices.is_empty() {
            self.selected_device = if self.selected_device == 0 {
                self.devices.len() - 1
            } else {
                self.selected_device - 1
            };
            self.list_state.select(Some(self.selected_device));
        }
    }

    pub fn select_device_index(&mut self, index: usize) {
        if index < self.devices.len() {
            self.selected_device = index;
            self.list_state.select(Some(index));
        }
    }

    /// Serial of the selected device, or a modal warning when no usable
    /// device is selected. Every device-targeted operation goes through this
    /// before anything is spawned.
    fn selected_serial_for_ops(&self, tx: &UnboundedSender<AppEvent>) -> Option<String> {
        match self.selected_device() {
            None => {
                let _ = tx.send(AppEvent::Warning(
                    "No device selected. Connect a device and refresh.".to_string(),
                ));
                None
            }
            Some(device) if !device.state.is_usable() => {
                let _ = tx.send(AppEvent::Warning(format!(
                    "Device {} is {} and cannot be used.",
                    device.serial,
                    device.state.label()
                )));
                None
            }
            Some(device) => Some(device.serial.clone()),
        }
    }

    // ---- log buffer -------------------------------------------------------

    pub fn add_log_line(&mut self, line: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.log_lines.push(format!("{} {}", timestamp, line));
        if self.log_auto_scroll {
            self.log_scroll_offset = self.log_lines.len().saturating_sub(1);
        }
    }

    pub fn scroll_log_up(&mut self) {
        self.log_auto_scroll = false;
        self.log_scroll_offset = self.log_scroll_offset.saturating_sub(1);
    }

    pub fn scroll_log_down(&mut self) {
        let last = self.log_lines.len().saturating_sub(1);
        self.log_scroll_offset = (self.log_scroll_offset + 1).min(last);
        if self.log_scroll_offset == last {
            self.log_auto_scroll = true;
        }
    }

    pub fn reset_log_scroll(&mut self) {
        self.log_auto_scroll = true;
        self.log_scroll_offset = self.log_lines.len().saturating_sub(1);
    }

    pub fn toggle_focused_pane(&mut self) {
        self.focused_pane = match self.focused_pane {
            FocusedPane::DeviceList => FocusedPane::LogPane,
            FocusedPane::LogPane => FocusedPane::DeviceList,
        };
    }

    // ---- event handling ---------------------------------------------------

    /// Apply one application event to the shared state. UI front-ends call
    /// this and then re-render from the updated state.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DevicesUpdated(devices) => self.handle_devices_updated(devices),
            AppEvent::DevicesFailed(error) => self.handle_devices_failed(error),
            AppEvent::BridgeOutput(operation, line) => {
                self.add_log_line(format!("[{}] {}", operation, line));
            }
            AppEvent::OpFinished(operation, success) => {
                let line = if success {
                    format!("✅ {} completed successfully", operation)
                } else {
                    format!("❌ {} failed", operation)
                };
                self.add_log_line(line);
            }
            AppEvent::MirrorOutput(line) => {
                self.add_log_line(format!("[scrcpy] {}", line));
            }
            AppEvent::MirrorStarted(serial) => {
                self.add_log_line(format!("🖥️  Mirroring started for {}", serial));
            }
            AppEvent::MirrorExited => self.handle_mirror_exited(),
            AppEvent::Error(message) => self.add_log_line(format!("❌ {}", message)),
            AppEvent::Warning(message) => {
                self.add_log_line(format!("⚠️  {}", message));
                self.warning_message = Some(message);
            }
            AppEvent::Info(message) => self.add_log_line(format!("ℹ️  {}", message)),
            AppEvent::Tick => {}
        }
    }

    fn handle_devices_updated(&mut self, devices: Vec<Device>) {
        let previous_serial = self.selected_device().map(|d| d.serial.clone());
        let changed = devices != self.devices;
        self.devices = devices;

        self.selected_device = previous_serial
            .and_then(|serial| self.devices.iter().position(|d| d.serial == serial))
            .unwrap_or(0);
        if self.devices.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.selected_device));
        }

        self.last_poll_error = None;
        if changed {
            self.add_log_line(format!("🔍 Found {} device(s)", self.devices.len()));
        }
    }

    fn handle_devices_failed(&mut self, error: String) {
        // The poll repeats every few seconds; only log a failure once until
        // it changes or the next successful poll.
        if self.last_poll_error.as_deref() != Some(error.as_str()) {
            self.add_log_line(format!("❌ Device listing failed: {}", error));
            self.last_poll_error = Some(error);
        }
    }

    fn handle_mirror_exited(&mut self) {
        // After an explicit stop the session is already gone; only a
        // spontaneous exit still holds the handle.
        if let Some(mut session) = self.mirror.take() {
            match session.exit_code() {
                Some(code) => self.add_log_line(format!("[scrcpy] session ended (exit {})", code)),
                None => self.add_log_line("[scrcpy] session ended".to_string()),
            }
        }
    }

    /// True while the tracked mirroring process is alive
    pub fn mirror_active(&mut self) -> bool {
        match self.mirror.as_mut() {
            Some(session) => session.is_running(),
            None => false,
        }
    }

    // ---- actions ----------------------------------------------------------

    /// Execute an action menu entry. Actions that need arguments open the
    /// input prompt; the rest run immediately.
    pub async fn execute_action(&mut self, action: DeviceAction, tx: UnboundedSender<AppEvent>) {
        match action {
            DeviceAction::Mirror => self.start_mirror(tx).await,
            DeviceAction::StopMirror => self.stop_mirror(tx).await,
            DeviceAction::CheckConnection => self.spawn_check_connection(tx),
            _ => {
                // Opening the prompt is pointless without a usable device
                if self.selected_serial_for_ops(&tx).is_some() {
                    self.input_prompt = Some(InputPrompt::new(action));
                }
            }
        }
    }

    /// Submit the open input prompt, dispatching to the matching operation
    pub fn submit_input_prompt(&mut self, tx: UnboundedSender<AppEvent>) {
        let Some(prompt) = self.input_prompt.take() else {
            return;
        };
        if !prompt.is_complete() {
            let _ = tx.send(AppEvent::Warning(
                "All fields are required for this action.".to_string(),
            ));
            self.input_prompt = Some(prompt);
            return;
        }

        let mut values = prompt.values.into_iter();
        match prompt.action {
            DeviceAction::Push => {
                let local = values.next().unwrap_or_default();
                let remote = values.next().unwrap_or_default();
                self.spawn_push(local, remote, tx);
            }
            DeviceAction::Pull => {
                let remote = values.next().unwrap_or_default();
                let local = values.next().unwrap_or_default();
                self.spawn_pull(remote, local, tx);
            }
            DeviceAction::Install => {
                let apk = values.next().unwrap_or_default();
                self.spawn_install(apk, tx);
            }
            DeviceAction::Launch => {
                let component = values.next().unwrap_or_default();
                self.spawn_launch(component, tx);
            }
            DeviceAction::SendText => {
                let text = values.next().unwrap_or_default();
                self.spawn_send_text(text, tx);
            }
            _ => {}
        }
    }

    /// Ask the bridge for a fresh device list right now
    pub fn spawn_refresh_devices(&self, tx: UnboundedSender<AppEvent>) {
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            match bridge.devices().await {
                Ok(devices) => {
                    let _ = tx.send(AppEvent::DevicesUpdated(devices));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::DevicesFailed(format!("{:#}", e)));
                }
            }
        });
    }

    /// Query the bridge connection state
    pub fn spawn_check_connection(&self, tx: UnboundedSender<AppEvent>) {
        let bridge = self.bridge.clone();
        let serial = self.selected_device().map(|d| d.serial.clone());
        tokio::spawn(async move {
            match bridge.get_state(serial.as_deref()).await {
                Ok(output) if output.success() && output.stdout == "device" => {
                    let _ = tx.send(AppEvent::Info("Bridge: device connected".to_string()));
                }
                Ok(output) => {
                    let _ = tx.send(AppEvent::Warning(format!(
                        "Bridge: no device connected ({})",
                        output.failure_text()
                    )));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("Connection check failed: {:#}", e)));
                }
            }
        });
    }

    /// Start the mirroring session for the selected device. Refuses with an
    /// informational message while a session is already running.
    pub async fn start_mirror(&mut self, tx: UnboundedSender<AppEvent>) {
        if let Some(session) = self.mirror.as_mut() {
            if session.is_running() {
                let _ = tx.send(AppEvent::Info("Mirroring is already running.".to_string()));
                return;
            }
            // Stale handle from a session that died without being noticed
            self.mirror = None;
        }

        let Some(program) = self.mirror_program.clone() else {
            let _ = tx.send(AppEvent::Warning(
                "Mirroring tool (scrcpy) not found. Install it and restart.".to_string(),
            ));
            return;
        };
        let Some(serial) = self.selected_serial_for_ops(&tx) else {
            return;
        };

        let settings = self.config.mirror_settings();
        match MirrorSession::start(&program, &serial, &settings, tx.clone()).await {
            Ok(session) => {
                self.mirror = Some(session);
                let _ = tx.send(AppEvent::MirrorStarted(serial));
            }
            Err(e) => {
                let _ = tx.send(AppEvent::Error(format!("Failed to start mirroring: {:#}", e)));
            }
        }
    }

    /// Stop the tracked session; with none active this logs and does nothing
    pub async fn stop_mirror(&mut self, tx: UnboundedSender<AppEvent>) {
        match self.mirror.take() {
            None => {
                let _ = tx.send(AppEvent::Info("No mirroring process active.".to_string()));
            }
            Some(session) => match session.stop().await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::Info("Mirroring stopped.".to_string()));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("Failed to stop mirroring: {:#}", e)));
                }
            },
        }
    }

    pub fn spawn_push(&self, local: String, remote: String, tx: UnboundedSender<AppEvent>) {
        let Some(serial) = self.selected_serial_for_ops(&tx) else {
            return;
        };
        if local.trim().is_empty() || remote.trim().is_empty() {
            let _ = tx.send(AppEvent::Warning(
                "Both a local file and a remote path are required.".to_string(),
            ));
            return;
        }
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::Info(format!("Pushing {} -> {}", local, remote)));
            match bridge.push(&serial, &local, &remote, tx.clone()).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::OpFinished("push".to_string(), true));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("{:#}", e)));
                    let _ = tx.send(AppEvent::OpFinished("push".to_string(), false));
                }
            }
        });
    }

    pub fn spawn_pull(&self, remote: String, local: String, tx: UnboundedSender<AppEvent>) {
        let Some(serial) = self.selected_serial_for_ops(&tx) else {
            return;
        };
        if remote.trim().is_empty() || local.trim().is_empty() {
            let _ = tx.send(AppEvent::Warning(
                "Both a remote file and a local destination are required.".to_string(),
            ));
            return;
        }
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::Info(format!("Pulling {} -> {}", remote, local)));
            match bridge.pull(&serial, &remote, &local, tx.clone()).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::OpFinished("pull".to_string(), true));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("{:#}", e)));
                    let _ = tx.send(AppEvent::OpFinished("pull".to_string(), false));
                }
            }
        });
    }

    pub fn spawn_install(&self, apk: String, tx: UnboundedSender<AppEvent>) {
        let Some(serial) = self.selected_serial_for_ops(&tx) else {
            return;
        };
        if apk.trim().is_empty() {
            let _ = tx.send(AppEvent::Warning("A package file is required.".to_string()));
            return;
        }
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::Info(format!("Installing {}", apk)));
            match bridge.install(&serial, &apk, tx.clone()).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::OpFinished("install".to_string(), true));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("{:#}", e)));
                    let _ = tx.send(AppEvent::OpFinished("install".to_string(), false));
                }
            }
        });
    }

    pub fn spawn_launch(&self, component: String, tx: UnboundedSender<AppEvent>) {
        let Some(serial) = self.selected_serial_for_ops(&tx) else {
            return;
        };
        if component.trim().is_empty() {
            let _ = tx.send(AppEvent::Warning(
                "An application component is required.".to_string(),
            ));
            return;
        }
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            match bridge.start_activity(&serial, &component).await {
                Ok(output) if output.success() => {
                    for line in output.stdout.lines() {
                        let _ = tx.send(AppEvent::BridgeOutput(
                            "launch".to_string(),
                            line.to_string(),
                        ));
                    }
                    let _ = tx.send(AppEvent::OpFinished("launch".to_string(), true));
                }
                Ok(output) => {
                    let _ = tx.send(AppEvent::Error(format!(
                        "Launch failed (exit {:?}): {}",
                        output.code,
                        output.failure_text()
                    )));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("{:#}", e)));
                }
            }
        });
    }

    pub fn spawn_send_text(&self, text: String, tx: UnboundedSender<AppEvent>) {
        let Some(serial) = self.selected_serial_for_ops(&tx) else {
            return;
        };
        if text.is_empty() {
            let _ = tx.send(AppEvent::Warning("Text to send is required.".to_string()));
            return;
        }
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            match bridge.send_text(&serial, &text).await {
                Ok(output) if output.success() => {
                    let _ = tx.send(AppEvent::OpFinished("text input".to_string(), true));
                }
                Ok(output) => {
                    let _ = tx.send(AppEvent::Error(format!(
                        "Text input failed (exit {:?}): {}",
                        output.code,
                        output.failure_text()
                    )));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("{:#}", e)));
                }
            }
        });
    }
}
