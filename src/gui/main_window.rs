//! Main GUI window implementation using Slint

use anyhow::Result;
use slint::{ComponentHandle, Model, ModelRc, SharedString, VecModel};
use std::{rc::Rc, sync::Arc, time::Duration};
use tokio::sync::{Mutex, mpsc};

use crate::cli::tui::main_app::App;
use crate::models::AppEvent;

// Include the generated Slint code
slint::include_modules!();

/// Run the main GUI window with async event handling
pub async fn run_main_window(app: App) -> Result<()> {
    let main_window = MainWindow::new()?;

    // Initial window state
    main_window.set_devices(ModelRc::new(Rc::new(VecModel::<SharedString>::default())));
    main_window.set_log_lines(ModelRc::new(Rc::new(VecModel::<SharedString>::default())));
    main_window.set_status_text("idle".into());
    if app.show_tool_warning {
        main_window.set_warning_text(app.tool_warning_message.clone().into());
    }

    // Create event channel for async communication
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let bridge = app.bridge.clone();
    let poll_secs = app.config.ui.poll_interval_secs.max(1);
    let app = Arc::new(Mutex::new(app));

    setup_event_handlers(&main_window, app.clone(), tx.clone());

    // Periodic device poll; the first tick fires immediately
    let tx_poll = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));
        loop {
            interval.tick().await;
            let event = match bridge.devices().await {
                Ok(devices) => AppEvent::DevicesUpdated(devices),
                Err(e) => AppEvent::DevicesFailed(format!("{:#}", e)),
            };
            if tx_poll.send(event).is_err() {
                break;
            }
        }
    });

    // Event pump: apply each event to the shared state, then push the
    // derived view changes onto the slint event loop thread.
    let window_weak = main_window.as_weak();
    let app_events = app.clone();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let update = {
                let mut app = app_events.lock().await;
                UiUpdate::from_event(&mut app, event)
            };
            let _ = window_weak.upgrade_in_event_loop(move |window| update.apply(&window));
        }
    });

    // Show the window and run the GUI event loop
    main_window.show()?;
    slint::run_event_loop()?;

    // Window closed; leave no orphaned mirroring process behind
    let mut app = app.lock().await;
    if app.mirror.is_some() {
        app.stop_mirror(tx.clone()).await;
    }

    Ok(())
}

/// View changes derived from one application event
#[derive(Default)]
struct UiUpdate {
    devices: Option<Vec<SharedString>>,
    selected: Option<i32>,
    new_log_lines: Vec<SharedString>,
    mirror_running: Option<bool>,
    status_text: Option<SharedString>,
    warning_text: Option<SharedString>,
}

impl UiUpdate {
    fn from_event(app: &mut App, event: AppEvent) -> Self {
        let log_before = app.log_lines.len();
        let warning = match &event {
            AppEvent::Warning(message) => Some(message.clone()),
            _ => None,
        };
        let devices_changed = matches!(&event, AppEvent::DevicesUpdated(_));

        app.handle_event(event);

        let mut update = UiUpdate::default();
        if devices_changed {
            update.devices = Some(
                app.devices
                    .iter()
                    .map(|d| SharedString::from(d.display_label()))
                    .collect(),
            );
            update.selected = Some(if app.devices.is_empty() {
                -1
            } else {
                app.selected_device as i32
            });
        }
        update.new_log_lines = app.log_lines[log_before..]
            .iter()
            .map(|line| SharedString::from(line.as_str()))
            .collect();

        let running = app.mirror_active();
        update.mirror_running = Some(running);
        update.status_text = Some(match app.mirror.as_ref() {
            Some(session) if running => format!("mirroring {}", session.serial()).into(),
            _ => "idle".into(),
        });
        update.warning_text = warning.map(SharedString::from);
        update
    }

    fn apply(self, window: &MainWindow) {
        if let Some(devices) = self.devices {
            window.set_devices(ModelRc::new(Rc::new(VecModel::from(devices))));
            if let Some(selected) = self.selected {
                window.set_selected_device(selected);
            }
        }
        if !self.new_log_lines.is_empty() {
            let model = window.get_log_lines();
            if let Some(vec_model) = model.as_any().downcast_ref::<VecModel<SharedString>>() {
                for line in self.new_log_lines {
                    vec_model.push(line);
                }
            }
        }
        if let Some(running) = self.mirror_running {
            window.set_mirror_running(running);
        }
        if let Some(status) = self.status_text {
            window.set_status_text(status);
        }
        if let Some(warning) = self.warning_text {
            window.set_warning_text(warning);
        }
    }
}

/// Wire the window callbacks to the shared app state
fn setup_event_handlers(
    main_window: &MainWindow,
    app: Arc<Mutex<App>>,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_refresh_devices(move || {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock().await.spawn_refresh_devices(tx);
        });
    });

    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_check_connection(move || {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock().await.spawn_check_connection(tx);
        });
    });

    let app_clone = app.clone();
    main_window.on_device_selected(move |index| {
        let app = app_clone.clone();
        tokio::spawn(async move {
            if index >= 0 {
                app.lock().await.select_device_index(index as usize);
            }
        });
    });

    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_start_mirror(move || {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock().await.start_mirror(tx).await;
        });
    });

    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_stop_mirror(move || {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock().await.stop_mirror(tx).await;
        });
    });

    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_push_file(move |local, remote| {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock()
                .await
                .spawn_push(local.to_string(), remote.to_string(), tx);
        });
    });

    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_pull_file(move |remote, local| {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock()
                .await
                .spawn_pull(remote.to_string(), local.to_string(), tx);
        });
    });

    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_install_package(move |apk| {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock().await.spawn_install(apk.to_string(), tx);
        });
    });

    let app_clone = app.clone();
    let tx_clone = tx.clone();
    main_window.on_launch_app(move |component| {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock().await.spawn_launch(component.to_string(), tx);
        });
    });

    let app_clone = app;
    let tx_clone = tx;
    main_window.on_send_text(move |text| {
        let app = app_clone.clone();
        let tx = tx_clone.clone();
        tokio::spawn(async move {
            app.lock().await.spawn_send_text(text.to_string(), tx);
        });
    });
}
