//! TUI event loop and key handling

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tokio::sync::mpsc;

use crate::cli::tui::main_app::App;
use crate::cli::tui::ui::ui;
use crate::models::{AppEvent, FocusedPane};

/// Run the main TUI event loop
pub async fn run_tui_event_loop(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event channel
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Spawn tick generator
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Spawn the periodic device poll; the first tick fires immediately so
    // the list is populated at startup.
    let bridge = app.bridge.clone();
    let tx_poll = tx.clone();
    let poll_secs = app.config.ui.poll_interval_secs.max(1);
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

    // Main loop
    let result = loop {
        terminal.draw(|f| ui(f, &app))?;

        tokio::select! {
            // Handle crossterm events
            _ = tokio::task::spawn_blocking(|| event::poll(Duration::from_millis(50))) => {
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind == KeyEventKind::Press {
                            // Tool warning modal blocks everything else
                            if app.show_tool_warning && !app.tool_warning_acknowledged {
                                match key.code {
                                    KeyCode::Enter => app.acknowledge_tool_warning(),
                                    KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                                    _ => {}
                                }
                                continue;
                            }

                            // Modal warning for a rejected action
                            if app.warning_message.is_some() {
                                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                                    app.warning_message = None;
                                }
                                continue;
                            }

                            // Input prompt for actions that need arguments
                            if app.input_prompt.is_some() {
                                match key.code {
                                    KeyCode::Esc => {
                                        app.input_prompt = None;
                                    }
                                    KeyCode::Tab => {
                                        if let Some(prompt) = app.input_prompt.as_mut() {
                                            prompt.next_field();
                                        }
                                    }
                                    KeyCode::Backspace => {
                                        if let Some(prompt) = app.input_prompt.as_mut() {
                                            prompt.backspace();
                                        }
                                    }
                                    KeyCode::Enter => {
                                        app.submit_input_prompt(tx.clone());
                                    }
                                    KeyCode::Char(c) => {
                                        if let Some(prompt) = app.input_prompt.as_mut() {
                                            prompt.type_char(c);
                                        }
                                    }
                                    _ => {}
                                }
                                continue;
                            }

                            // Action menu
                            if app.show_action_menu {
                                match key.code {
                                    KeyCode::Up | KeyCode::Char('k') => {
                                        if app.action_menu_selected > 0 {
                                            app.action_menu_selected -= 1;
                                        } else {
                                            app.action_menu_selected =
                                                app.available_actions.len().saturating_sub(1);
                                        }
                                    }
                                    KeyCode::Down | KeyCode::Char('j') => {
                                        app.action_menu_selected = (app.action_menu_selected + 1)
                                            % app.available_actions.len();
                                    }
                                    KeyCode::Enter => {
                                        if let Some(action) =
                                            app.available_actions.get(app.action_menu_selected).copied()
                                        {
                                            app.show_action_menu = false;
                                            app.execute_action(action, tx.clone()).await;
                                        }
                                    }
                                    KeyCode::Esc => {
                                        app.show_action_menu = false;
                                    }
                                    _ => {}
                                }
                                continue;
                            }

                            match key.code {
                                KeyCode::Char('q') => break Ok(()),
                                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                    break Ok(());
                                }
                                KeyCode::Tab => app.toggle_focused_pane(),
                                KeyCode::Char('h') | KeyCode::Char('?') => {
                                    app.show_help = !app.show_help;
                                }
                                KeyCode::Up | KeyCode::Char('k') => match app.focused_pane {
                                    FocusedPane::DeviceList => app.previous_device(),
                                    FocusedPane::LogPane => app.scroll_log_up(),
                                },
                                KeyCode::Down | KeyCode::Char('j') => match app.focused_pane {
                                    FocusedPane::DeviceList => app.next_device(),
                                    FocusedPane::LogPane => app.scroll_log_down(),
                                },
                                KeyCode::PageUp => {
                                    if app.focused_pane == FocusedPane::LogPane {
                                        for _ in 0..10 {
                                            app.scroll_log_up();
                                        }
                                    }
                                }
                                KeyCode::PageDown => {
                                    if app.focused_pane == FocusedPane::LogPane {
                                        for _ in 0..10 {
                                            app.scroll_log_down();
                                        }
                                    }
                                }
                                KeyCode::Home => {
                                    if app.focused_pane == FocusedPane::LogPane {
                                        app.log_auto_scroll = false;
                                        app.log_scroll_offset = 0;
                                    }
                                }
                                KeyCode::End => {
                                    if app.focused_pane == FocusedPane::LogPane {
                                        app.reset_log_scroll();
                                    }
                                }
                                // Direct shortcuts
                                KeyCode::Char('r') => app.spawn_refresh_devices(tx.clone()),
                                KeyCode::Char('c') => app.spawn_check_connection(tx.clone()),
                                KeyCode::Char('m') => app.start_mirror(tx.clone()).await,
                                KeyCode::Char('s') => app.stop_mirror(tx.clone()).await,
                                KeyCode::Enter => {
                                    if app.focused_pane == FocusedPane::DeviceList {
                                        app.show_action_menu = true;
                                        app.action_menu_selected = 0;
                                    }
                                }
                                KeyCode::Esc => {
                                    if app.show_help {
                                        app.show_help = false;
                                    } else {
                                        break Ok(());
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                }
            }

            // Handle app events
            Some(event) = rx.recv() => {
                app.handle_event(event);
            }
        }
    };

    // Leave no orphaned mirroring process behind
    if app.mirror.is_some() {
        app.stop_mirror(tx.clone()).await;
    }

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
