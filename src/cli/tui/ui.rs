//! TUI rendering logic

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::cli::tui::main_app::App;
use crate::models::FocusedPane;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    // Main layout with help bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(main_chunks[0]);

    render_device_list(f, app, chunks[0]);
    render_log_pane(f, app, chunks[1]);
    render_help_bar(f, app, main_chunks[1]);

    if app.show_help {
        render_help_modal(f);
    }
    if app.show_action_menu {
        render_action_menu(f, app);
    }
    if let Some(prompt) = &app.input_prompt {
        render_input_prompt(f, prompt);
    }
    if let Some(message) = &app.warning_message {
        render_warning_modal(f, message);
    }
    if app.show_tool_warning && !app.tool_warning_acknowledged {
        render_tool_warning(f, app);
    }
}

fn render_device_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .devices
        .iter()
        .map(|device| {
            let mut spans = vec![
                Span::styled(device.state.symbol(), Style::default().fg(device.state.color())),
                Span::raw(" "),
                Span::raw(&device.serial),
            ];
            if let Some(model) = &device.model {
                spans.push(Span::styled(
                    format!(" {}", model),
                    Style::default().fg(Color::Gray),
                ));
            }
            spans.push(Span::styled(
                format!(" [{}]", device.state.label()),
                Style::default().fg(device.state.color()),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mirror_indicator = if app.mirror.is_some() { " 🖥️" } else { "" };
    let title = if app.focused_pane == FocusedPane::DeviceList {
        format!("📱 Devices{} [FOCUSED]", mirror_indicator)
    } else {
        format!("📱 Devices{}", mirror_indicator)
    };

    let block = if app.focused_pane == FocusedPane::DeviceList {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
    } else {
        Block::default().title(title).borders(Borders::ALL)
    };

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(list, area, &mut app.list_state.clone());
}

fn render_log_pane(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.focused_pane == FocusedPane::LogPane {
        "📜 Log [FOCUSED]"
    } else {
        "📜 Log"
    };

    let block = if app.focused_pane == FocusedPane::LogPane {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
    } else {
        Block::default().title(title).borders(Borders::ALL)
    };

    // Show the window of lines ending at the scroll offset
    let height = area.height.saturating_sub(2) as usize;
    let end = app
        .log_scroll_offset
        .saturating_add(1)
        .min(app.log_lines.len());
    let start = end.saturating_sub(height);
    let text: Vec<Line> = app.log_lines[start..end]
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.input_prompt.is_some() {
        "Type to edit | Tab: next field | Enter: run | Esc: cancel"
    } else if app.show_action_menu {
        "↑/↓: select | Enter: run | Esc: close"
    } else {
        "r: refresh | c: check | m: mirror | s: stop | Enter: actions | Tab: focus | ?: help | q: quit"
    };

    let paragraph = Paragraph::new(hints)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_help_modal(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from("DexView keys"),
        Line::from(""),
        Line::from("  r        refresh device list"),
        Line::from("  c        check bridge connection"),
        Line::from("  m        start mirroring the selected device"),
        Line::from("  s        stop mirroring"),
        Line::from("  Enter    open the action menu (push/pull/install/...)"),
        Line::from("  Tab      switch pane focus"),
        Line::from("  ↑/↓ j/k  navigate / scroll"),
        Line::from("  PgUp/Dn  scroll log by pages"),
        Line::from("  Home/End jump in the log"),
        Line::from("  q / Esc  quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("❓ Help").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_action_menu(f: &mut Frame, app: &App) {
    let area = centered_rect(40, 50, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = app
        .available_actions
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let style = if i == app.action_menu_selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(action.label()).style(style)
        })
        .collect();

    let title = match app.selected_device() {
        Some(device) => format!("⚡ Actions for {}", device.serial),
        None => "⚡ Actions".to_string(),
    };

    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(list, area);
}

fn render_input_prompt(f: &mut Frame, prompt: &crate::models::InputPrompt) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (i, label) in prompt.labels.iter().enumerate() {
        let marker = if i == prompt.active { "> " } else { "  " };
        let style = if i == prompt.active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}: {}", marker, label, prompt.values[i]),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: run | Tab: next field | Esc: cancel",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!("✏️  {}", prompt.action.label()))
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_warning_modal(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        Block::default()
            .title("⚠️  Warning")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_tool_warning(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![
        Line::from(app.tool_warning_message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to continue anyway, q to quit",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        Block::default()
            .title("🚨 Missing tools")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Centered sub-rectangle sized as a percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
