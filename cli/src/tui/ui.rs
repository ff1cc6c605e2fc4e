use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use tasklist_core::controller::EMPTY_LIST_MESSAGE;
use tasklist_core::{FilterMode, KeyValueStore, TaskListController};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Focus, FormScreen};

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("TASKLIST")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let help = if app.on_form() {
        if let Some(form) = app.form.as_ref() {
            draw_form(f, form, main_chunks[1]);
        }
        "Tab: Switch field | Enter: Save | Esc: Back"
    } else {
        draw_task_list(f, app, main_chunks[1]);
        "j/k: Navigate | Tab: Filter | c: Complete | Enter: Edit | a: Add | q: Quit"
    };

    if let Some(status) = &app.status {
        let status_line = Paragraph::new(status.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(status_line, main_chunks[2]);
    }

    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_task_list<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let selected_filter = FilterMode::ALL
        .iter()
        .position(|m| *m == app.list.filter())
        .unwrap_or(0);
    let tabs = Tabs::new(FilterMode::ALL.iter().map(|m| m.label()).collect::<Vec<_>>())
        .select(selected_filter)
        .block(Block::default().title(" Filter ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    let list_block = Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded);

    if app.visible.is_empty() {
        let empty = Paragraph::new(EMPTY_LIST_MESSAGE)
            .alignment(Alignment::Center)
            .block(list_block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let rows: Vec<Row> = app.visible.iter().map(|task| {
        let (status_icon, status_style) = if task.is_completed {
            ("✔", Style::default().fg(Color::Green))
        } else {
            ("☐", Style::default().fg(Color::Yellow))
        };
        let action = if TaskListController::<S>::can_mark_completed(task) { "[c]" } else { "" };

        Row::new(vec![
            Span::styled(status_icon, status_style),
            Span::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(task.description.clone()),
            Span::styled(task.status_label(), status_style),
            Span::styled(action, Style::default().fg(Color::DarkGray)),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),      // Status icon
            Constraint::Percentage(35), // Title
            Constraint::Min(10),        // Description
            Constraint::Length(10),     // Status
            Constraint::Length(4),      // Action
        ]
    )
    .header(Row::new(vec!["St", "Title", "Description", "Status", ""]).style(Style::default().fg(Color::Yellow)))
    .block(list_block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[1], &mut app.state);
}

fn draw_form<S: KeyValueStore>(f: &mut Frame, form: &FormScreen<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Description
            Constraint::Length(1), // Submit
        ])
        .split(area);

    let field_block = |label: &'static str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
    };

    let values = form.controller.form();
    let title = Paragraph::new(values.title.as_str())
        .block(field_block(" Task title ", form.focus == Focus::Title));
    f.render_widget(title, chunks[0]);

    let description = Paragraph::new(values.description.as_str())
        .block(field_block(" Task description ", form.focus == Focus::Description))
        .wrap(Wrap { trim: false });
    f.render_widget(description, chunks[1]);

    let submit = Paragraph::new(Line::from(vec![Span::styled(
        format!("[ {} ]", form.controller.mode().submit_label()),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Center);
    f.render_widget(submit, chunks[2]);

    let field = match form.focus {
        Focus::Title => chunks[0],
        Focus::Description => chunks[1],
    };
    let before_cursor: String = form.focused_text().chars().take(form.cursor_position).collect();
    let max_x = field.x + field.width.saturating_sub(2);
    let x = (field.x + 1 + before_cursor.width() as u16).min(max_x);
    f.set_cursor_position((x, field.y + 1));
}
