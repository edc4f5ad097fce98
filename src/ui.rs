//! The UI renders the application state into something visible and vim-able.
//!
//! The draw function dispatches based on the current view (editor or map). Both screens
//! share a bottom bar that shows, in order of priority, the command line, the latest banner
//! message, or the key help for the screen.

use crate::app_state::{AppState, Severity, View};
use crate::render::MindMapCanvas;
use edtui::{EditorTheme, EditorView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const EDITOR_HELP: &str = "Ctrl+G: Generate | :g Generate | :w Save | :m Map | :q Quit";
const MAP_HELP: &str = "←/↑/↓/→: Pan | +/-: Zoom | 0: Reset | e/Esc: Edit | :export PATH | q: Quit";

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let body = if app.current_view == View::Command {
        app.return_view
    } else {
        app.current_view
    };
    match body {
        View::Map => draw_map(f, app, chunks[0]),
        View::Editor | View::Command => draw_editor(f, app, chunks[0]),
    }
    draw_status(f, app, body, chunks[1]);
}

fn draw_editor(f: &mut Frame, app: &mut AppState, area: Rect) {
    let title = match &app.source_path {
        Some(path) => format!("Outline: {}", path.display()),
        None => "Outline".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let editor = EditorView::new(&mut app.editor_state)
        .theme(EditorTheme::default())
        .wrap(true);
    f.render_widget(editor, inner);
}

fn draw_map(f: &mut Frame, app: &AppState, area: Rect) {
    let title = format!(
        "Mind map ({}, zoom {:.2})",
        app.layout_config.orientation, app.zoom
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(map) = &app.layout {
        let canvas = MindMapCanvas::new(map)
            .node_size(app.node_size)
            .pan(app.pan)
            .zoom(app.zoom)
            .block(block);
        f.render_widget(canvas, area);
    } else {
        f.render_widget(Paragraph::new("Nothing generated yet").block(block), area);
    }
}

fn draw_status(f: &mut Frame, app: &AppState, body: View, area: Rect) {
    let (text, style, title) = if app.current_view == View::Command {
        (
            format!(":{}", app.command_buffer),
            Style::default(),
            "Command",
        )
    } else if let Some(msg) = &app.message {
        let style = match msg.severity {
            Severity::Info => Style::default().fg(Color::Green),
            Severity::Warning => Style::default().fg(Color::Yellow),
            Severity::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        (msg.text.clone(), style, "")
    } else {
        let help = if body == View::Map {
            MAP_HELP
        } else {
            EDITOR_HELP
        };
        (help.to_string(), Style::default(), "")
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(status, area);
}
