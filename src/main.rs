//! mindmap: draw tab-indented outlines as mind maps in the terminal.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use edtui::{EditorEventHandler, EditorMode};
use mindmap::app_state::{AppState, CommandOutcome, View, DEFAULT_OUTLINE};
use mindmap::config::{Config, CONFIG_FILE};
use mindmap::layout::{layout, Orientation};
use mindmap::{parser, ui, Result};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mindmap")]
#[command(about = "Lay out tab-indented outlines as mind maps", long_about = None)]
struct Args {
    /// Outline file to open ('-' reads standard input)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Load configuration from this file instead of ./mindmap.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Direction in which depth grows (horizontal or vertical)
    #[arg(long, short = 'o')]
    orientation: Option<Orientation>,

    /// Print the layout as JSON instead of opening the viewer
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let (mut cfg, config_error) = match &args.config {
        Some(path) => (Config::load_from(path)?, None),
        None => Config::load(),
    };

    // Override config with command line args
    if let Some(orientation) = args.orientation {
        cfg.orientation = orientation.to_string();
    }

    init_tracing(&cfg, !args.json)?;
    if let Some(e) = &config_error {
        tracing::warn!(error = %e, "ignoring {CONFIG_FILE}");
    }

    let (text, source_path) = read_outline(args.path)?;

    if args.json {
        let tree = parser::parse(&text);
        let map = layout(&tree, &cfg.layout_config());
        println!("{}", map.to_json()?);
        return Ok(());
    }

    let mut app = AppState::new(&text, source_path, &cfg);
    if !text.trim().is_empty() {
        app.submit();
    }
    if let Some(e) = &config_error {
        app.warn_config(e);
    }
    run_tui(app)
}

/// Outline text and the file it may be saved back to.
fn read_outline(path: Option<PathBuf>) -> Result<(String, Option<PathBuf>)> {
    match path {
        None => Ok((DEFAULT_OUTLINE.to_string(), None)),
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok((text, None))
        }
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            Ok((text, Some(path)))
        }
    }
}

/// Log to the configured file, or to stderr when the terminal is not taken over.
fn init_tracing(cfg: &Config, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env("MINDMAP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));

    if !cfg.log_file.is_empty() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&cfg.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_tui(mut app: AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor_handler = EditorEventHandler::default();

    let result = run_app(&mut terminal, &mut app, &mut editor_handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    editor_handler: &mut EditorEventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        let outcome = match app.current_view {
            View::Editor => {
                handle_editor_key(app, editor_handler, key);
                CommandOutcome::Continue
            }
            View::Map => handle_map_key(app, key),
            View::Command => handle_command_key(app, key),
        };
        if outcome == CommandOutcome::Quit {
            return Ok(());
        }
    }
}

fn handle_editor_key(app: &mut AppState, editor_handler: &mut EditorEventHandler, key: KeyEvent) {
    let normal = app.editor_state.mode == EditorMode::Normal;
    match key.code {
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit();
        }
        KeyCode::Char(':') if normal => app.enter_command(),
        KeyCode::Esc if normal => app.show_map(),
        _ => editor_handler.on_key_event(key, &mut app.editor_state),
    }
}

fn handle_map_key(app: &mut AppState, key: KeyEvent) -> CommandOutcome {
    match key.code {
        KeyCode::Char('q') => return CommandOutcome::Quit,
        KeyCode::Left | KeyCode::Char('h') => app.pan_by(-1.0, 0.0),
        KeyCode::Right | KeyCode::Char('l') => app.pan_by(1.0, 0.0),
        KeyCode::Up | KeyCode::Char('k') => app.pan_by(0.0, -1.0),
        KeyCode::Down | KeyCode::Char('j') => app.pan_by(0.0, 1.0),
        KeyCode::Char('+' | '=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::Char('0') => app.reset_view(),
        KeyCode::Char('e') | KeyCode::Esc => app.show_editor(),
        KeyCode::Char(':') => app.enter_command(),
        _ => {}
    }
    CommandOutcome::Continue
}

fn handle_command_key(app: &mut AppState, key: KeyEvent) -> CommandOutcome {
    match key.code {
        KeyCode::Char(c) => app.command_buffer.push(c),
        KeyCode::Backspace => {
            app.command_buffer.pop();
        }
        KeyCode::Enter => return app.run_command(),
        KeyCode::Esc => app.cancel_command(),
        _ => {}
    }
    CommandOutcome::Continue
}
