use super::{AppState, CommandOutcome, Severity, View, DEFAULT_OUTLINE};
use crate::config::Config;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn app(text: &str) -> AppState {
    AppState::new(text, None, &Config::default())
}

fn run(app: &mut AppState, cmd: &str) -> CommandOutcome {
    app.enter_command();
    app.command_buffer.push_str(cmd);
    app.run_command()
}

#[test]
fn test_default_outline_generates_map() {
    let mut app = app(DEFAULT_OUTLINE);

    assert!(app.submit());
    assert_eq!(app.current_view, View::Map);

    let map = app.layout.as_ref().unwrap();
    // root, Main topic, Section 1, idea 1, idea 2, Section 2, idea 3, loose idea
    assert_eq!(map.nodes.len(), 8);
    assert_eq!(map.nodes[1].label, "Main topic");
    assert_eq!(map.nodes.last().unwrap().label, "loose idea");
    assert_eq!(app.message.as_ref().unwrap().severity, Severity::Info);
}

#[test]
fn test_blank_submit_warns_and_keeps_previous_map() {
    let mut app = app("A:\n\tb");
    assert!(app.submit());
    let before = app.layout.clone();

    app.editor_state.lines = edtui::Lines::from("\t\n  \n");
    app.show_editor();

    assert!(!app.submit());
    assert_eq!(app.current_view, View::Editor);
    assert_eq!(app.layout, before);
    let message = app.message.as_ref().unwrap();
    assert_eq!(message.severity, Severity::Warning);
    assert!(message.text.contains("valid outline"));
}

#[test]
fn test_outline_text_round_trips_editor_lines() {
    let app = app("A:\n\tb\n\tc");

    assert_eq!(app.outline_text(), "A:\n\tb\n\tc");
}

#[test]
fn test_show_map_requires_generated_layout() {
    let mut app = app("A:");

    app.show_map();
    assert_eq!(app.current_view, View::Editor);
    assert!(app.message.is_some());

    app.submit();
    app.show_editor();
    app.show_map();
    assert_eq!(app.current_view, View::Map);
}

#[test]
fn test_save_outline_writes_source_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "old").unwrap();
    let path = file.path().to_path_buf();

    let mut app = AppState::new("New:\n\titem", Some(path.clone()), &Config::default());
    assert!(app.save_outline().unwrap());

    assert_eq!(fs::read_to_string(&path).unwrap(), "New:\n\titem\n");
    assert_eq!(app.message.as_ref().unwrap().severity, Severity::Info);
}

#[test]
fn test_save_without_path_warns() {
    let mut app = app("A:");

    assert!(!app.save_outline().unwrap());

    assert_eq!(app.message.as_ref().unwrap().text, "No file name");
}

#[test]
fn test_write_quit_without_path_keeps_running() {
    let mut app = app("edited:\n\tunsaved");

    for cmd in ["wq", "x"] {
        assert_eq!(run(&mut app, cmd), CommandOutcome::Continue);
        let message = app.message.as_ref().unwrap();
        assert_eq!(message.severity, Severity::Warning);
        assert_eq!(message.text, "No file name");
    }
}

#[test]
fn test_write_quit_with_path_saves_then_quits() {
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_path_buf();
    let mut app = AppState::new("Kept:\n\titem", Some(path.clone()), &Config::default());

    assert_eq!(run(&mut app, "wq"), CommandOutcome::Quit);
    assert_eq!(fs::read_to_string(&path).unwrap(), "Kept:\n\titem\n");
}

#[test]
fn test_config_warning_survives_startup_submit() {
    let mut app = app(DEFAULT_OUTLINE);
    let err = Config::from_toml("shape_count = \"many\"").unwrap_err();

    app.submit();
    app.warn_config(&err);

    let message = app.message.as_ref().unwrap();
    assert_eq!(message.severity, Severity::Warning);
    assert!(message.text.starts_with("Using default settings"));
    assert_eq!(app.current_view, View::Map);
}

#[test]
fn test_export_command_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.json");
    let mut app = app("A:\n\tb");
    app.submit();

    let outcome = run(&mut app, &format!("export {}", out.display()));

    assert_eq!(outcome, CommandOutcome::Continue);
    assert_eq!(app.current_view, View::Map);
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_export_before_generate_warns() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.json");
    let mut app = app("A:");

    run(&mut app, &format!("export {}", out.display()));

    assert!(!out.exists());
    assert_eq!(app.message.as_ref().unwrap().text, "Nothing to export");
}

#[test]
fn test_generate_command_switches_to_map() {
    let mut app = app("A:\n\tb");

    assert_eq!(run(&mut app, "g"), CommandOutcome::Continue);
    assert_eq!(app.current_view, View::Map);
    assert!(app.layout.is_some());
}

#[test]
fn test_quit_and_unknown_commands() {
    let mut app = app("A:");

    assert_eq!(run(&mut app, "frobnicate"), CommandOutcome::Continue);
    assert_eq!(
        app.message.as_ref().unwrap().text,
        "Unknown command: frobnicate"
    );
    assert_eq!(app.current_view, View::Editor);

    assert_eq!(run(&mut app, "q"), CommandOutcome::Quit);
}

#[test]
fn test_cancel_command_restores_view() {
    let mut app = app("A:");
    app.submit();

    app.enter_command();
    app.command_buffer.push_str("w");
    app.cancel_command();

    assert_eq!(app.current_view, View::Map);
    assert!(app.command_buffer.is_empty());
}

#[test]
fn test_zoom_is_bounded_and_pan_scales() {
    let mut app = app("A:");

    for _ in 0..100 {
        app.zoom_in();
    }
    assert!(app.zoom <= 20.0);
    for _ in 0..200 {
        app.zoom_out();
    }
    assert!(app.zoom >= 0.1);

    app.reset_view();
    app.pan_by(1.0, -1.0);
    let step = app.layout_config.node_spacing_secondary;
    assert_eq!(app.pan, (step, -step));

    app.zoom_in();
    app.zoom_in();
    app.reset_view();
    assert_eq!((app.pan, app.zoom), ((0.0, 0.0), 1.0));
}
