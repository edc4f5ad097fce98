//! The core state machine bridging the outline text box and the rendered diagram.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! edits and views. The editor buffer is the outline; submitting it parses and lays it out
//! in one go and switches to the map view. The layout is only replaced by an explicit
//! submit, never re-computed behind the user's back.

use crate::config::Config;
use crate::error::Result;
use crate::layout::{layout, LayoutConfig, MindMapLayout};
use crate::parser::parse;
use edtui::{EditorState, Lines};
use std::fs;
use std::path::{Path, PathBuf};

/// Outline shown when no file is given.
pub const DEFAULT_OUTLINE: &str = "Main topic:
\tSection 1:
\t\tidea 1
\t\tidea 2
\tSection 2:
\t\tidea 3
\tloose idea
";

const ZOOM_STEP: f64 = 1.25;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 20.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Vim-like text box holding the outline.
    Editor,
    /// The rendered mind map.
    Map,
    /// Captures vim-style command input after ':' keystroke.
    Command,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Severity of a banner message, used to pick its color.
pub enum Severity {
    /// Confirmation of a completed action.
    Info,
    /// The request was understood but could not be carried out as given.
    Warning,
    /// An operation failed.
    Error,
}

#[derive(Clone, PartialEq, Eq, Debug)]
/// Status feedback displayed in the banner.
pub struct Message {
    /// How the banner is styled.
    pub severity: Severity,
    /// Text shown to the user.
    pub text: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// What the event loop should do after a command.
pub enum CommandOutcome {
    /// Keep running.
    Continue,
    /// Leave the application.
    Quit,
}

/// Bridges the outline editor and the rendered diagram, maintaining session state.
pub struct AppState {
    /// Editor buffer holding the outline text.
    pub editor_state: EditorState,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Screen to return to when a command finishes.
    pub return_view: View,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
    /// Banner feedback for the last action.
    pub message: Option<Message>,
    /// Most recently generated diagram.
    pub layout: Option<MindMapLayout>,
    /// Spacing, orientation and style classes for generation.
    pub layout_config: LayoutConfig,
    /// Base shape size handed to the renderer.
    pub node_size: f64,
    /// File the outline was read from, if any.
    pub source_path: Option<PathBuf>,
    /// Offset of the map view center in layout units.
    pub pan: (f64, f64),
    /// Magnification of the map view.
    pub zoom: f64,
}

impl AppState {
    #[must_use]
    /// Initialises application state with the outline text in the editor.
    pub fn new(text: &str, source_path: Option<PathBuf>, cfg: &Config) -> Self {
        Self {
            editor_state: EditorState::new(Lines::from(text)),
            current_view: View::Editor,
            return_view: View::Editor,
            command_buffer: String::new(),
            message: None,
            layout: None,
            layout_config: cfg.layout_config(),
            node_size: cfg.node_size,
            source_path,
            pan: (0.0, 0.0),
            zoom: 1.0,
        }
    }

    #[must_use]
    /// Current editor contents as outline text.
    pub fn outline_text(&self) -> String {
        self.editor_state
            .lines
            .iter_row()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn notify(&mut self, severity: Severity, text: impl Into<String>) {
        self.message = Some(Message {
            severity,
            text: text.into(),
        });
    }

    /// Parses and lays out the editor contents, then shows the diagram.
    ///
    /// A blank outline leaves the previous diagram in place and raises a warning instead.
    /// Returns whether a new diagram was generated.
    pub fn submit(&mut self) -> bool {
        let tree = parse(&self.outline_text());
        if tree.is_empty() {
            self.notify(Severity::Warning, "Please enter a valid outline.");
            return false;
        }

        let map = layout(&tree, &self.layout_config);
        tracing::info!(nodes = map.nodes.len(), "generated mind map");
        self.notify(
            Severity::Info,
            format!("Generated {} nodes", map.nodes.len()),
        );
        self.layout = Some(map);
        self.reset_view();
        self.current_view = View::Map;
        true
    }

    /// Returns to the outline editor.
    pub fn show_editor(&mut self) {
        self.current_view = View::Editor;
    }

    /// Shows the last diagram, if one has been generated.
    pub fn show_map(&mut self) {
        if self.layout.is_some() {
            self.current_view = View::Map;
        } else {
            self.notify(Severity::Warning, "Nothing generated yet");
        }
    }

    /// Opens the command line, remembering which screen to return to.
    pub fn enter_command(&mut self) {
        if self.current_view != View::Command {
            self.return_view = self.current_view;
        }
        self.current_view = View::Command;
        self.command_buffer.clear();
        self.message = None;
    }

    /// Abandons the command line.
    pub fn cancel_command(&mut self) {
        self.current_view = self.return_view;
        self.command_buffer.clear();
    }

    /// Moves the map view by whole slots, scaled so a step looks the same at any zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let step = self.layout_config.node_spacing_secondary / self.zoom;
        self.pan.0 += dx * step;
        self.pan.1 += dy * step;
    }

    /// Magnifies the map view.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    /// Shrinks the map view.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Re-centers the map view at its original scale.
    pub fn reset_view(&mut self) {
        self.pan = (0.0, 0.0);
        self.zoom = 1.0;
    }

    /// Writes the editor contents back to the file the outline came from.
    ///
    /// Returns whether a file was written; without a source file only a warning is raised.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_outline(&mut self) -> Result<bool> {
        let Some(path) = self.source_path.clone() else {
            self.notify(Severity::Warning, "No file name");
            return Ok(false);
        };
        let mut text = self.outline_text();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        fs::write(&path, text)?;
        tracing::info!(path = %path.display(), "saved outline");
        self.notify(Severity::Info, format!("Saved {}", path.display()));
        Ok(true)
    }

    /// Writes the current diagram as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn export_layout(&mut self, path: &Path) -> Result<()> {
        let Some(map) = &self.layout else {
            self.notify(Severity::Warning, "Nothing to export");
            return Ok(());
        };
        fs::write(path, map.to_json()?)?;
        tracing::info!(path = %path.display(), "exported layout");
        self.notify(Severity::Info, format!("Exported {}", path.display()));
        Ok(())
    }

    /// Shows a configuration problem found before the terminal was taken over.
    pub fn warn_config(&mut self, err: &crate::Error) {
        self.notify(Severity::Warning, format!("Using default settings: {err}"));
    }

    /// Runs the command in the command buffer and returns to the previous screen.
    pub fn run_command(&mut self) -> CommandOutcome {
        let cmd = std::mem::take(&mut self.command_buffer);
        self.current_view = self.return_view;

        let (name, arg) = match cmd.trim().split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (cmd.trim(), None),
        };

        match (name, arg) {
            ("g", None) => {
                self.submit();
            }
            ("m", None) => self.show_map(),
            ("e", None) => self.show_editor(),
            ("w", None) => {
                if let Err(e) = self.save_outline() {
                    self.notify(Severity::Error, format!("Error saving: {e}"));
                }
            }
            ("wq" | "x", None) => match self.save_outline() {
                Ok(true) => return CommandOutcome::Quit,
                Ok(false) => {}
                Err(e) => self.notify(Severity::Error, format!("Error saving: {e}")),
            },
            ("export", Some(path)) if !path.is_empty() => {
                if let Err(e) = self.export_layout(Path::new(path)) {
                    self.notify(Severity::Error, format!("Error exporting: {e}"));
                }
            }
            ("export", _) => self.notify(Severity::Warning, "Usage: export PATH"),
            ("q" | "q!", None) => return CommandOutcome::Quit,
            _ => self.notify(Severity::Warning, format!("Unknown command: {cmd}")),
        }
        CommandOutcome::Continue
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
