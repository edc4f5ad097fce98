//! Host-side failures.
//!
//! Parsing and layout are total and never produce these. They come from reading outlines,
//! loading configuration, exporting layouts and driving the terminal.

use std::io;

#[derive(Debug, thiserror::Error)]
/// Everything that can go wrong around the parse/layout core.
pub enum Error {
    /// Reading or writing a file, or talking to the terminal, failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// Layout export could not be serialised.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration file exists but could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// An orientation name other than horizontal or vertical.
    #[error("unknown orientation `{0}` (expected horizontal or vertical)")]
    InvalidOrientation(String),
}

/// Result alias for host-side operations.
pub type Result<T> = std::result::Result<T, Error>;
