//! mindmap: lay out tab-indented outlines as mind map diagrams.
//!
//! [`parser::parse`] turns outline text into an [`outline::OutlineNode`] tree and
//! [`layout::layout`] positions every section and leaf. The [`style`] module fixes how class
//! indices map to shapes and colors, and the remaining modules provide the terminal front
//! end that draws the result.

pub mod app_state;
pub mod config;
pub mod error;
pub mod layout;
pub mod outline;
pub mod parser;
pub mod render;
pub mod style;
pub mod ui;

pub use error::{Error, Result};
