//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a mindmap.toml, and if present we load settings from there.
//! This provides layout spacing, orientation, style class counts and logging preferences.

use crate::error::{Error, Result};
use crate::layout::{LayoutConfig, Orientation};
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no explicit path is given.
pub const CONFIG_FILE: &str = "mindmap.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from mindmap.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "vertical".to_string())]
    /// Direction in which depth grows: "horizontal" or "vertical".
    pub orientation: String,
    #[facet(default = 3.0)]
    /// Gap between depth levels.
    pub node_spacing_primary: f64,
    #[facet(default = 5.0)]
    /// Gap between neighbouring siblings.
    pub node_spacing_secondary: f64,
    #[facet(default = 3)]
    /// Number of distinct node shapes before the last one is reused.
    pub shape_count: usize,
    #[facet(default = 3)]
    /// Number of distinct node colors before the last one is reused.
    pub color_count: usize,
    #[facet(default = 2.0)]
    /// Base size of a section shape; leaves are drawn smaller.
    pub node_size: f64,
    #[facet(default = String::new())]
    /// File that receives log output (empty disables file logging).
    pub log_file: String,
    #[facet(default = "info".to_string())]
    /// Tracing filter directives, e.g. `mindmap=debug`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical.to_string(),
            node_spacing_primary: crate::layout::DEFAULT_SPACING_PRIMARY,
            node_spacing_secondary: crate::layout::DEFAULT_SPACING_SECONDARY,
            shape_count: crate::layout::DEFAULT_CLASS_COUNT,
            color_count: crate::layout::DEFAULT_CLASS_COUNT,
            node_size: 2.0,
            log_file: String::new(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from mindmap.toml in the working directory if present.
    ///
    /// A file that exists but cannot be loaded yields the defaults together with the error,
    /// so the caller can report it once logging is set up.
    pub fn load() -> (Self, Option<Error>) {
        Self::load_in(Path::new("."))
    }

    #[must_use]
    /// Load configuration from mindmap.toml in `dir` if present, as for [`Config::load`].
    pub fn load_in(dir: &Path) -> (Self, Option<Error>) {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Decode configuration from TOML text; absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not decode into a configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Orientation named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is neither horizontal nor vertical.
    pub fn orientation(&self) -> Result<Orientation> {
        self.orientation.parse()
    }

    #[must_use]
    /// Layout parameters, falling back to vertical for an unknown orientation name.
    pub fn layout_config(&self) -> LayoutConfig {
        let orientation = self.orientation().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to vertical layout");
            Orientation::Vertical
        });
        LayoutConfig {
            orientation,
            node_spacing_primary: self.node_spacing_primary,
            node_spacing_secondary: self.node_spacing_secondary,
            shape_count: self.shape_count,
            color_count: self.color_count,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
