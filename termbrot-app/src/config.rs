use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use termbrot_core::{
    Complex, CoreError, FractalMode, IterationLimits, Preset, PresetCatalog, ViewState, Viewport,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] CoreError),
}

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Everything the viewer needs at startup. Every field is optional in the
/// JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    #[serde(default = "default_center_re")]
    pub center_re: f64,
    #[serde(default)]
    pub center_im: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_min_iterations")]
    pub min_iterations: u32,
    #[serde(default = "default_max_iterations_limit")]
    pub max_iterations_limit: u32,
    #[serde(default)]
    pub color_scheme: usize,
    #[serde(default)]
    pub mode: FractalMode,
    /// Replaces the built-in tour when present. An empty list disables
    /// preset navigation.
    #[serde(default)]
    pub presets: Option<Vec<Preset>>,
}

fn default_rows() -> u32 {
    24
}
fn default_cols() -> u32 {
    80
}
fn default_center_re() -> f64 {
    Viewport::DEFAULT_CENTER.re
}
fn default_zoom() -> f64 {
    Viewport::DEFAULT_ZOOM
}
fn default_max_iterations() -> u32 {
    IterationLimits::DEFAULT_ITERATIONS
}
fn default_min_iterations() -> u32 {
    IterationLimits::DEFAULT_MIN
}
fn default_max_iterations_limit() -> u32 {
    IterationLimits::DEFAULT_MAX
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            center_re: default_center_re(),
            center_im: 0.0,
            zoom: default_zoom(),
            max_iterations: default_max_iterations(),
            min_iterations: default_min_iterations(),
            max_iterations_limit: default_max_iterations_limit(),
            color_scheme: 0,
            mode: FractalMode::default(),
            presets: None,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the OS config directory when `None`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate and turn into the initial view state.
    pub fn view_state(&self) -> Result<ViewState, ConfigError> {
        let viewport = Viewport::new(
            Complex::new(self.center_re, self.center_im),
            self.zoom,
            self.rows,
            self.cols,
        )?;
        let limits = IterationLimits::new(self.min_iterations, self.max_iterations_limit)?;
        Ok(ViewState::new(viewport, limits)
            .with_max_iterations(self.max_iterations)
            .with_mode(self.mode)
            .with_color_scheme(self.color_scheme))
    }

    pub fn catalog(&self) -> PresetCatalog {
        match &self.presets {
            Some(presets) => PresetCatalog::new(presets.clone()),
            None => PresetCatalog::builtin(),
        }
    }
}

fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "termbrot")
        .map(|d| d.config_dir().join("config.json"))
        .unwrap_or_else(|| PathBuf::from("termbrot.json"))
}
