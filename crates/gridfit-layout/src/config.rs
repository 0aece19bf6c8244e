#![forbid(unsafe_code)]

//! Grid and responsive configuration.
//!
//! Every tunable of the engine lives in [`GridConfig`]; the breakpoint and
//! column tables live in [`ResponsiveConfig`]. Both load from TOML or JSON
//! (feature `config-files`) and are validated on load.
//!
//! # Loading
//!
//! ```toml
//! [breakpoints]
//! lg = 1200
//! sm = 768
//!
//! [cols]
//! lg = 12
//! sm = 6
//!
//! [grid]
//! row_height = 40.0
//! margin = [8.0, 8.0]
//! compact_type = "vertical"
//! resize_handles = ["se", "e", "s"]
//! ```
//!
//! ```rust,ignore
//! let config = ResponsiveConfig::from_toml_file("grid.toml")?;
//! let grid = GridConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `GridConfig::default()`: 12 columns, 150px rows, 10px margins, vertical
//! compaction, drag and resize on, south-east handle only, 0.3-cell resize
//! snap. `ResponsiveConfig::default()`: `lg:1200/12, md:996/10, sm:768/6,
//! xs:480/4, xxs:0/2`.

#[cfg(feature = "config-files")]
use std::path::Path;

use gridfit_core::{CompactType, Margin};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::breakpoint::{
    BreakpointTable, BreakpointTracker, ColumnTable, columns_for, default_columns,
};
use crate::cells::CellGeometry;
use crate::interaction::ResizeHandle;

/// Default fraction of a cell the pointer must travel before a resize edge
/// follows to the next cell.
pub const DEFAULT_RESIZE_SNAP_THRESHOLD: f64 = 0.3;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(feature = "config-files")]
fn validated<C>(config: C, errors: Vec<String>) -> Result<C, ConfigError> {
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Validation(errors))
    }
}

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Container-level behavior of one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: u32,
    /// Row height in pixels.
    pub row_height: f64,
    /// `[horizontal, vertical]` gap between cells in pixels.
    pub margin: [f64; 2],
    /// Row cap for drags and resizes; unbounded when `None`.
    pub max_rows: Option<u32>,
    pub compact_type: CompactType,
    pub is_draggable: bool,
    pub is_resizable: bool,
    /// Items may overlap; gestures neither cascade nor compact.
    pub allow_overlap: bool,
    /// Gestures that would overlap another item are refused.
    pub prevent_collision: bool,
    pub resize_handles: Vec<ResizeHandle>,
    pub resize_snap_threshold: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 12,
            row_height: 150.0,
            margin: [10.0, 10.0],
            max_rows: None,
            compact_type: CompactType::Vertical,
            is_draggable: true,
            is_resizable: true,
            allow_overlap: false,
            prevent_collision: false,
            resize_handles: vec![ResizeHandle::SouthEast],
            resize_snap_threshold: DEFAULT_RESIZE_SNAP_THRESHOLD,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn margin(&self) -> Margin {
        Margin::from(self.margin)
    }

    /// Cell geometry for a container `container_width` pixels wide.
    #[must_use]
    pub fn geometry(&self, container_width: f64) -> CellGeometry {
        CellGeometry::new(self.cols, self.row_height, 0.0, container_width)
            .with_margin(self.margin())
    }

    /// Same config with a different column count.
    #[must_use]
    pub fn with_cols(mut self, cols: u32) -> Self {
        self.cols = cols;
        self
    }

    /// Whether `handle` may start a resize.
    #[must_use]
    pub fn handle_enabled(&self, handle: ResizeHandle) -> bool {
        self.resize_handles.contains(&handle)
    }

    /// Validate all parameters. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.cols == 0 {
            errors.push("cols must be >= 1".to_string());
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            errors.push(format!("row_height must be > 0 (got {})", self.row_height));
        }
        for (axis, value) in ["horizontal", "vertical"].iter().zip(self.margin) {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{axis} margin must be >= 0 (got {value})"));
            }
        }
        if self.max_rows == Some(0) {
            errors.push("max_rows must be >= 1 when set".to_string());
        }
        if !(self.resize_snap_threshold > 0.0 && self.resize_snap_threshold < 1.0) {
            errors.push(format!(
                "resize_snap_threshold must be in (0, 1) (got {})",
                self.resize_snap_threshold
            ));
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        let errors = config.validate();
        validated(config, errors)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path.as_ref())?)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        let errors = config.validate();
        validated(config, errors)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path.as_ref())?)
    }
}

// ---------------------------------------------------------------------------
// ResponsiveConfig
// ---------------------------------------------------------------------------

/// Breakpoint table, column table, and the grid settings shared by every
/// breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveConfig {
    pub breakpoints: BreakpointTable,
    pub cols: ColumnTable,
    pub grid: GridConfig,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::default(),
            cols: default_columns(),
            grid: GridConfig::default(),
        }
    }
}

impl ResponsiveConfig {
    /// Column count for `breakpoint` (with default fallbacks).
    #[must_use]
    pub fn cols_for(&self, breakpoint: &str) -> u32 {
        columns_for(breakpoint, &self.cols)
    }

    /// Grid settings specialized to `breakpoint`'s column count.
    #[must_use]
    pub fn grid_for(&self, breakpoint: &str) -> GridConfig {
        self.grid.clone().with_cols(self.cols_for(breakpoint))
    }

    /// A fresh edge-triggered tracker over these tables.
    #[must_use]
    pub fn tracker(&self) -> BreakpointTracker {
        BreakpointTracker::new(self.breakpoints.clone(), self.cols.clone())
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .grid
            .validate()
            .into_iter()
            .map(|e| format!("grid: {e}"))
            .collect();
        for (name, cols) in &self.cols {
            if *cols == 0 {
                errors.push(format!("cols.{name} must be >= 1"));
            }
            if !self.breakpoints.is_empty() && self.breakpoints.threshold(name).is_none() {
                errors.push(format!("cols.{name} has no matching breakpoint"));
            }
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        let errors = config.validate();
        validated(config, errors)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path.as_ref())?)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        let errors = config.validate();
        validated(config, errors)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path.as_ref())?)
    }
}
