//! Immutable per-instance engine parameters.
//!
//! A [`Config`] is fixed for the lifetime of a mounted grid. It carries the
//! grid's declared dimensions (which every supplied [`crate::grid::GridModel`]
//! must match), the drawing-surface size, the legal zoom range, and the cell
//! geometry at scale 1. Values are validated once, on construction, so the
//! rest of the engine can divide by them freely.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_GAP_SIZE, DEFAULT_PIXEL_SIZE, DEFAULT_SCALE_MAX, DEFAULT_SCALE_MIN, DEFAULT_SCROLLBAR_MARGIN,
    DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, INITIAL_SCALE,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must have at least one cell on each axis (got {x}x{y})")]
    EmptyGrid { x: usize, y: usize },
    #[error("{field} must be a positive finite number (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("scaleMin {min} exceeds scaleMax {max}")]
    InvertedScaleRange { min: f64, max: f64 },
    #[error("initial scale 1 lies outside [{min}, {max}]")]
    InitialScaleOutOfRange { min: f64, max: f64 },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine parameters, named as the host page supplies them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Grid width in cells.
    pub pixels_amount_x: usize,
    /// Grid height in cells.
    pub pixels_amount_y: usize,
    /// Drawing-surface width in CSS pixels.
    #[serde(rename = "width", alias = "surfaceWidth", default = "default_surface_width")]
    pub surface_width: f64,
    /// Drawing-surface height in CSS pixels.
    #[serde(rename = "height", alias = "surfaceHeight", default = "default_surface_height")]
    pub surface_height: f64,
    #[serde(default = "default_scale_min")]
    pub scale_min: f64,
    #[serde(default = "default_scale_max")]
    pub scale_max: f64,
    /// Cell edge length at scale 1.
    #[serde(default = "default_pixel_size")]
    pub pixel_size: f64,
    /// Space between cells (and around the grid border) at scale 1.
    #[serde(default = "default_gap_size")]
    pub gap_size: f64,
    /// Scrollbar track length lost to insets, subtracted from the surface extent.
    #[serde(default = "default_scrollbar_margin")]
    pub scrollbar_margin: f64,
}

fn default_surface_width() -> f64 {
    DEFAULT_SURFACE_WIDTH
}

fn default_surface_height() -> f64 {
    DEFAULT_SURFACE_HEIGHT
}

fn default_scale_min() -> f64 {
    DEFAULT_SCALE_MIN
}

fn default_scale_max() -> f64 {
    DEFAULT_SCALE_MAX
}

fn default_pixel_size() -> f64 {
    DEFAULT_PIXEL_SIZE
}

fn default_gap_size() -> f64 {
    DEFAULT_GAP_SIZE
}

fn default_scrollbar_margin() -> f64 {
    DEFAULT_SCROLLBAR_MARGIN
}

impl Config {
    /// A config for a `pixels_amount_x` × `pixels_amount_y` grid with default geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] if either dimension is zero.
    pub fn new(pixels_amount_x: usize, pixels_amount_y: usize) -> Result<Self, ConfigError> {
        Self {
            pixels_amount_x,
            pixels_amount_y,
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            scale_min: DEFAULT_SCALE_MIN,
            scale_max: DEFAULT_SCALE_MAX,
            pixel_size: DEFAULT_PIXEL_SIZE,
            gap_size: DEFAULT_GAP_SIZE,
            scrollbar_margin: DEFAULT_SCROLLBAR_MARGIN,
        }
        .validate()
    }

    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input, or any validation error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Check every invariant the engine relies on, returning the config unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.pixels_amount_x == 0 || self.pixels_amount_y == 0 {
            return Err(ConfigError::EmptyGrid { x: self.pixels_amount_x, y: self.pixels_amount_y });
        }
        for (field, value) in [
            ("width", self.surface_width),
            ("height", self.surface_height),
            ("scaleMin", self.scale_min),
            ("scaleMax", self.scale_max),
            ("pixelSize", self.pixel_size),
            ("gapSize", self.gap_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !self.scrollbar_margin.is_finite() || self.scrollbar_margin < 0.0 {
            return Err(ConfigError::NotPositive { field: "scrollbarMargin", value: self.scrollbar_margin });
        }
        if self.scale_min > self.scale_max {
            return Err(ConfigError::InvertedScaleRange { min: self.scale_min, max: self.scale_max });
        }
        if !self.scale_contains(INITIAL_SCALE) {
            return Err(ConfigError::InitialScaleOutOfRange { min: self.scale_min, max: self.scale_max });
        }
        Ok(self)
    }

    /// Whether `scale` lies in the legal zoom range. NaN never does.
    #[must_use]
    pub fn scale_contains(&self, scale: f64) -> bool {
        (self.scale_min..=self.scale_max).contains(&scale)
    }

    /// Unscaled grid width: every cell plus a gap before each and one trailing gap.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_width(&self) -> f64 {
        self.pixels_amount_x as f64 * self.cell_stride() + self.gap_size
    }

    /// Unscaled grid height.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_height(&self) -> f64 {
        self.pixels_amount_y as f64 * self.cell_stride() + self.gap_size
    }

    /// Distance between neighbouring cell origins at scale 1.
    #[must_use]
    pub fn cell_stride(&self) -> f64 {
        self.pixel_size + self.gap_size
    }
}
