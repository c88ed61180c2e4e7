//! Transform state: the scale and pan that map grid space onto the surface.
//!
//! [`Transform`] is a plain value. [`Camera`] owns the live transform and
//! is the only place it can change: [`Camera::set_transform`] validates a
//! whole candidate triple and either stores it or leaves the previous one in
//! place. There are no per-field setters, so no caller can observe a scale
//! paired with a translate that was bounded against a different scale.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use log::debug;

use crate::config::Config;
use crate::consts::INITIAL_SCALE;

/// A point in screen space (CSS pixels relative to the surface's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether this is exactly the origin. Any nonzero component counts as movement.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Scale and pan of the grid.
///
/// `translate_x` / `translate_y` are in unscaled grid units and are never
/// positive; the on-screen offset of the grid origin is `translate * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { scale: INITIAL_SCALE, translate_x: 0.0, translate_y: 0.0 }
    }
}

impl Transform {
    #[must_use]
    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self { scale, translate_x, translate_y }
    }

    /// The same scale with the translate moved by `(dx, dy)` grid units.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { translate_x: self.translate_x + dx, translate_y: self.translate_y + dy, ..self }
    }
}

/// Legal range for one translate axis at a given scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateBounds {
    pub min: f64,
    pub max: f64,
}

impl TranslateBounds {
    /// Bounds for a grid of unscaled `extent` viewed through `surface` pixels at `scale`.
    ///
    /// When the grid is narrower than the visible span, `min` is positive and
    /// [`TranslateBounds::clamp`] pins the axis to 0.
    #[must_use]
    pub fn for_axis(extent: f64, surface: f64, scale: f64) -> Self {
        Self { min: -(extent - surface / scale), max: 0.0 }
    }

    /// Clamp `value` into the bounds; the upper bound wins if they cross.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.clamp(value) == value
    }
}

/// Owner of the live [`Transform`], bounded by a [`Config`].
#[derive(Debug, Clone)]
pub struct Camera {
    config: Config,
    transform: Transform,
}

impl Camera {
    /// A camera at the initial transform (scale 1, no pan).
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, transform: Transform::default() }
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Horizontal translate bounds at `scale`.
    #[must_use]
    pub fn bounds_x(&self, scale: f64) -> TranslateBounds {
        TranslateBounds::for_axis(self.config.grid_width(), self.config.surface_width, scale)
    }

    /// Vertical translate bounds at `scale`.
    #[must_use]
    pub fn bounds_y(&self, scale: f64) -> TranslateBounds {
        TranslateBounds::for_axis(self.config.grid_height(), self.config.surface_height, scale)
    }

    /// Replace the transform with `candidate`, clamping its translate to the bounds for its scale.
    ///
    /// A candidate whose scale is outside the configured range is dropped whole,
    /// translate included, and the previous transform is kept. Returns whether
    /// the candidate was applied.
    pub fn set_transform(&mut self, candidate: Transform) -> bool {
        let scale = candidate.scale;
        if !self.config.scale_contains(scale) {
            debug!("rejected transform: scale {scale} outside [{}, {}]", self.config.scale_min, self.config.scale_max);
            return false;
        }
        self.transform = Transform {
            scale,
            translate_x: self.bounds_x(scale).clamp(candidate.translate_x),
            translate_y: self.bounds_y(scale).clamp(candidate.translate_y),
        };
        true
    }
}
