//! Viewport math: conversions between screen space and grid cells.
//!
//! Everything here is a pure function of a [`Config`] and a [`Transform`].
//! A [`Viewport`] is a copy of both, taken once, so a caller that builds one
//! at the start of a frame or gesture sees a single consistent transform for
//! all of its computations.
//!
//! Two extents appear below. The *grid* extent ([`Config::grid_width`]) is
//! unscaled and bounds the translate. The *inner* extent is the same length at
//! the current scale, i.e. the on-screen size of the whole grid, and drives
//! scrollbar proportions.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::ops::Range;

use crate::camera::{Point, Transform};
use crate::config::Config;

/// Integer cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub col: usize,
    pub row: usize,
}

impl CellCoord {
    #[must_use]
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// The window of cells that can intersect the surface for one transform.
///
/// Offsets are the first visible column/row; counts include one extra cell
/// per axis to cover a partially visible trailing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    pub col_offset: usize,
    pub row_offset: usize,
    pub col_count: usize,
    pub row_count: usize,
}

impl VisibleWindow {
    /// Visible column indices, clipped to a grid `width` cells wide.
    #[must_use]
    pub fn cols(&self, width: usize) -> Range<usize> {
        clip(self.col_offset, self.col_count, width)
    }

    /// Visible row indices, clipped to a grid `height` cells tall.
    #[must_use]
    pub fn rows(&self, height: usize) -> Range<usize> {
        clip(self.row_offset, self.row_count, height)
    }
}

fn clip(offset: usize, count: usize, len: usize) -> Range<usize> {
    let start = offset.min(len);
    let end = offset.saturating_add(count).min(len);
    start..end
}

/// Floor of a non-negative float as an index; negatives and non-finite values map to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_index(value: f64) -> usize {
    if value.is_finite() && value > 0.0 { value.floor() as usize } else { 0 }
}

/// Nearest cell index on one axis, clamped into `[0, count - 1]`.
#[allow(clippy::cast_precision_loss)]
fn clamp_index(value: f64, count: usize) -> usize {
    let last = count.saturating_sub(1);
    if value.is_nan() {
        return 0;
    }
    floor_index(value.floor().min(last as f64))
}

/// Screen/grid conversions for one fixed transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    config: Config,
    transform: Transform,
}

impl Viewport {
    #[must_use]
    pub fn new(config: Config, transform: Transform) -> Self {
        Self { config, transform }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// On-screen edge length of a cell.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.config.pixel_size * self.transform.scale
    }

    /// On-screen gap between cells.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.config.gap_size * self.transform.scale
    }

    /// On-screen distance between adjacent cell origins.
    #[must_use]
    pub fn cell_pitch(&self) -> f64 {
        self.config.cell_stride() * self.transform.scale
    }

    /// On-screen width of the whole grid at the current scale.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.config.grid_width() * self.transform.scale
    }

    /// On-screen height of the whole grid at the current scale.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.config.grid_height() * self.transform.scale
    }

    /// Screen-space offset of the grid origin (translate in screen pixels).
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.transform.translate_x * self.transform.scale, self.transform.translate_y * self.transform.scale)
    }

    /// The cell window that can be visible on the surface.
    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow {
        let pitch = self.cell_pitch();
        let origin = self.origin();
        VisibleWindow {
            col_offset: floor_index(-origin.x / pitch),
            row_offset: floor_index(-origin.y / pitch),
            col_count: floor_index((self.config.surface_width / pitch).ceil()) + 1,
            row_count: floor_index((self.config.surface_height / pitch).ceil()) + 1,
        }
    }

    /// Screen x of the left edge of column `col`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn screen_x_of(&self, col: usize) -> f64 {
        self.origin().x + col as f64 * self.cell_pitch() + self.gap()
    }

    /// Screen y of the top edge of row `row`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn screen_y_of(&self, row: usize) -> f64 {
        self.origin().y + row as f64 * self.cell_pitch() + self.gap()
    }

    /// The cell under a screen point, clamped to the grid.
    ///
    /// Gap boundaries are split down the middle, so a point in a gap resolves
    /// to the nearer cell. Points beyond the grid resolve to the edge cell.
    #[must_use]
    pub fn pick_cell(&self, screen: Point) -> CellCoord {
        let pitch = self.cell_pitch();
        let half_gap = self.gap() / 2.0;
        let origin = self.origin();
        CellCoord {
            col: clamp_index((-origin.x + screen.x - half_gap) / pitch, self.config.pixels_amount_x),
            row: clamp_index((-origin.y + screen.y - half_gap) / pitch, self.config.pixels_amount_y),
        }
    }

    /// Where an editor for `cell` should be anchored: the cell's left edge,
    /// kept on the surface, and its bottom edge, capped at the surface bottom.
    #[must_use]
    pub fn selection_anchor(&self, cell: CellCoord) -> Point {
        Point::new(
            self.screen_x_of(cell.col).clamp(0.0, self.config.surface_width),
            (self.screen_y_of(cell.row) + self.cell_size()).min(self.config.surface_height),
        )
    }
}
