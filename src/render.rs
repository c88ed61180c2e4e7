//! Rendering: paints one frame of the grid onto a drawing surface.
//!
//! Painting is expressed against the [`Surface`] trait so the same culling
//! logic drives the browser canvas ([`crate::dom::CanvasSurface`]) and the
//! recording surface used in tests. This module reads engine state and
//! produces draw calls; it never mutates application state.
//!
//! Work per frame is proportional to the visible window, not the grid: rows
//! and columns outside [`crate::viewport::VisibleWindow`] are never visited.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::BACKGROUND_COLOR;
use crate::engine::EngineCore;
use crate::grid::GridModel;
use crate::viewport::Viewport;

/// A 2D target the renderer can fill.
pub trait Surface {
    /// Fill the whole `width` × `height` area with `color`.
    fn clear(&mut self, width: f64, height: f64, color: &str);

    /// Fill an axis-aligned square of edge `size` at `(x, y)` with `color`.
    fn fill_cell(&mut self, x: f64, y: f64, size: f64, color: &str);
}

/// Counters for one painted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Cells drawn this frame.
    pub cells: usize,
    /// Whether a grid was available to draw.
    pub has_grid: bool,
}

/// Paint the engine's current state.
///
/// The transform and grid reference are read once, up front, and used for the
/// whole frame. Without a valid grid the frame is cleared and left empty.
pub fn draw(surface: &mut impl Surface, core: &EngineCore) -> FrameStats {
    let viewport = core.viewport();
    match core.grid() {
        Some(grid) => draw_grid(surface, &viewport, grid),
        None => {
            clear(surface, &viewport);
            FrameStats::default()
        }
    }
}

/// Clear the surface, then paint the cells of `grid` inside the visible window.
pub fn draw_grid(surface: &mut impl Surface, viewport: &Viewport, grid: &GridModel) -> FrameStats {
    clear(surface, viewport);

    let window = viewport.visible_window();
    let size = viewport.cell_size();
    let mut cells = 0;
    let rows = grid.rows().get(window.rows(grid.height())).unwrap_or_default();
    for row in rows {
        for cell in row.get(window.cols(grid.width())).unwrap_or_default() {
            surface.fill_cell(viewport.screen_x_of(cell.col_ind), viewport.screen_y_of(cell.row_ind), size, &cell.color);
            cells += 1;
        }
    }
    FrameStats { cells, has_grid: true }
}

fn clear(surface: &mut impl Surface, viewport: &Viewport) {
    let config = viewport.config();
    surface.clear(config.surface_width, config.surface_height, BACKGROUND_COLOR);
}
