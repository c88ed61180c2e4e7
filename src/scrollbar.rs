//! Scrollbar geometry derived from the current transform.
//!
//! Thumb sizes and positions are never stored; they are recomputed from a
//! [`Viewport`] whenever the transform changes. Dragging a thumb goes the
//! other way: the pointer movement becomes a candidate [`Transform`] that is
//! handed to the same setter canvas panning uses.

#[cfg(test)]
#[path = "scrollbar_test.rs"]
mod scrollbar_test;

use crate::camera::Transform;
use crate::viewport::Viewport;

/// Scrollbar axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal bar along the bottom edge; drives `translate_x`.
    X,
    /// Vertical bar along the right edge; drives `translate_y`.
    Y,
}

/// One scrollbar thumb, in CSS pixels along its track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    /// Thumb length.
    pub size: f64,
    /// Offset of the thumb's leading edge from the start of the track.
    pub position: f64,
}

/// Both thumbs for one transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    pub horizontal: Thumb,
    pub vertical: Thumb,
}

impl ScrollbarGeometry {
    #[must_use]
    pub fn compute(viewport: &Viewport) -> Self {
        Self { horizontal: thumb(viewport, Axis::X), vertical: thumb(viewport, Axis::Y) }
    }

    #[must_use]
    pub fn thumb(&self, axis: Axis) -> Thumb {
        match axis {
            Axis::X => self.horizontal,
            Axis::Y => self.vertical,
        }
    }
}

/// Surface extent, on-screen grid extent, and translate for one axis.
fn axis_parts(viewport: &Viewport, axis: Axis) -> (f64, f64, f64) {
    let config = viewport.config();
    let transform = viewport.transform();
    match axis {
        Axis::X => (config.surface_width, viewport.inner_width(), transform.translate_x),
        Axis::Y => (config.surface_height, viewport.inner_height(), transform.translate_y),
    }
}

fn thumb(viewport: &Viewport, axis: Axis) -> Thumb {
    let (surface, inner, translate) = axis_parts(viewport, axis);
    let track = surface - viewport.config().scrollbar_margin;
    let scale = viewport.transform().scale;
    Thumb { size: track / inner * surface, position: -translate / inner * track * scale }
}

/// The transform a thumb drag of `movement` pixels along `axis` asks for.
///
/// Moving the thumb forward scrolls the grid backward, proportionally to how
/// much larger the grid is than the surface.
#[must_use]
pub fn thumb_drag(viewport: &Viewport, axis: Axis, movement: f64) -> Transform {
    let (surface, inner, _) = axis_parts(viewport, axis);
    let delta = -(movement * inner / surface) / viewport.transform().scale;
    let current = viewport.transform();
    match axis {
        Axis::X => current.translated(delta, 0.0),
        Axis::Y => current.translated(0.0, delta),
    }
}
