//! Input model: pointer and wheel events, gesture targets, and gesture state.
//!
//! The host translates raw DOM events into these types before handing them to
//! [`crate::engine::EngineCore`]. Each gesture target (the drawing surface and
//! each scrollbar thumb) runs its own copy of the same small state machine:
//! `Idle` until a pointer goes down on it, `Capturing` that pointer until it is
//! released, leaves, or loses capture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::scrollbar::Axis;

/// Browser pointer identifier (`PointerEvent.pointerId`).
pub type PointerId = i32;

/// Element a gesture runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    /// The drawing surface: drag pans, click picks a cell.
    Surface,
    /// A scrollbar thumb: drag scrolls along its axis.
    Scrollbar(Axis),
}

impl GestureTarget {
    /// Every target, in a fixed order.
    pub const ALL: [Self; 3] = [Self::Surface, Self::Scrollbar(Axis::X), Self::Scrollbar(Axis::Y)];
}

/// A pointer event, reduced to what the gesture machines need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: PointerId,
    /// Position relative to the target's top-left corner.
    pub offset: Point,
    /// Movement since the previous event for this pointer.
    pub movement: Point,
}

impl PointerInput {
    /// A stationary event at `offset`.
    #[must_use]
    pub fn at(pointer_id: PointerId, offset: Point) -> Self {
        Self { pointer_id, offset, movement: Point::new(0.0, 0.0) }
    }

    /// A move event carrying `movement`.
    #[must_use]
    pub fn moved(pointer_id: PointerId, offset: Point, movement: Point) -> Self {
        Self { pointer_id, offset, movement }
    }
}

/// How a captured pointer stopped being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// `pointerup`.
    Up,
    /// `pointerout`: the pointer left the target.
    Out,
    /// Capture was taken away (`lostpointercapture`, target removed, teardown).
    Lost,
}

impl Release {
    /// Whether this release completes a gesture, as opposed to aborting it.
    #[must_use]
    pub fn completes(self) -> bool {
        matches!(self, Self::Up | Self::Out)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// Zoom direction for this delta: `-1` zooms out, `1` zooms in, `0` leaves scale alone.
    #[must_use]
    pub fn zoom_steps(self) -> i32 {
        if self.dy > 0.0 {
            -1
        } else if self.dy < 0.0 {
            1
        } else {
            0
        }
    }
}

/// Per-target gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A pointer is captured by this target.
    Capturing {
        /// The captured pointer. Events from other pointers are ignored.
        pointer_id: PointerId,
        /// Whether any nonzero movement was seen since pointer-down.
        moved: bool,
    },
}

impl InputState {
    /// The captured pointer, if any.
    #[must_use]
    pub fn captured(self) -> Option<PointerId> {
        match self {
            Self::Idle => None,
            Self::Capturing { pointer_id, .. } => Some(pointer_id),
        }
    }

    /// Whether `pointer_id` is the captured pointer.
    #[must_use]
    pub fn is_capturing(self, pointer_id: PointerId) -> bool {
        self.captured() == Some(pointer_id)
    }
}
