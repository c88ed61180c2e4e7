use std::rc::Rc;

use log::{debug, error, warn};
use serde::Serialize;

use crate::camera::{Camera, Point, Transform};
use crate::config::Config;
use crate::consts::ZOOM_STEP;
use crate::grid::{Cell, GridError, GridModel};
use crate::input::{GestureTarget, InputState, PointerId, PointerInput, Release, WheelDelta};
use crate::scrollbar::{self, ScrollbarGeometry};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// A picked cell with the screen anchor an external color editor should use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelSelection {
    pub col_ind: usize,
    pub row_ind: usize,
    pub color: String,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PixelSelection {
    fn new(cell: &Cell, anchor: Point) -> Self {
        Self {
            col_ind: cell.col_ind,
            row_ind: cell.row_ind,
            color: cell.color.clone(),
            offset_x: anchor.x,
            offset_y: anchor.y,
        }
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Take exclusive capture of `pointer_id` on `target`.
    CapturePointer { target: GestureTarget, pointer_id: PointerId },
    /// Give up capture of `pointer_id` on `target`.
    ReleasePointer { target: GestureTarget, pointer_id: PointerId },
    /// A click without movement picked a cell. `editable` reports whether
    /// editing was allowed when it happened.
    PixelSelected { selection: PixelSelection, editable: bool },
    /// The held editable selection was dropped.
    SelectionCleared,
    /// The transform changed; thumbs must be moved to this geometry.
    ScrollbarsChanged(ScrollbarGeometry),
}

/// Core engine state: all logic that doesn't depend on the DOM.
///
/// Separated from the browser host so it can be tested without WASM. Every
/// handler runs to completion and returns the side effects the host must
/// perform, in order.
#[derive(Debug)]
pub struct EngineCore {
    camera: Camera,
    grid: Option<Rc<GridModel>>,
    surface: InputState,
    scroll_x: InputState,
    scroll_y: InputState,
    edit_allowed: bool,
    selection: Option<PixelSelection>,
}

impl EngineCore {
    /// An engine for a validated `config`, with no grid yet and editing allowed.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            camera: Camera::new(config),
            grid: None,
            surface: InputState::Idle,
            scroll_x: InputState::Idle,
            scroll_y: InputState::Idle,
            edit_allowed: true,
            selection: None,
        }
    }

    // --- Data inputs ---

    /// Replace the grid snapshot.
    ///
    /// The snapshot is checked against the config once, here. A mismatched
    /// snapshot is refused and the previous one is dropped too, so the render
    /// loop paints an empty frame instead of indexing out of bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] when the snapshot does not match the config.
    pub fn set_grid(&mut self, grid: Rc<GridModel>) -> Result<(), GridError> {
        if let Err(err) = grid.check_dimensions(self.config()) {
            error!("refusing grid snapshot: {err}");
            self.grid = None;
            return Err(err);
        }
        debug!("grid snapshot accepted ({}x{})", grid.width(), grid.height());
        self.grid = Some(grid);
        Ok(())
    }

    /// Apply a confirmed local edit by swapping in a recolored snapshot.
    ///
    /// A held selection of the same cell picks up the new color.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a cell outside the grid, or
    /// [`GridError::DimensionMismatch`] when no valid grid is loaded.
    pub fn confirm_edit(&mut self, col: usize, row: usize, color: &str) -> Result<(), GridError> {
        let Some(current) = self.grid.as_ref() else {
            let config = self.config();
            return Err(GridError::DimensionMismatch {
                expected_x: config.pixels_amount_x,
                expected_y: config.pixels_amount_y,
                actual_x: 0,
                actual_y: 0,
            });
        };
        let next = current.with_color(col, row, color)?;
        self.grid = Some(Rc::new(next));
        if let Some(sel) = self.selection.as_mut().filter(|s| s.col_ind == col && s.row_ind == row) {
            color.clone_into(&mut sel.color);
        }
        Ok(())
    }

    /// Gate whether picks become editable selections. Disallowing drops the held selection.
    pub fn set_edit_allowed(&mut self, allowed: bool) -> Vec<Action> {
        self.edit_allowed = allowed;
        if allowed { Vec::new() } else { self.clear_selection() }
    }

    /// Drop the held selection (editing finished or cancelled).
    pub fn clear_selection(&mut self) -> Vec<Action> {
        match self.selection.take() {
            Some(_) => vec![Action::SelectionCleared],
            None => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &Config {
        self.camera.config()
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.camera.transform()
    }

    /// A viewport for the current transform.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(*self.config(), self.transform())
    }

    /// Thumb geometry for the current transform.
    #[must_use]
    pub fn scrollbars(&self) -> ScrollbarGeometry {
        ScrollbarGeometry::compute(&self.viewport())
    }

    /// The current grid snapshot, if a valid one is loaded.
    #[must_use]
    pub fn grid(&self) -> Option<&Rc<GridModel>> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn edit_allowed(&self) -> bool {
        self.edit_allowed
    }

    /// The held editable selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&PixelSelection> {
        self.selection.as_ref()
    }

    /// Gesture state of one target.
    #[must_use]
    pub fn input_state(&self, target: GestureTarget) -> InputState {
        match target {
            GestureTarget::Surface => self.surface,
            GestureTarget::Scrollbar(scrollbar::Axis::X) => self.scroll_x,
            GestureTarget::Scrollbar(scrollbar::Axis::Y) => self.scroll_y,
        }
    }

    fn input_state_mut(&mut self, target: GestureTarget) -> &mut InputState {
        match target {
            GestureTarget::Surface => &mut self.surface,
            GestureTarget::Scrollbar(scrollbar::Axis::X) => &mut self.scroll_x,
            GestureTarget::Scrollbar(scrollbar::Axis::Y) => &mut self.scroll_y,
        }
    }

    // --- Transform ---

    /// Route a candidate through the camera and report new thumb geometry if applied.
    fn apply_transform(&mut self, candidate: Transform) -> Vec<Action> {
        let before = self.transform();
        if !self.camera.set_transform(candidate) || self.transform() == before {
            return Vec::new();
        }
        vec![Action::ScrollbarsChanged(self.scrollbars())]
    }

    // --- Input events ---

    /// Pointer went down on `target`: capture it and start a fresh gesture.
    ///
    /// Ignored while the target already holds a capture.
    pub fn on_pointer_down(&mut self, target: GestureTarget, input: PointerInput) -> Vec<Action> {
        let state = self.input_state_mut(target);
        if let Some(held) = state.captured() {
            debug!("{target:?}: pointer {} down ignored, {held} already captured", input.pointer_id);
            return Vec::new();
        }
        *state = InputState::Capturing { pointer_id: input.pointer_id, moved: false };
        vec![Action::CapturePointer { target, pointer_id: input.pointer_id }]
    }

    /// Pointer moved over `target`. Only the captured pointer does anything.
    ///
    /// On the surface, movement pans the grid by `movement / scale`. On a
    /// thumb, it scrolls the grid along the thumb's axis.
    pub fn on_pointer_move(&mut self, target: GestureTarget, input: PointerInput) -> Vec<Action> {
        let state = self.input_state_mut(target);
        let InputState::Capturing { pointer_id, moved } = state else {
            return Vec::new();
        };
        if *pointer_id != input.pointer_id || input.movement.is_zero() {
            return Vec::new();
        }
        *moved = true;

        let viewport = self.viewport();
        let candidate = match target {
            GestureTarget::Surface => {
                let scale = viewport.transform().scale;
                viewport.transform().translated(input.movement.x / scale, input.movement.y / scale)
            }
            GestureTarget::Scrollbar(axis) => {
                let movement = match axis {
                    scrollbar::Axis::X => input.movement.x,
                    scrollbar::Axis::Y => input.movement.y,
                };
                scrollbar::thumb_drag(&viewport, axis, movement)
            }
        };
        self.apply_transform(candidate)
    }

    /// The captured pointer was released from `target`.
    ///
    /// Always ends the gesture and releases capture. A surface gesture that
    /// completed (`Up`/`Out`) without any movement picks the cell under the
    /// release point.
    pub fn on_pointer_release(&mut self, target: GestureTarget, input: PointerInput, release: Release) -> Vec<Action> {
        let state = self.input_state_mut(target);
        let InputState::Capturing { pointer_id, moved } = *state else {
            return Vec::new();
        };
        if pointer_id != input.pointer_id {
            return Vec::new();
        }
        *state = InputState::Idle;

        let mut actions = vec![Action::ReleasePointer { target, pointer_id }];
        if release == Release::Lost {
            warn!("{target:?}: lost capture of pointer {pointer_id}; gesture abandoned");
        }
        if target == GestureTarget::Surface && release.completes() && !moved {
            actions.extend(self.pick(input.offset));
        }
        actions
    }

    /// Wheel over the surface: zoom one octave per notch around `cursor`.
    ///
    /// The translate is adjusted so the grid point under the cursor stays put.
    /// If the new scale is out of range, the whole update is dropped.
    pub fn on_wheel(&mut self, cursor: Point, delta: WheelDelta) -> Vec<Action> {
        let old = self.transform();
        let scale = old.scale * ZOOM_STEP.powi(delta.zoom_steps());
        let candidate = Transform {
            scale,
            translate_x: old.translate_x + cursor.x / scale - cursor.x / old.scale,
            translate_y: old.translate_y + cursor.y / scale - cursor.y / old.scale,
        };
        self.apply_transform(candidate)
    }

    /// Release every held capture with no selection. Called on teardown.
    pub fn release_all(&mut self) -> Vec<Action> {
        GestureTarget::ALL
            .into_iter()
            .filter_map(|target| {
                let state = self.input_state_mut(target);
                let pointer_id = state.captured()?;
                *state = InputState::Idle;
                Some(Action::ReleasePointer { target, pointer_id })
            })
            .collect()
    }

    fn pick(&mut self, at: Point) -> Option<Action> {
        let viewport = self.viewport();
        let coord = viewport.pick_cell(at);
        let cell = self.grid.as_ref()?.cell(coord.col, coord.row)?;
        let selection = PixelSelection::new(cell, viewport.selection_anchor(coord));
        let editable = self.edit_allowed;
        if editable {
            self.selection = Some(selection.clone());
        }
        debug!("picked cell ({}, {}), editable={editable}", coord.col, coord.row);
        Some(Action::PixelSelected { selection, editable })
    }
}
