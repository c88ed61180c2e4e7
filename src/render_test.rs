#![allow(clippy::float_cmp)]

use std::rc::Rc;

use super::*;
use crate::camera::Point;
use crate::config::Config;
use crate::input::{GestureTarget, PointerInput, WheelDelta};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear { width: f64, height: f64, color: String },
    Fill { x: f64, y: f64, size: f64, color: String },
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Surface for Recorder {
    fn clear(&mut self, width: f64, height: f64, color: &str) {
        self.ops.push(Op::Clear { width, height, color: color.to_owned() });
    }

    fn fill_cell(&mut self, x: f64, y: f64, size: f64, color: &str) {
        self.ops.push(Op::Fill { x, y, size, color: color.to_owned() });
    }
}

impl Recorder {
    fn fills(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Fill { .. })).collect()
    }
}

fn grid(width: usize, height: usize) -> Rc<GridModel> {
    let colors = (0..height)
        .map(|row| (0..width).map(|col| format!("{col}:{row}")).collect())
        .collect();
    Rc::new(GridModel::from_colors(colors).unwrap())
}

fn engine(cells: usize) -> EngineCore {
    let mut core = EngineCore::new(Config::new(cells, cells).unwrap());
    core.set_grid(grid(cells, cells)).unwrap();
    core
}

// =============================================================
// Frame structure
// =============================================================

#[test]
fn frame_starts_with_clear() {
    let mut rec = Recorder::default();
    draw(&mut rec, &engine(3));
    assert_eq!(rec.ops[0], Op::Clear { width: 800.0, height: 800.0, color: "#000000".to_owned() });
    assert_eq!(rec.ops.iter().filter(|op| matches!(op, Op::Clear { .. })).count(), 1);
}

#[test]
fn small_grid_is_drawn_whole() {
    let mut rec = Recorder::default();
    let stats = draw(&mut rec, &engine(10));
    assert_eq!(stats, FrameStats { cells: 100, has_grid: true });
    assert_eq!(rec.fills().len(), 100);
}

#[test]
fn cells_land_at_screen_positions() {
    let mut rec = Recorder::default();
    draw(&mut rec, &engine(2));
    assert_eq!(rec.ops[1], Op::Fill { x: 1.0, y: 1.0, size: 16.0, color: "0:0".to_owned() });
    assert_eq!(rec.ops[2], Op::Fill { x: 18.0, y: 1.0, size: 16.0, color: "1:0".to_owned() });
    assert_eq!(rec.ops[3], Op::Fill { x: 1.0, y: 18.0, size: 16.0, color: "0:1".to_owned() });
}

#[test]
fn missing_grid_draws_empty_frame() {
    let core = EngineCore::new(Config::new(4, 4).unwrap());
    let mut rec = Recorder::default();
    let stats = draw(&mut rec, &core);
    assert_eq!(stats, FrameStats::default());
    assert_eq!(rec.ops.len(), 1);
}

#[test]
fn rejected_grid_draws_empty_frame() {
    let mut core = engine(4);
    assert!(core.set_grid(grid(4, 5)).is_err());
    let mut rec = Recorder::default();
    assert!(!draw(&mut rec, &core).has_grid);
    assert!(rec.fills().is_empty());
}

// =============================================================
// Culling
// =============================================================

#[test]
fn large_grid_draws_only_visible_window() {
    let mut rec = Recorder::default();
    let stats = draw(&mut rec, &engine(1000));
    // 49 x 49 window out of a million cells.
    assert_eq!(stats.cells, 49 * 49);
}

#[test]
fn culled_cells_follow_pan() {
    let mut core = engine(1000);
    core.on_pointer_down(GestureTarget::Surface, PointerInput::at(1, Point::new(0.0, 0.0)));
    core.on_pointer_move(
        GestureTarget::Surface,
        PointerInput::moved(1, Point::new(0.0, 0.0), Point::new(-170.0, -340.0)),
    );
    let mut rec = Recorder::default();
    draw(&mut rec, &core);
    let Op::Fill { x, y, color, .. } = &rec.ops[1] else {
        panic!("expected a fill after clear");
    };
    assert_eq!(color, "10:20");
    assert_eq!(*x, 1.0);
    assert_eq!(*y, 1.0);
}

#[test]
fn every_drawn_cell_touches_the_surface_band() {
    let mut core = engine(500);
    core.on_wheel(Point::new(300.0, 500.0), WheelDelta { dx: 0.0, dy: -1.0 });
    let mut rec = Recorder::default();
    draw(&mut rec, &core);
    let pitch = core.viewport().cell_pitch();
    for op in rec.fills() {
        let Op::Fill { x, y, .. } = op else { continue };
        assert!(*x > -pitch && *x < 800.0 + pitch, "x {x} far off-surface");
        assert!(*y > -pitch && *y < 800.0 + pitch, "y {y} far off-surface");
    }
}

#[test]
fn zoomed_out_window_is_clipped_to_grid() {
    let mut core = engine(100);
    core.on_wheel(Point::new(0.0, 0.0), WheelDelta { dx: 0.0, dy: 1.0 });
    core.on_wheel(Point::new(0.0, 0.0), WheelDelta { dx: 0.0, dy: 1.0 });
    let mut rec = Recorder::default();
    let stats = draw(&mut rec, &core);
    assert_eq!(stats.cells, 100 * 100);
}

#[test]
fn cell_size_follows_scale() {
    let mut core = engine(10);
    core.on_wheel(Point::new(0.0, 0.0), WheelDelta { dx: 0.0, dy: -1.0 });
    let mut rec = Recorder::default();
    draw(&mut rec, &core);
    let Op::Fill { size, .. } = &rec.ops[1] else {
        panic!("expected a fill after clear");
    };
    assert_eq!(*size, 32.0);
}

#[test]
fn new_grid_reference_is_painted_next_frame() {
    let mut core = engine(2);
    let mut rec = Recorder::default();
    draw(&mut rec, &core);
    core.confirm_edit(0, 0, "fresh").unwrap();
    let mut next = Recorder::default();
    draw(&mut next, &core);
    assert_eq!(next.ops[1], Op::Fill { x: 1.0, y: 1.0, size: 16.0, color: "fresh".to_owned() });
}
