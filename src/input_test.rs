use super::*;

// =============================================================
// GestureTarget
// =============================================================

#[test]
fn all_targets_are_distinct() {
    let all = GestureTarget::ALL;
    for (i, a) in all.iter().enumerate() {
        for (j, b) in all.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn target_debug_format() {
    assert_eq!(format!("{:?}", GestureTarget::Surface), "Surface");
    assert_eq!(format!("{:?}", GestureTarget::Scrollbar(Axis::Y)), "Scrollbar(Y)");
}

// =============================================================
// PointerInput
// =============================================================

#[test]
fn at_has_no_movement() {
    let ev = PointerInput::at(3, Point::new(10.0, 20.0));
    assert_eq!(ev.pointer_id, 3);
    assert!(ev.movement.is_zero());
}

#[test]
fn moved_keeps_movement() {
    let ev = PointerInput::moved(1, Point::new(0.0, 0.0), Point::new(-2.0, 0.5));
    assert_eq!(ev.movement, Point::new(-2.0, 0.5));
}

// =============================================================
// Release
// =============================================================

#[test]
fn up_and_out_complete() {
    assert!(Release::Up.completes());
    assert!(Release::Out.completes());
    assert!(!Release::Lost.completes());
}

// =============================================================
// WheelDelta
// =============================================================

#[test]
fn wheel_down_zooms_out() {
    assert_eq!(WheelDelta { dx: 0.0, dy: 120.0 }.zoom_steps(), -1);
    assert_eq!(WheelDelta { dx: 0.0, dy: 0.01 }.zoom_steps(), -1);
}

#[test]
fn wheel_up_zooms_in() {
    assert_eq!(WheelDelta { dx: 0.0, dy: -3.0 }.zoom_steps(), 1);
}

#[test]
fn wheel_without_vertical_delta_keeps_scale() {
    assert_eq!(WheelDelta { dx: 40.0, dy: 0.0 }.zoom_steps(), 0);
    assert_eq!(WheelDelta { dx: 0.0, dy: -0.0 }.zoom_steps(), 0);
    assert_eq!(WheelDelta { dx: 0.0, dy: f64::NAN }.zoom_steps(), 0);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert_eq!(InputState::Idle.captured(), None);
}

#[test]
fn capturing_reports_its_pointer() {
    let state = InputState::Capturing { pointer_id: 7, moved: false };
    assert_eq!(state.captured(), Some(7));
    assert!(state.is_capturing(7));
    assert!(!state.is_capturing(8));
}

#[test]
fn idle_captures_nothing() {
    assert!(!InputState::Idle.is_capturing(0));
}
