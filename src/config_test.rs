#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_uses_default_geometry() {
    let config = Config::new(10, 20).unwrap();
    assert_eq!(config.pixels_amount_x, 10);
    assert_eq!(config.pixels_amount_y, 20);
    assert_eq!(config.surface_width, 800.0);
    assert_eq!(config.surface_height, 800.0);
    assert_eq!(config.scale_min, 0.25);
    assert_eq!(config.scale_max, 8.0);
    assert_eq!(config.pixel_size, 16.0);
    assert_eq!(config.gap_size, 1.0);
    assert_eq!(config.scrollbar_margin, 6.0);
}

#[test]
fn grid_extent_counts_trailing_gap() {
    let config = Config::new(10, 4).unwrap();
    assert_eq!(config.grid_width(), 171.0);
    assert_eq!(config.grid_height(), 69.0);
    assert_eq!(config.cell_stride(), 17.0);
}

#[test]
fn scale_contains_is_inclusive() {
    let config = Config::new(1, 1).unwrap();
    assert!(config.scale_contains(0.25));
    assert!(config.scale_contains(8.0));
    assert!(!config.scale_contains(0.125));
    assert!(!config.scale_contains(16.0));
    assert!(!config.scale_contains(f64::NAN));
}

// =============================================================
// Validation
// =============================================================

#[test]
fn zero_width_grid_is_rejected() {
    assert!(matches!(Config::new(0, 5), Err(ConfigError::EmptyGrid { x: 0, y: 5 })));
}

#[test]
fn non_positive_pixel_size_is_rejected() {
    let mut config = Config::new(3, 3).unwrap();
    config.pixel_size = 0.0;
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "pixelSize", .. }));
}

#[test]
fn non_finite_surface_is_rejected() {
    let mut config = Config::new(3, 3).unwrap();
    config.surface_height = f64::INFINITY;
    assert!(matches!(config.validate(), Err(ConfigError::NotPositive { field: "height", .. })));
}

#[test]
fn negative_scrollbar_margin_is_rejected() {
    let mut config = Config::new(3, 3).unwrap();
    config.scrollbar_margin = -1.0;
    assert!(matches!(config.validate(), Err(ConfigError::NotPositive { field: "scrollbarMargin", .. })));
}

#[test]
fn zero_scrollbar_margin_is_allowed() {
    let mut config = Config::new(3, 3).unwrap();
    config.scrollbar_margin = 0.0;
    assert!(config.validate().is_ok());
}

#[test]
fn inverted_scale_range_is_rejected() {
    let mut config = Config::new(3, 3).unwrap();
    config.scale_min = 4.0;
    config.scale_max = 2.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvertedScaleRange { .. })));
}

#[test]
fn range_excluding_initial_scale_is_rejected() {
    let mut config = Config::new(3, 3).unwrap();
    config.scale_min = 2.0;
    config.scale_max = 4.0;
    assert!(matches!(config.validate(), Err(ConfigError::InitialScaleOutOfRange { .. })));
}

#[test]
fn error_messages_name_the_field() {
    let mut config = Config::new(3, 3).unwrap();
    config.gap_size = -2.0;
    let msg = config.validate().unwrap_err().to_string();
    assert!(msg.contains("gapSize"));
    assert!(msg.contains("-2"));
}

// =============================================================
// JSON
// =============================================================

#[test]
fn from_json_fills_defaults() {
    let config = Config::from_json(r#"{ "pixelsAmountX": 64, "pixelsAmountY": 32 }"#).unwrap();
    assert_eq!(config.pixels_amount_x, 64);
    assert_eq!(config.pixels_amount_y, 32);
    assert_eq!(config.surface_width, 800.0);
    assert_eq!(config.pixel_size, 16.0);
}

#[test]
fn from_json_reads_overrides() {
    let raw = r#"{
        "pixelsAmountX": 8,
        "pixelsAmountY": 8,
        "width": 400,
        "height": 300,
        "scaleMin": 0.5,
        "scaleMax": 4,
        "pixelSize": 10,
        "gapSize": 2,
        "scrollbarMargin": 0
    }"#;
    let config = Config::from_json(raw).unwrap();
    assert_eq!(config.surface_width, 400.0);
    assert_eq!(config.surface_height, 300.0);
    assert_eq!(config.scale_min, 0.5);
    assert_eq!(config.scale_max, 4.0);
    assert_eq!(config.pixel_size, 10.0);
    assert_eq!(config.gap_size, 2.0);
    assert_eq!(config.scrollbar_margin, 0.0);
}

#[test]
fn from_json_accepts_surface_aliases() {
    let raw = r#"{ "pixelsAmountX": 2, "pixelsAmountY": 2, "surfaceWidth": 320, "surfaceHeight": 240 }"#;
    let config = Config::from_json(raw).unwrap();
    assert_eq!(config.surface_width, 320.0);
    assert_eq!(config.surface_height, 240.0);
}

#[test]
fn from_json_requires_dimensions() {
    assert!(matches!(Config::from_json(r#"{ "pixelsAmountX": 2 }"#), Err(ConfigError::Json(_))));
}

#[test]
fn from_json_validates() {
    let raw = r#"{ "pixelsAmountX": 2, "pixelsAmountY": 2, "scaleMin": 3, "scaleMax": 1 }"#;
    assert!(matches!(Config::from_json(raw), Err(ConfigError::InvertedScaleRange { .. })));
}

#[test]
fn serializes_with_host_field_names() {
    let config = Config::new(5, 6).unwrap();
    let value = serde_json::to_value(config).unwrap();
    assert_eq!(value["pixelsAmountX"], 5);
    assert_eq!(value["pixelsAmountY"], 6);
    assert_eq!(value["width"], 800.0);
    assert_eq!(value["scaleMax"], 8.0);
}
