//! Shared numeric constants for the pixel grid engine.

// ── Defaults ────────────────────────────────────────────────────

/// Default drawing-surface width in CSS pixels.
pub const DEFAULT_SURFACE_WIDTH: f64 = 800.0;

/// Default drawing-surface height in CSS pixels.
pub const DEFAULT_SURFACE_HEIGHT: f64 = 800.0;

/// Smallest zoom scale a wheel gesture may reach.
pub const DEFAULT_SCALE_MIN: f64 = 0.25;

/// Largest zoom scale a wheel gesture may reach.
pub const DEFAULT_SCALE_MAX: f64 = 8.0;

/// Edge length of one cell at scale 1, in pixels.
pub const DEFAULT_PIXEL_SIZE: f64 = 16.0;

/// Gap between neighbouring cells at scale 1, in pixels.
pub const DEFAULT_GAP_SIZE: f64 = 1.0;

// ── Scrollbars ──────────────────────────────────────────────────

/// Inset of each scrollbar from the surface edges.
pub const SCROLLBAR_INSET_PX: f64 = 3.0;

/// Track length lost to the insets on both ends.
pub const DEFAULT_SCROLLBAR_MARGIN: f64 = SCROLLBAR_INSET_PX * 2.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Scale factor applied per wheel notch (one octave).
pub const ZOOM_STEP: f64 = 2.0;

/// Scale every transform starts at.
pub const INITIAL_SCALE: f64 = 1.0;

// ── Rendering ───────────────────────────────────────────────────

/// Fill used to clear the surface before each frame.
pub const BACKGROUND_COLOR: &str = "#000000";
