//! Zoomable, pannable pixel-grid viewer for the browser.
//!
//! This crate is compiled to WebAssembly and draws a fixed-size grid of
//! colored cells onto a canvas. It owns the camera (pan and zoom within
//! bounds), the two custom scrollbars, viewport culling, and cell picking.
//! Color editing itself happens outside: a pick hands the host a
//! [`engine::PixelSelection`] anchored in screen space, and the host reports
//! confirmed edits back through [`host::PixelGridView`].
//!
//! Everything except [`dom`] and [`host`] is plain Rust and is tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`]: gesture handling and actions |
//! | [`camera`] | Transform, translate bounds, and the clamping camera |
//! | [`viewport`] | Screen geometry: culling window, picking, selection anchor |
//! | [`scrollbar`] | Thumb geometry and thumb-drag translation |
//! | [`input`] | Pointer and wheel input types, per-target gesture state |
//! | [`grid`] | Immutable grid of colored cells |
//! | [`config`] | Validated view configuration |
//! | [`render`] | Frame painting against the [`render::Surface`] trait |
//! | [`scheduler`] | Self-rescheduling render loop |
//! | [`dom`] | Browser listeners, pointer capture, animation frames, canvas |
//! | [`host`] | JavaScript-facing [`host::PixelGridView`] |
//! | [`consts`] | Shared defaults (surface size, zoom limits, cell metrics) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod dom;
pub mod engine;
pub mod grid;
pub mod host;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod scrollbar;
pub mod viewport;
