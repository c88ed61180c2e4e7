//! The JavaScript-facing view: mounts the engine on a wrapper element, a
//! canvas, and two scrollbar thumbs.
//!
//! [`PixelGridView`] owns every listener, pointer capture, and the render loop
//! for one mounted grid. The host JavaScript layer passes in the elements and
//! an `onSelect` callback, pushes grids and edit results in, and calls
//! `free()` (or [`PixelGridView::unmount`]) when the component goes away.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlCanvasElement, HtmlElement, PointerEvent, WheelEvent};

use crate::camera::Point;
use crate::config::Config;
use crate::dom::{AnimationFrameScheduler, CanvasSurface, EventListener, PointerCapture};
use crate::engine::{Action, EngineCore, PixelSelection};
use crate::grid::GridModel;
use crate::input::{GestureTarget, PointerInput, Release, WheelDelta};
use crate::render;
use crate::scheduler::RenderLoop;
use crate::scrollbar::{Axis, ScrollbarGeometry};

/// Install the panic hook and route `log` output to the browser console.
///
/// # Errors
///
/// Returns an error if a logger was already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).map_err(js_error)
}

/// Which phase of a pointer gesture a DOM event stands for.
#[derive(Debug, Clone, Copy)]
enum Phase {
    Down,
    Move,
    End(Release),
}

const POINTER_EVENTS: [(&str, Phase); 5] = [
    ("pointerdown", Phase::Down),
    ("pointermove", Phase::Move),
    ("pointerup", Phase::End(Release::Up)),
    ("pointerout", Phase::End(Release::Out)),
    ("lostpointercapture", Phase::End(Release::Lost)),
];

struct HostState {
    core: EngineCore,
    surface: HtmlCanvasElement,
    scroll_x: HtmlElement,
    scroll_y: HtmlElement,
    captures: HashMap<GestureTarget, PointerCapture>,
    on_select: js_sys::Function,
}

impl HostState {
    fn element(&self, target: GestureTarget) -> &Element {
        match target {
            GestureTarget::Surface => &self.surface,
            GestureTarget::Scrollbar(Axis::X) => &self.scroll_x,
            GestureTarget::Scrollbar(Axis::Y) => &self.scroll_y,
        }
    }
}

/// A mounted pixel grid.
#[wasm_bindgen]
pub struct PixelGridView {
    state: Rc<RefCell<HostState>>,
    render_loop: RenderLoop<AnimationFrameScheduler>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl PixelGridView {
    /// Mount a view.
    ///
    /// `config_json` uses the camelCase config keys; `on_select` is called
    /// with `(selection, editable)` after a pick and with `null` when the
    /// selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid config, a canvas without a 2D context,
    /// or a listener the browser refuses.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: &str,
        wrapper: HtmlElement,
        canvas: HtmlCanvasElement,
        scroll_x: HtmlElement,
        scroll_y: HtmlElement,
        on_select: js_sys::Function,
    ) -> Result<PixelGridView, JsValue> {
        let config = Config::from_json(config_json).map_err(js_error)?;
        canvas.set_width(css_pixels(config.surface_width));
        canvas.set_height(css_pixels(config.surface_height));

        let mut surface = CanvasSurface::from_canvas(&canvas)?;
        let state = Rc::new(RefCell::new(HostState {
            core: EngineCore::new(config),
            surface: canvas,
            scroll_x,
            scroll_y,
            captures: HashMap::new(),
            on_select,
        }));

        let mut listeners = Vec::with_capacity(GestureTarget::ALL.len() * POINTER_EVENTS.len() + 1);
        for target in GestureTarget::ALL {
            let element = state.borrow().element(target).clone();
            for (event, phase) in POINTER_EVENTS {
                listeners.push(bind_pointer(&state, &element, event, target, phase)?);
            }
        }
        listeners.push(bind_wheel(&state, &wrapper)?);

        {
            let host = state.borrow();
            sync_scrollbars(&host, host.core.scrollbars());
        }

        let step_state = Rc::clone(&state);
        let render_loop = RenderLoop::new(AnimationFrameScheduler, move || {
            let Ok(host) = step_state.try_borrow() else {
                return;
            };
            render::draw(&mut surface, &host.core);
        });
        render_loop.start();
        debug!("pixel grid mounted ({} listeners)", listeners.len());

        Ok(PixelGridView { state, render_loop, listeners })
    }

    /// Replace the grid with a JSON array of rows of CSS colors.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or a grid whose dimensions do not
    /// match the config; the view then renders an empty frame.
    #[wasm_bindgen(js_name = setGrid)]
    pub fn set_grid(&self, grid_json: &str) -> Result<(), JsValue> {
        let grid = GridModel::from_json(grid_json).map_err(js_error)?;
        self.state.borrow_mut().core.set_grid(Rc::new(grid)).map_err(js_error)
    }

    /// Recolor a cell after the external editor confirmed a change.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no grid or the cell is out of bounds.
    #[wasm_bindgen(js_name = confirmEdit)]
    pub fn confirm_edit(&self, col: usize, row: usize, color: &str) -> Result<(), JsValue> {
        self.state.borrow_mut().core.confirm_edit(col, row, color).map_err(js_error)
    }

    /// Allow or forbid editing. Forbidding drops any held selection.
    #[wasm_bindgen(js_name = setEditAllowed)]
    pub fn set_edit_allowed(&self, allowed: bool) {
        let actions = self.state.borrow_mut().core.set_edit_allowed(allowed);
        apply_actions(&self.state, actions);
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&self) {
        let actions = self.state.borrow_mut().core.clear_selection();
        apply_actions(&self.state, actions);
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.borrow().core.transform().scale
    }

    #[must_use]
    #[wasm_bindgen(js_name = translateX)]
    pub fn translate_x(&self) -> f64 {
        self.state.borrow().core.transform().translate_x
    }

    #[must_use]
    #[wasm_bindgen(js_name = translateY)]
    pub fn translate_y(&self) -> f64 {
        self.state.borrow().core.transform().translate_y
    }

    /// Pause painting, e.g. while the view is hidden.
    pub fn pause(&self) {
        self.render_loop.stop();
    }

    pub fn resume(&self) {
        self.render_loop.start();
    }

    /// Tear the view down. Same as dropping it.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for PixelGridView {
    fn drop(&mut self) {
        self.render_loop.stop();
        let actions = match self.state.try_borrow_mut() {
            Ok(mut host) => host.core.release_all(),
            Err(_) => Vec::new(),
        };
        apply_actions(&self.state, actions);
        if let Ok(mut host) = self.state.try_borrow_mut() {
            host.captures.clear();
        }
        debug!("pixel grid unmounted ({} listeners removed)", self.listeners.len());
    }
}

fn bind_pointer(
    state: &Rc<RefCell<HostState>>,
    element: &Element,
    event: &'static str,
    target: GestureTarget,
    phase: Phase,
) -> Result<EventListener, JsValue> {
    let state = Rc::clone(state);
    EventListener::new(element, event, move |ev: Event| {
        let Some(ev) = ev.dyn_ref::<PointerEvent>() else {
            return;
        };
        let input = PointerInput::moved(
            ev.pointer_id(),
            Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y())),
            Point::new(f64::from(ev.movement_x()), f64::from(ev.movement_y())),
        );
        let actions = {
            let mut host = state.borrow_mut();
            match phase {
                Phase::Down => host.core.on_pointer_down(target, input),
                Phase::Move => host.core.on_pointer_move(target, input),
                Phase::End(release) => host.core.on_pointer_release(target, input, release),
            }
        };
        apply_actions(&state, actions);
    })
}

fn bind_wheel(state: &Rc<RefCell<HostState>>, wrapper: &HtmlElement) -> Result<EventListener, JsValue> {
    let state = Rc::clone(state);
    EventListener::new_active(wrapper, "wheel", move |ev: Event| {
        let Some(ev) = ev.dyn_ref::<WheelEvent>() else {
            return;
        };
        ev.prevent_default();
        let cursor = Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()));
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        let actions = state.borrow_mut().core.on_wheel(cursor, delta);
        apply_actions(&state, actions);
    })
}

/// Carry out engine actions. No `RefCell` borrow is held while JavaScript
/// runs, so `on_select` may call back into the view.
fn apply_actions(state: &Rc<RefCell<HostState>>, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::CapturePointer { target, pointer_id } => {
                let acquired = {
                    let mut host = state.borrow_mut();
                    PointerCapture::acquire(host.element(target), pointer_id).map(|capture| {
                        debug!("{target:?}: captured pointer {pointer_id}");
                        host.captures.insert(target, capture);
                    })
                };
                if let Err(err) = acquired {
                    // Capture refused: the gesture is over before it began.
                    warn!("pointer {pointer_id} capture failed: {err:?}");
                    let follow = state.borrow_mut().core.on_pointer_release(
                        target,
                        PointerInput::at(pointer_id, Point::new(0.0, 0.0)),
                        Release::Lost,
                    );
                    apply_actions(state, follow);
                }
            }
            Action::ReleasePointer { target, pointer_id } => {
                let released = state.borrow_mut().captures.remove(&target);
                if released.is_some() {
                    debug!("{target:?}: released pointer {pointer_id}");
                }
                drop(released);
            }
            Action::PixelSelected { selection, editable } => {
                let on_select = state.borrow().on_select.clone();
                notify_selected(&on_select, &selection, editable);
            }
            Action::SelectionCleared => {
                let on_select = state.borrow().on_select.clone();
                if let Err(err) = on_select.call1(&JsValue::NULL, &JsValue::NULL) {
                    warn!("onSelect threw: {err:?}");
                }
            }
            Action::ScrollbarsChanged(geometry) => sync_scrollbars(&state.borrow(), geometry),
        }
    }
}

fn notify_selected(on_select: &js_sys::Function, selection: &PixelSelection, editable: bool) {
    let payload = match serde_json::to_string(selection) {
        Ok(json) => js_sys::JSON::parse(&json),
        Err(err) => Err(js_error(err)),
    };
    let result = payload.and_then(|payload| on_select.call2(&JsValue::NULL, &payload, &JsValue::from_bool(editable)));
    if let Err(err) = result {
        warn!("onSelect failed: {err:?}");
    }
}

/// Size and position both thumbs.
fn sync_scrollbars(host: &HostState, geometry: ScrollbarGeometry) {
    let styles = [
        (&host.scroll_x, "width", "translateX", geometry.horizontal),
        (&host.scroll_y, "height", "translateY", geometry.vertical),
    ];
    for (element, extent, translate, thumb) in styles {
        let style = element.style();
        let result = style
            .set_property(extent, &format!("{}px", thumb.size))
            .and_then(|()| style.set_property("transform", &format!("{translate}({}px)", thumb.position)));
        if let Err(err) = result {
            warn!("failed to style scrollbar thumb: {err:?}");
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn css_pixels(value: f64) -> u32 {
    value.round() as u32
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
