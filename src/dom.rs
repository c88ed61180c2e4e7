//! Browser bindings: scoped DOM resources and the web implementations of the
//! engine's platform traits.
//!
//! Every DOM resource the engine acquires is held by a value whose `Drop`
//! gives it back: an [`EventListener`] removes itself from its target, and a
//! [`PointerCapture`] releases its pointer. Tearing down a view is therefore
//! just dropping it, whatever gesture happens to be in flight.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, CanvasRenderingContext2d, Element, Event, EventTarget, HtmlCanvasElement};

use crate::input::PointerId;
use crate::render::Surface;
use crate::scheduler::{FrameCallback, FrameScheduler, ScheduleError};

/// A DOM event listener that is removed when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Attach `handler` to `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if the listener cannot be added.
    pub fn new(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback })
    }

    /// Attach a non-passive listener, so `handler` may call `preventDefault`.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if the listener cannot be added.
    pub fn new_active(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!("failed to remove {} listener: {err:?}", self.event);
        }
    }
}

/// Exclusive capture of one pointer by one element, released when dropped.
pub struct PointerCapture {
    element: Element,
    pointer_id: PointerId,
}

impl PointerCapture {
    /// Capture `pointer_id` on `element`.
    ///
    /// # Errors
    ///
    /// Returns the browser's error, e.g. when the pointer is no longer active.
    pub fn acquire(element: &Element, pointer_id: PointerId) -> Result<Self, JsValue> {
        element.set_pointer_capture(pointer_id)?;
        Ok(Self { element: element.clone(), pointer_id })
    }

    #[must_use]
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        // The browser drops capture on its own after pointerup.
        if !self.element.has_pointer_capture(self.pointer_id) {
            return;
        }
        if let Err(err) = self.element.release_pointer_capture(self.pointer_id) {
            warn!("failed to release pointer {}: {err:?}", self.pointer_id);
        }
    }
}

/// Schedules frames with `window.requestAnimationFrame`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrameScheduler;

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), ScheduleError> {
        let window = web_sys::window().ok_or(ScheduleError::NoWindow)?;

        // The closure owns itself through `holder` until it has run once.
        let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let holder_for_cb = Rc::clone(&holder);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(callback) = callback.take() {
                callback();
            }
            holder_for_cb.borrow_mut().take();
        }) as Box<dyn FnMut(f64)>);

        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|err| ScheduleError::Rejected(format!("{err:?}")))?;
        *holder.borrow_mut() = Some(closure);
        Ok(())
    }
}

/// A [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Take the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_cell(&mut self, x: f64, y: f64, size: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, size, size);
    }
}
