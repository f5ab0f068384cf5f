//! Host loops and listeners as owned handles. Dropping a handle unregisters
//! it, so tearing down a `DomPhysics` leaves nothing scheduled behind.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, Window};

use crate::error::{Result, SyncError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| SyncError::Host("no global window".to_string()))
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Recurring `requestAnimationFrame` callback that reschedules itself.
pub struct AnimationLoop {
    callback: FrameCallback,
    request_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl AnimationLoop {
    pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let f = callback.clone();
        let id = request_id.clone();
        let live = running.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            id.set(None);
            if !live.get() {
                return;
            }
            tick();
            // Request next frame
            if let Some(cb) = f.borrow().as_ref() {
                match request_frame(cb) {
                    Ok(next) => id.set(Some(next)),
                    Err(e) => log::error!("animation loop stopped: {e}"),
                }
            }
        }) as Box<dyn FnMut()>));

        let first = match callback.borrow().as_ref() {
            Some(cb) => request_frame(cb)?,
            None => return Err(SyncError::Host("animation callback missing".to_string())),
        };
        request_id.set(Some(first));

        Ok(Self { callback, request_id, running })
    }

    /// Cancel the pending frame and break the callback's self-reference.
    pub fn stop(&mut self) {
        self.running.set(false);
        if let Some(id) = self.request_id.take() {
            if let Ok(w) = window() {
                if let Err(e) = w.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Result<i32> {
    Ok(window()?.request_animation_frame(cb.as_ref().unchecked_ref())?)
}

/// `setInterval` timer, cleared on drop.
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, tick: impl FnMut() + 'static) -> Result<Self> {
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms.max(1),
        )?;
        Ok(Self { id, _closure: closure })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Ok(w) = window() {
            w.clear_interval_with_handle(self.id);
        }
    }
}

/// Event listener registration, removed on drop.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, closure })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove '{}' listener: {:?}", self.event, e);
        }
    }
}
