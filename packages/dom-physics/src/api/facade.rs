use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement};

use crate::config::PhysicsConfig;
use crate::core::Vec2;
use crate::dom::{self, AnimationLoop, EventListener, Interval};
use crate::error::{Result, SyncError};
use crate::logging;
use crate::sync::Synchronizer;

type Shared = Rc<RefCell<Synchronizer<HtmlElement>>>;

/// Everything scheduled on the host for one instance. Dropping it stops
/// the redraw loop, the stepping timer and all listeners.
struct Running {
    sync: Shared,
    container: HtmlElement,
    _frame: AnimationLoop,
    _stepper: Interval,
    _listeners: Vec<EventListener>,
}

/// DOM elements driven by a 2D rigid-body world.
///
/// ```js
/// const physics = DomPhysics.initialize(container, JSON.stringify({ seed: 7 }));
/// for (const card of cards) physics.addBody(card);
/// // later
/// physics.dispose();
/// ```
#[wasm_bindgen]
pub struct DomPhysics {
    running: Option<Running>,
}

#[wasm_bindgen]
impl DomPhysics {
    /// Build the world inside `container` and start the stepping and redraw
    /// loops. `config_json` is an optional `PhysicsConfig` as JSON.
    pub fn initialize(container: HtmlElement, config_json: Option<String>) -> Result<DomPhysics, JsValue> {
        let config = match config_json {
            Some(json) => PhysicsConfig::from_json(&json)?,
            None => PhysicsConfig::default(),
        };
        logging::init(config.log_level_filter()?);
        Ok(Self { running: Some(start(container, config)?) })
    }

    /// Track an element that is already in the document.
    #[wasm_bindgen(js_name = addBody)]
    pub fn add_body(&self, element: HtmlElement) -> Result<(), JsValue> {
        self.running()?.sync.borrow_mut().add_body(element)?;
        Ok(())
    }

    /// Stop simulating every element and remove them from the document.
    #[wasm_bindgen(js_name = clearBodies)]
    pub fn clear_bodies(&self) -> Result<u32, JsValue> {
        Ok(self.running()?.sync.borrow_mut().clear_bodies() as u32)
    }

    /// Stop simulating every element but leave them where they are.
    #[wasm_bindgen(js_name = detachBodies)]
    pub fn detach_bodies(&self) -> Result<u32, JsValue> {
        Ok(self.running()?.sync.borrow_mut().detach_bodies() as u32)
    }

    pub fn untrack(&self, element: &HtmlElement) -> Result<bool, JsValue> {
        Ok(self.running()?.sync.borrow_mut().untrack(element))
    }

    /// Re-measure the container and rebuild the walls.
    pub fn resize(&self) -> Result<(), JsValue> {
        let running = self.running()?;
        let size = dom::container_size(&running.container);
        running.sync.borrow_mut().resize(size);
        Ok(())
    }

    #[wasm_bindgen(js_name = setGravity)]
    pub fn set_gravity(&self, x: f32, y: f32) -> Result<(), JsValue> {
        self.running()?.sync.borrow_mut().set_gravity(Vec2::new(x, y));
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = trackedCount)]
    pub fn tracked_count(&self) -> u32 {
        self.running
            .as_ref()
            .map_or(0, |r| r.sync.borrow().tracked_count() as u32)
    }

    #[wasm_bindgen(getter)]
    pub fn disposed(&self) -> bool {
        self.running.is_none()
    }

    /// Unregister the redraw callback, stop stepping, remove listeners.
    /// Tracked elements stay where they were last drawn.
    pub fn dispose(&mut self) {
        if self.running.take().is_some() {
            log::info!("physics disposed");
        }
    }
}

impl DomPhysics {
    fn running(&self) -> Result<&Running> {
        self.running.as_ref().ok_or(SyncError::Disposed)
    }
}

fn start(container: HtmlElement, config: PhysicsConfig) -> Result<Running> {
    let period_ms = config.step_period_ms();
    let sync: Shared = Rc::new(RefCell::new(Synchronizer::new(
        dom::container_size(&container),
        config,
    )?));

    let stepper = {
        let s = sync.clone();
        Interval::start(period_ms, move || s.borrow_mut().step())?
    };

    let frame = {
        let s = sync.clone();
        AnimationLoop::start(move || s.borrow().sync())?
    };

    let window = dom::window()?;
    let mut listeners = Vec::with_capacity(5);

    let s = sync.clone();
    let c = container.clone();
    listeners.push(EventListener::new(window.as_ref(), "resize", move |_| {
        s.borrow_mut().resize(dom::container_size(&c));
    })?);

    let s = sync.clone();
    let c = container.clone();
    listeners.push(EventListener::new(container.as_ref(), "pointerdown", move |e: Event| {
        if let Some(at) = dom::pointer_position(&c, &e) {
            if s.borrow_mut().pointer_down(at).is_some() {
                // Keep the browser from starting a text selection / native drag
                e.prevent_default();
            }
        }
    })?);

    let s = sync.clone();
    let c = container.clone();
    listeners.push(EventListener::new(container.as_ref(), "pointermove", move |e: Event| {
        if let Some(at) = dom::pointer_position(&c, &e) {
            s.borrow_mut().pointer_move(at);
        }
    })?);

    let s = sync.clone();
    listeners.push(EventListener::new(container.as_ref(), "pointerup", move |_| {
        s.borrow_mut().pointer_up();
    })?);

    let s = sync.clone();
    listeners.push(EventListener::new(container.as_ref(), "pointerleave", move |_| {
        s.borrow_mut().pointer_leave();
    })?);

    log::info!("physics loops started ({period_ms}ms step)");
    Ok(Running {
        sync,
        container,
        _frame: frame,
        _stepper: stepper,
        _listeners: listeners,
    })
}
