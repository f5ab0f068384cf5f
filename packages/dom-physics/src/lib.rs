//! DOM Physics - Rigid-body physics for DOM elements, in WASM
//!
//! Cards dropped into a container fall under gravity, bounce off the floor and
//! side walls, and can be dragged with the pointer. Each animation frame the
//! pose of every simulated body is written back to its element's transform.
//!
//! Architecture:
//! - core/      - Vec2, pose -> transform math, xorshift RNG
//! - config/    - PhysicsConfig (JSON)
//! - physics/   - rapier2d adapter: world, bodies, pointer constraint
//! - sync/      - Synchronizer: the owning context tying bodies to elements
//! - dom/       - web-sys glue: redraw loop, stepping timer, listeners
//! - api/       - Public JS API

pub mod core;
pub mod config;
pub mod error;
pub mod logging;
pub mod physics;
pub mod sync;
pub mod dom;
pub mod api;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module: panic hook and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    logging::init(log::LevelFilter::Info);
    log::info!("dom-physics {} initialized", version());
}

/// Get module version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::DomPhysics;
pub use config::PhysicsConfig;
pub use error::SyncError;
pub use sync::{ContainerSize, Synchronizer, VisualNode};
