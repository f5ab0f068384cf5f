//! DOM - web-sys glue: element measurement, redraw loop, timers, listeners

mod element;
mod host;

pub use element::{container_size, pointer_position};
pub use host::{window, AnimationLoop, EventListener, Interval};
