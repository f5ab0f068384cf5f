//! Sync - Keeps visual elements glued to their simulated bodies
//!
//! `Synchronizer` is the owning context: world, boundaries, tracked pairs and
//! pointer constraint. It never touches the DOM directly; elements are reached
//! through the `VisualNode` trait, which the `dom` module implements for
//! `web_sys::HtmlElement` and tests implement with in-memory nodes.

pub mod boundaries;
mod node;
pub mod spawn;
mod synchronizer;

pub use boundaries::{BoundaryLayout, ContainerSize, WallRect};
pub use node::{TrackedPair, VisualNode};
pub use synchronizer::Synchronizer;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
