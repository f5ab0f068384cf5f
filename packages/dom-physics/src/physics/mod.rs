//! Physics - Thin adapter over rapier2d
//!
//! The synchronizer only needs: create world, add static/dynamic rectangles
//! with a material, remove bodies, query bodies by kind, read poses, step,
//! and a spring-like pointer constraint. Nothing else from rapier leaks out
//! except the body handle type.

mod body;
mod pointer;
mod world;

pub use body::{BodyInfo, BodyKind, Material};
pub use pointer::PointerConstraint;
pub use world::PhysicsWorld;

/// Handle of a body owned by a [`PhysicsWorld`]
pub type BodyHandle = rapier2d::prelude::RigidBodyHandle;
