//! Public JS API

pub mod facade;

pub use facade::DomPhysics;
