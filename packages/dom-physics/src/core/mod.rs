//! Core - Math shared by the physics adapter and the DOM layer
//!
//! - vec2/       - 2D vector in container pixels (y grows downward)
//! - transform/  - Body pose -> CSS transform
//! - random/     - Seeded xorshift32 for spawn jitter

mod vec2;
pub mod random;
pub mod transform;

pub use random::Rng;
pub use transform::{Affine, Pose};
pub use vec2::Vec2;
