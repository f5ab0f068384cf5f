//! Where new bodies appear: random column, somewhere above the container.

use crate::core::{Rng, Vec2};

/// Center of a freshly spawned body of `size` in a container `container_width` wide.
///
/// `x` lands in `[w/2, W - w/2]` (the middle when the element is wider than
/// the container); `y` is at least one element height above the top edge,
/// plus up to `spawn_height` of jitter, so it is always strictly negative.
pub fn spawn_center(container_width: f32, size: Vec2, spawn_height: f32, rng: &mut Rng) -> Vec2 {
    let free = container_width - size.x;
    let x = if free > 0.0 {
        rng.next_f32() * free + size.x / 2.0
    } else {
        container_width / 2.0
    };
    let y = -size.y - rng.next_f32() * spawn_height;
    Vec2::new(x, y)
}
