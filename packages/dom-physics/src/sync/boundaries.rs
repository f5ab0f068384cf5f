//! Ground and side walls sized to the container.

use crate::config::PhysicsConfig;
use crate::core::Vec2;
use crate::physics::{BodyInfo, BodyKind, PhysicsWorld};

/// Measured client size of the container element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Non-zero, finite size; anything else gives degenerate walls
    pub fn is_laid_out(&self) -> bool {
        Vec2::new(self.width, self.height).is_positive()
    }
}

/// Axis-aligned rectangle by center and full size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallRect {
    pub center: Vec2,
    pub size: Vec2,
}

impl WallRect {
    pub fn min(&self) -> Vec2 {
        self.center - self.size.half()
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size.half()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryLayout {
    pub ground: WallRect,
    pub left: WallRect,
    pub right: WallRect,
}

impl BoundaryLayout {
    pub fn compute(container: ContainerSize, config: &PhysicsConfig) -> Self {
        let (w, h) = (container.width, container.height);
        let t = config.wall_thickness;
        let wall_height = h * config.wall_height_factor;

        Self {
            ground: WallRect {
                center: Vec2::new(w / 2.0, h + t / 2.0 - config.ground_inset),
                size: Vec2::new(w, t),
            },
            left: WallRect {
                center: Vec2::new(-t / 2.0, h / 2.0),
                size: Vec2::new(t, wall_height),
            },
            right: WallRect {
                center: Vec2::new(w + t / 2.0, h / 2.0),
                size: Vec2::new(t, wall_height),
            },
        }
    }

    pub fn rects(&self) -> [WallRect; 3] {
        [self.ground, self.left, self.right]
    }
}

/// Replace whatever walls are in `world` with `layout`.
///
/// Walls are found by static flag + label, so stale sets from any earlier
/// layout go too. Returns the number of walls removed.
pub fn rebuild(world: &mut PhysicsWorld, layout: &BoundaryLayout) -> usize {
    let removed = world.remove_where(BodyInfo::is_wall);
    for rect in layout.rects() {
        world.add_static_rect(BodyKind::Wall, rect.center, rect.size);
    }
    removed
}
