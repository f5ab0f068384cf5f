//! PointerConstraint - Drag bodies with the mouse / touch pointer
//!
//! While a body is gripped, every step pulls the grip point toward the
//! pointer with an impulse proportional to `stiffness`, like a damped spring.

use rapier2d::prelude::*;

use crate::core::Vec2;

use super::world::PhysicsWorld;

#[derive(Clone, Copy, Debug)]
struct Grip {
    body: RigidBodyHandle,
    /// Grip point in body-local coordinates
    local_anchor: Vec2,
}

#[derive(Clone, Debug)]
pub struct PointerConstraint {
    stiffness: f32,
    pointer: Option<Vec2>,
    grip: Option<Grip>,
}

impl PointerConstraint {
    pub fn new(stiffness: f32) -> Self {
        Self {
            stiffness: stiffness.clamp(f32::EPSILON, 1.0),
            pointer: None,
            grip: None,
        }
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn gripped(&self) -> Option<RigidBodyHandle> {
        self.grip.map(|g| g.body)
    }

    /// Press at `at`: grips the first candidate whose shape contains the point.
    pub fn press(
        &mut self,
        world: &PhysicsWorld,
        at: Vec2,
        candidates: impl IntoIterator<Item = RigidBodyHandle>,
    ) -> Option<RigidBodyHandle> {
        self.pointer = Some(at);
        self.grip = candidates
            .into_iter()
            .find(|&h| world.contains_point(h, at))
            .and_then(|body| {
                let local = world
                    .body(body)?
                    .position()
                    .inverse_transform_point(&point![at.x, at.y]);
                Some(Grip { body, local_anchor: Vec2::new(local.x, local.y) })
            });
        self.gripped()
    }

    pub fn move_to(&mut self, at: Vec2) {
        self.pointer = Some(at);
    }

    pub fn release(&mut self) {
        self.grip = None;
    }

    /// Pointer left the container
    pub fn leave(&mut self) {
        self.grip = None;
        self.pointer = None;
    }

    /// Drop the grip if it refers to `body` (body leaving the world).
    pub fn forget(&mut self, body: RigidBodyHandle) {
        if self.gripped() == Some(body) {
            self.grip = None;
        }
    }

    /// Pull the gripped body toward the pointer. Call once per step.
    pub fn apply(&mut self, world: &mut PhysicsWorld) {
        let (Some(grip), Some(pointer)) = (self.grip, self.pointer) else {
            return;
        };
        let dt = world.timestep();
        let Some(body) = world.body_mut(grip.body) else {
            self.grip = None;
            return;
        };

        let anchor = body.position() * point![grip.local_anchor.x, grip.local_anchor.y];
        let target = point![pointer.x, pointer.y];
        let offset = target - anchor;

        // Velocity that closes `stiffness` of the gap this step
        let desired = offset * (self.stiffness / dt);
        let current = body.velocity_at_point(&anchor);
        let impulse = (desired - current) * (body.mass() * self.stiffness);

        body.apply_impulse_at_point(impulse, anchor, true);
        let damped = body.angvel() * (1.0 - self.stiffness);
        body.set_angvel(damped, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Material;

    fn weightless() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::zero(), 1.0 / 60.0)
    }

    #[test]
    fn press_grips_only_bodies_under_pointer() {
        let mut world = weightless();
        let a = world.add_dynamic_rect(Vec2::new(50.0, 50.0), Vec2::new(20.0, 20.0), Material::default());
        let b = world.add_dynamic_rect(Vec2::new(150.0, 50.0), Vec2::new(20.0, 20.0), Material::default());

        let mut pointer = PointerConstraint::new(0.2);
        assert_eq!(pointer.press(&world, Vec2::new(152.0, 48.0), [a, b]), Some(b));
        assert_eq!(pointer.press(&world, Vec2::new(100.0, 50.0), [a, b]), None);
    }

    #[test]
    fn drag_pulls_body_toward_pointer() {
        let mut world = weightless();
        let h = world.add_dynamic_rect(Vec2::new(50.0, 50.0), Vec2::new(20.0, 20.0), Material::default());

        let mut pointer = PointerConstraint::new(0.2);
        pointer.press(&world, Vec2::new(50.0, 50.0), [h]);
        pointer.move_to(Vec2::new(250.0, 50.0));
        for _ in 0..60 {
            pointer.apply(&mut world);
            world.step();
        }

        let x = world.pose(h).unwrap().center.x;
        assert!(x > 150.0, "x = {x}");
    }

    #[test]
    fn release_and_forget_drop_the_grip() {
        let mut world = weightless();
        let h = world.add_dynamic_rect(Vec2::new(50.0, 50.0), Vec2::new(20.0, 20.0), Material::default());

        let mut pointer = PointerConstraint::new(0.2);
        pointer.press(&world, Vec2::new(50.0, 50.0), [h]);
        pointer.release();
        assert_eq!(pointer.gripped(), None);

        pointer.press(&world, Vec2::new(50.0, 50.0), [h]);
        pointer.forget(h);
        assert_eq!(pointer.gripped(), None);
    }

    #[test]
    fn stale_grip_is_dropped_on_apply() {
        let mut world = weightless();
        let h = world.add_dynamic_rect(Vec2::new(50.0, 50.0), Vec2::new(20.0, 20.0), Material::default());

        let mut pointer = PointerConstraint::new(0.2);
        pointer.press(&world, Vec2::new(50.0, 50.0), [h]);
        world.remove_body(h);
        pointer.apply(&mut world);
        assert_eq!(pointer.gripped(), None);
    }
}
