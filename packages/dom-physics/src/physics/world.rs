use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

use crate::core::{Pose, Vec2};

use super::body::{BodyInfo, BodyKind, Material};

/// Pixels per simulation "meter", used to scale solver tolerances.
const LENGTH_UNIT: f32 = 100.0;

/// Owns every body and collider plus the rapier pipeline state.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Empty world. `timestep` is in seconds.
    pub fn new(gravity: Vec2, timestep: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = timestep;
        integration_parameters.length_unit = LENGTH_UNIT;

        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::default(),
            island_manager: IslandManager::default(),
            broad_phase: DefaultBroadPhase::default(),
            narrow_phase: NarrowPhase::default(),
            bodies: RigidBodySet::default(),
            colliders: ColliderSet::default(),
            impulse_joints: ImpulseJointSet::default(),
            multibody_joints: MultibodyJointSet::default(),
            ccd_solver: CCDSolver::default(),
        }
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    /// Change gravity and wake every dynamic body so resting ones respond.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = vector![gravity.x, gravity.y];
        for (_, body) in self.bodies.iter_mut() {
            if body.is_dynamic() {
                body.wake_up(true);
            }
        }
    }

    /// Fixed step length in seconds
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Insert a fixed axis-aligned rectangle with the wall material.
    pub fn add_static_rect(&mut self, kind: BodyKind, center: Vec2, size: Vec2) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .user_data(kind.to_user_data())
            .build();
        let handle = self.bodies.insert(body);

        let half = size.half();
        let wall = Material::wall();
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .restitution(wall.restitution)
            .friction(wall.friction)
            .build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Insert a dynamic rectangle that rotates and collides.
    ///
    /// A contact keeps the larger restitution and the smaller friction of the
    /// two colliders, so a card bounces and slides the same against a wall as
    /// against another card.
    pub fn add_dynamic_rect(&mut self, center: Vec2, size: Vec2, material: Material) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x, center.y])
            .user_data(BodyKind::Tracked.to_user_data())
            .build();
        let handle = self.bodies.insert(body);

        let half = size.half();
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its colliders. Returns false for stale handles.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// All bodies currently in the world, optionally filtered.
    pub fn bodies_where(&self, filter: impl Fn(&BodyInfo) -> bool) -> Vec<BodyInfo> {
        self.bodies
            .iter()
            .map(|(handle, body)| BodyInfo::of(handle, body))
            .filter(|info| filter(info))
            .collect()
    }

    pub fn count_where(&self, filter: impl Fn(&BodyInfo) -> bool) -> usize {
        self.bodies
            .iter()
            .filter(|(handle, body)| filter(&BodyInfo::of(*handle, body)))
            .count()
    }

    /// Remove every body matching `filter`; returns how many went.
    pub fn remove_where(&mut self, filter: impl Fn(&BodyInfo) -> bool) -> usize {
        let mut removed = 0;
        for info in self.bodies_where(filter) {
            if self.remove_body(info.handle) {
                removed += 1;
            }
        }
        removed
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn pose(&self, handle: RigidBodyHandle) -> Option<Pose> {
        let body = self.bodies.get(handle)?;
        let t = body.translation();
        Some(Pose::new(t.x, t.y, body.rotation().angle()))
    }

    /// Does any collider of `handle` contain `point`?
    pub fn contains_point(&self, handle: RigidBodyHandle, point: Vec2) -> bool {
        let Some(body) = self.bodies.get(handle) else {
            return false;
        };
        let p = point![point.x, point.y];
        body.colliders().iter().any(|&ch| {
            self.colliders
                .get(ch)
                .is_some_and(|c| c.shape().contains_point(c.position(), &p))
        })
    }

    pub(crate) fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub(crate) fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Advance one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }
}
