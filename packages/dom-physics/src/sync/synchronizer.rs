use crate::config::PhysicsConfig;
use crate::core::{Pose, Rng, Vec2};
use crate::error::{Result, SyncError};
use crate::physics::{BodyHandle, BodyInfo, PhysicsWorld, PointerConstraint};

use super::boundaries::{self, BoundaryLayout, ContainerSize};
use super::node::{TrackedPair, VisualNode};
use super::spawn::spawn_center;

/// One physics world plus the elements it drives
pub struct Synchronizer<E: VisualNode> {
    config: PhysicsConfig,
    container: ContainerSize,
    world: PhysicsWorld,
    pointer: PointerConstraint,
    pairs: Vec<TrackedPair<E>>,
    rng: Rng,
}

impl<E: VisualNode> Synchronizer<E> {
    /// Create the world, its boundaries and the pointer constraint.
    ///
    /// The container must already be laid out: a zero-sized container would
    /// produce walls with no area.
    pub fn new(container: ContainerSize, config: PhysicsConfig) -> Result<Self> {
        if !container.is_laid_out() {
            return Err(SyncError::ContainerNotReady {
                width: container.width,
                height: container.height,
            });
        }
        config.validate()?;

        let world = PhysicsWorld::new(config.gravity(), config.timestep_secs());
        let pointer = PointerConstraint::new(config.pointer_stiffness);
        let rng = config.seed.map(Rng::new).unwrap_or_else(Rng::from_entropy);

        let mut sync = Self {
            config,
            container,
            world,
            pointer,
            pairs: Vec::new(),
            rng,
        };
        sync.rebuild_boundaries();
        log::info!(
            "physics world ready ({}x{} container)",
            container.width,
            container.height
        );
        Ok(sync)
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn pairs(&self) -> &[TrackedPair<E>] {
        &self.pairs
    }

    pub fn tracked_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn dynamic_body_count(&self) -> usize {
        self.world.count_where(BodyInfo::is_tracked)
    }

    pub fn boundary_count(&self) -> usize {
        self.world.count_where(BodyInfo::is_wall)
    }

    pub fn is_tracked(&self, element: &E) -> bool {
        self.position_of(element).is_some()
    }

    pub fn pose_of(&self, element: &E) -> Option<Pose> {
        let idx = self.position_of(element)?;
        self.world.pose(self.pairs[idx].body)
    }

    /// Start simulating `element`.
    ///
    /// The element must be attached (so it can be measured) and not already
    /// tracked. It spawns at a random column above the container and is
    /// synced once right away so it never flashes at its layout position.
    pub fn add_body(&mut self, element: E) -> Result<BodyHandle> {
        if !element.is_attached() {
            return Err(SyncError::ElementDetached);
        }
        if self.is_tracked(&element) {
            return Err(SyncError::AlreadyTracked);
        }
        let size = element.size();
        if !size.is_positive() {
            return Err(SyncError::DegenerateElement { width: size.x, height: size.y });
        }

        let center = spawn_center(self.container.width, size, self.config.spawn_height, &mut self.rng);
        let body = self.world.add_dynamic_rect(center, size, self.config.material());
        log::debug!(
            "tracking {}x{} element at ({:.1}, {:.1})",
            size.x,
            size.y,
            center.x,
            center.y
        );

        let pair = TrackedPair { body, element, size };
        sync_pair(&self.world, &pair);
        self.pairs.push(pair);
        Ok(body)
    }

    /// Stop simulating one element; it stays in the document where it is.
    pub fn untrack(&mut self, element: &E) -> bool {
        let Some(idx) = self.position_of(element) else {
            return false;
        };
        let pair = self.pairs.remove(idx);
        self.release_body(pair.body);
        true
    }

    /// Stop simulating every element, leaving them in the document frozen
    /// at their last synced transform.
    pub fn detach_bodies(&mut self) -> usize {
        let pairs = std::mem::take(&mut self.pairs);
        for pair in &pairs {
            self.release_body(pair.body);
        }
        if !pairs.is_empty() {
            log::debug!("detached {} bodies", pairs.len());
        }
        pairs.len()
    }

    /// Stop simulating every element and remove each from the document.
    pub fn clear_bodies(&mut self) -> usize {
        let pairs = std::mem::take(&mut self.pairs);
        for pair in &pairs {
            self.release_body(pair.body);
            pair.element.remove_from_document();
        }
        if !pairs.is_empty() {
            log::debug!("cleared {} bodies", pairs.len());
        }
        pairs.len()
    }

    /// Container changed size: rebuild the walls around it.
    pub fn resize(&mut self, container: ContainerSize) {
        if !container.is_laid_out() {
            log::warn!(
                "ignoring resize to {}x{}; keeping previous boundaries",
                container.width,
                container.height
            );
            return;
        }
        self.container = container;
        self.rebuild_boundaries();
    }

    /// Gravity in px/s²
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity_x = gravity.x;
        self.config.gravity_y = gravity.y;
        self.world.set_gravity(gravity);
    }

    /// Apply the pointer constraint and advance one fixed step.
    pub fn step(&mut self) {
        self.pointer.apply(&mut self.world);
        self.world.step();
    }

    /// Copy every body's pose into its element's transform.
    pub fn sync(&self) {
        for pair in &self.pairs {
            sync_pair(&self.world, pair);
        }
    }

    /// Pointer pressed at `at` (container coordinates). Grips the topmost
    /// tracked body under the pointer, if any.
    pub fn pointer_down(&mut self, at: Vec2) -> Option<BodyHandle> {
        // Later pairs were added later and paint on top.
        let candidates: Vec<BodyHandle> = self.pairs.iter().rev().map(|p| p.body).collect();
        self.pointer.press(&self.world, at, candidates)
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.pointer.move_to(at);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    pub fn gripped(&self) -> Option<BodyHandle> {
        self.pointer.gripped()
    }

    fn position_of(&self, element: &E) -> Option<usize> {
        self.pairs.iter().position(|p| p.element.same_node(element))
    }

    fn release_body(&mut self, body: BodyHandle) {
        self.pointer.forget(body);
        self.world.remove_body(body);
    }

    fn rebuild_boundaries(&mut self) {
        let layout = BoundaryLayout::compute(self.container, &self.config);
        let removed = boundaries::rebuild(&mut self.world, &layout);
        log::debug!(
            "boundaries rebuilt for {}x{} (replaced {})",
            self.container.width,
            self.container.height,
            removed
        );
    }
}

fn sync_pair<E: VisualNode>(world: &PhysicsWorld, pair: &TrackedPair<E>) {
    if let Some(pose) = world.pose(pair.body) {
        pair.element.set_transform(&pose.css_transform(pair.size));
    }
}
