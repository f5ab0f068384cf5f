//! PhysicsConfig - Tunables for the world, boundaries, spawning and dragging
//!
//! Read from JSON (camelCase keys). Every field has a default, so `{}` and a
//! missing config both give the stock behaviour.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::core::Vec2;
use crate::error::{Result, SyncError};
use crate::physics::Material;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Gravity in px/s² (positive y pulls toward the bottom of the container)
    pub gravity_x: f32,
    pub gravity_y: f32,
    /// Fixed physics step. Rounded to whole milliseconds, since that is the
    /// resolution of the stepping interval.
    pub timestep_ms: f32,
    pub wall_thickness: f32,
    /// Side-wall height as a multiple of the container height
    pub wall_height_factor: f32,
    /// How far the ground pokes up into the visible area
    pub ground_inset: f32,
    /// Spawn offsets above the container are drawn from `[0, spawn_height)`
    pub spawn_height: f32,
    /// Spring strength of the drag constraint, in (0, 1]
    pub pointer_stiffness: f32,
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
    /// Fixed RNG seed for reproducible spawns; entropy when absent
    pub seed: Option<u32>,
    pub log_level: String,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_x: 0.0,
            gravity_y: 1000.0,
            timestep_ms: 1000.0 / 60.0,
            wall_thickness: 60.0,
            wall_height_factor: 5.0,
            ground_inset: 10.0,
            spawn_height: 500.0,
            pointer_stiffness: 0.2,
            restitution: 0.5,
            friction: 0.1,
            density: 0.001,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl PhysicsConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.gravity_x,
            self.gravity_y,
            self.timestep_ms,
            self.wall_thickness,
            self.wall_height_factor,
            self.ground_inset,
            self.spawn_height,
            self.pointer_stiffness,
            self.restitution,
            self.friction,
            self.density,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(invalid("all numeric fields must be finite"));
        }
        if self.timestep_ms <= 0.0 {
            return Err(invalid("timestepMs must be positive"));
        }
        if self.wall_thickness <= 0.0 {
            return Err(invalid("wallThickness must be positive"));
        }
        if self.wall_height_factor < 1.0 {
            return Err(invalid("wallHeightFactor must be at least 1"));
        }
        if self.spawn_height < 0.0 {
            return Err(invalid("spawnHeight must not be negative"));
        }
        if !(self.pointer_stiffness > 0.0 && self.pointer_stiffness <= 1.0) {
            return Err(invalid("pointerStiffness must be in (0, 1]"));
        }
        if self.restitution < 0.0 || self.friction < 0.0 || self.density <= 0.0 {
            return Err(invalid("restitution/friction must be >= 0 and density > 0"));
        }
        self.log_level_filter()?;
        Ok(())
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity_x, self.gravity_y)
    }

    /// Period of the stepping interval in whole milliseconds (at least 1).
    pub fn step_period_ms(&self) -> i32 {
        (self.timestep_ms.round() as i32).max(1)
    }

    /// Simulated time per step; always matches `step_period_ms` so the world
    /// advances at wall-clock speed.
    pub fn timestep_secs(&self) -> f32 {
        self.step_period_ms() as f32 / 1000.0
    }

    pub fn material(&self) -> Material {
        Material {
            restitution: self.restitution,
            friction: self.friction,
            density: self.density,
        }
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| invalid(&format!("unknown logLevel '{}'", self.log_level)))
    }
}

fn invalid(msg: &str) -> SyncError {
    SyncError::InvalidConfig(msg.to_string())
}
