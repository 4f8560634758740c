/*
 * Simulation Parameters Module
 *
 * This module defines the per-boid steering parameters and the spawn
 * configuration consumed by the world. Parameters are fixed when a boid is
 * created and never mutated by the simulation itself. Validation happens
 * here, at the configuration boundary; the tick assumes valid state.
 */

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

// Steering parameters for a single boid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoidParams {
    pub max_speed: f32,
    pub max_force: f32,
    pub neighborhood_radius: f32,
    pub separation_weight: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    /// Offset in radians added to the display heading, for sprites whose
    /// artwork does not point along +x.
    pub base_rotation: f32,
}

impl Default for BoidParams {
    fn default() -> Self {
        Self {
            max_speed: 1.0,
            max_force: 0.03,
            neighborhood_radius: 3.0,
            separation_weight: 1.0,
            cohesion_weight: 1.0,
            alignment_weight: 1.0,
            base_rotation: 0.0,
        }
    }
}

impl BoidParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed > 0.0 && self.max_speed.is_finite()) {
            return Err(ConfigError::InvalidMaxSpeed(self.max_speed));
        }
        if !(self.max_force > 0.0 && self.max_force.is_finite()) {
            return Err(ConfigError::InvalidMaxForce(self.max_force));
        }
        if !(self.neighborhood_radius > 0.0 && self.neighborhood_radius.is_finite()) {
            return Err(ConfigError::InvalidNeighborhoodRadius(
                self.neighborhood_radius,
            ));
        }
        Ok(())
    }

    // Parameter ranges for host UI sliders
    pub fn max_speed_range() -> RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn max_force_range() -> RangeInclusive<f32> {
        0.1..=0.5
    }

    pub fn neighborhood_radius_range() -> RangeInclusive<f32> {
        1.0..=10.0
    }

    pub fn weight_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }
}

// Configuration for spawning a group of boids
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub count: usize,
    /// Radius of the disc around the world center boids are placed in.
    pub spawn_radius: f32,
    pub params: BoidParams,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 150,
            spawn_radius: 10.0,
            params: BoidParams::default(),
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_radius > 0.0 && self.spawn_radius.is_finite()) {
            return Err(ConfigError::InvalidSpawnRadius(self.spawn_radius));
        }
        self.params.validate()
    }

    pub fn count_range() -> RangeInclusive<usize> {
        0..=300
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("spawn radius must be positive and finite, got {0}")]
    InvalidSpawnRadius(f32),
    #[error("max speed must be positive and finite, got {0}")]
    InvalidMaxSpeed(f32),
    #[error("max force must be positive and finite, got {0}")]
    InvalidMaxForce(f32),
    #[error("neighborhood radius must be positive and finite, got {0}")]
    InvalidNeighborhoodRadius(f32),
}
