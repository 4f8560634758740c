/*
 * World Module
 *
 * This module owns the boid population and drives the simulation tick.
 * Every tick captures a snapshot of all positions and velocities first and
 * computes each boid's next state from that snapshot alone, so the result
 * does not depend on storage or processing order. The parallel path
 * distributes the per-boid work across rayon and commits exactly the same
 * states as the sequential path.
 */

use glam::Vec2;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::f32::consts::TAU;
use tracing::{debug, trace};

use crate::boid::{Boid, BoidSnapshot};
use crate::neighbors::{NeighborIndex, UniformGridIndex};
use crate::params::{BoidParams, ConfigError, SpawnConfig};
use crate::{WORLD_HALF_HEIGHT, WORLD_HALF_WIDTH};

new_key_type! {
    /// Stable handle for boids backed by a generational slot map.
    pub struct BoidId;
}

/// Axis-aligned world rectangle. A boid leaving through one edge re-enters
/// at the opposite edge of the same axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec2::new(-WORLD_HALF_WIDTH, -WORLD_HALF_HEIGHT),
            max: Vec2::new(WORLD_HALF_WIDTH, WORLD_HALF_HEIGHT),
        }
    }
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    // Hard teleport to the opposite edge, each axis on its own
    pub fn wrap(&self, mut position: Vec2) -> Vec2 {
        if position.x < self.min.x {
            position.x = self.max.x;
        } else if position.x > self.max.x {
            position.x = self.min.x;
        }
        if position.y < self.min.y {
            position.y = self.max.y;
        } else if position.y > self.max.y {
            position.y = self.min.y;
        }
        position
    }
}

/// Mean-motion summary of the current population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockStats {
    pub count: usize,
    pub mean_speed: f32,
    /// Length of the mean unit-velocity vector: 1.0 when every boid points
    /// the same way, near 0.0 for incoherent headings.
    pub polarization: f32,
}

pub struct World {
    boids: SlotMap<BoidId, Boid>,
    bounds: Bounds,
    index: Box<dyn NeighborIndex + Send + Sync>,
    /// Split the per-boid tick work across rayon worker threads. Either
    /// setting produces identical states.
    pub parallel: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        let cell_size = BoidParams::default().neighborhood_radius;
        Self::with_index(bounds, Box::new(UniformGridIndex::new(&bounds, cell_size)))
    }

    /// Build a world around a caller-supplied neighbor index.
    pub fn with_index(bounds: Bounds, index: Box<dyn NeighborIndex + Send + Sync>) -> Self {
        Self {
            boids: SlotMap::with_key(),
            bounds,
            index,
            parallel: true,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Place `count` boids uniformly inside a disc of `spawn_radius` around
    /// the world center, each with a random heading at unit speed.
    pub fn spawn(
        &mut self,
        config: &SpawnConfig,
        rng: &mut impl Rng,
    ) -> Result<Vec<BoidId>, ConfigError> {
        config.validate()?;

        let center = self.bounds.center();
        let mut ids = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            let angle = rng.gen_range(0.0..TAU);
            // sqrt keeps the distribution uniform over the disc area.
            let distance = config.spawn_radius * rng.gen::<f32>().sqrt();
            let position = center + distance * Vec2::new(angle.cos(), angle.sin());
            let heading = rng.gen_range(0.0..TAU);
            ids.push(self.insert(position, heading, config.params));
        }
        debug!(count = config.count, "spawned boids");
        Ok(ids)
    }

    /// Create a single boid at a caller-chosen position and heading.
    pub fn insert(&mut self, position: Vec2, heading: f32, params: BoidParams) -> BoidId {
        self.boids.insert(Boid::new(position, heading, params))
    }

    /// Discard a boid. Handles of the remaining boids stay valid.
    pub fn remove(&mut self, id: BoidId) -> Option<Boid> {
        self.boids.remove(id)
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn contains(&self, id: BoidId) -> bool {
        self.boids.contains_key(id)
    }

    pub fn boid(&self, id: BoidId) -> Option<&Boid> {
        self.boids.get(id)
    }

    pub fn position_of(&self, id: BoidId) -> Option<Vec2> {
        self.boids.get(id).map(|boid| boid.position)
    }

    pub fn heading_of(&self, id: BoidId) -> Option<f32> {
        self.boids.get(id).map(|boid| boid.heading)
    }

    pub fn velocity_of(&self, id: BoidId) -> Option<Vec2> {
        self.boids.get(id).map(|boid| boid.velocity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoidId, &Boid)> {
        self.boids.iter()
    }

    /// Advance every boid by one step of `delta_time` seconds.
    pub fn tick(&mut self, delta_time: f32) {
        if self.boids.is_empty() {
            return;
        }
        trace!(
            delta_time = f64::from(delta_time),
            boid_count = self.boids.len(),
            "tick"
        );

        // Frame-start snapshot: every boid steers against the same state.
        let ids: Vec<BoidId> = self.boids.keys().collect();
        let snapshot: Vec<BoidSnapshot> =
            ids.iter().map(|&id| self.boids[id].snapshot()).collect();
        let positions: Vec<Vec2> =
            snapshot.iter().map(|record| record.position).collect();
        self.index.rebuild(&positions);

        let bounds = self.bounds;
        let boids = &self.boids;
        let index = &self.index;
        let step = |i: usize| {
            let mut boid = boids[ids[i]].clone();
            let mut neighbors = Vec::new();
            index.neighbors_within(
                i,
                &positions,
                boid.params.neighborhood_radius,
                &mut neighbors,
            );
            boid.step(&snapshot, &neighbors, delta_time, &bounds);
            boid
        };

        let next: Vec<Boid> = if self.parallel {
            (0..ids.len()).into_par_iter().map(step).collect()
        } else {
            (0..ids.len()).map(step).collect()
        };

        // Commit all next states at once.
        for (id, boid) in ids.into_iter().zip(next) {
            self.boids[id] = boid;
        }
    }

    pub fn stats(&self) -> FlockStats {
        let count = self.boids.len();
        if count == 0 {
            return FlockStats {
                count: 0,
                mean_speed: 0.0,
                polarization: 0.0,
            };
        }

        let mut speed_sum = 0.0;
        let mut heading_sum = Vec2::ZERO;
        for boid in self.boids.values() {
            speed_sum += boid.velocity.length();
            heading_sum += boid.velocity.normalize_or_zero();
        }
        let n = count as f32;
        FlockStats {
            count,
            mean_speed: speed_sum / n,
            polarization: heading_sum.length() / n,
        }
    }
}
