/*
 * Boid Module
 *
 * This module defines the Boid struct and its per-tick behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding close neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Rules read a frame-start snapshot of the population, so a boid never
 * observes another boid's partially applied update within the same tick.
 */

use glam::Vec2;

use crate::params::BoidParams;
use crate::vec2::{heading_of, limit_magnitude};
use crate::world::Bounds;

/// Position and velocity of a boid as they were when the tick started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Display orientation in radians, velocity angle plus the sprite
    /// offset. Never feeds back into the motion.
    pub heading: f32,
    pub params: BoidParams,
}

impl Boid {
    pub fn new(position: Vec2, heading: f32, params: BoidParams) -> Self {
        // Unit-speed start; steering takes the boid up to max_speed later.
        let velocity = Vec2::new(heading.cos(), heading.sin());

        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            heading: heading + params.base_rotation,
            params,
        }
    }

    pub fn snapshot(&self) -> BoidSnapshot {
        BoidSnapshot {
            position: self.position,
            velocity: self.velocity,
        }
    }

    // Implement Reynolds: Steering = Desired - Velocity, limited to max_force
    fn steer_toward(&self, desired: Vec2) -> Vec2 {
        limit_magnitude(desired - self.velocity, self.params.max_force)
    }

    // Steer towards the average velocity of the neighborhood
    pub fn alignment(&self, boids: &[BoidSnapshot], neighbors: &[usize]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }

        let mut mean_velocity = Vec2::ZERO;
        for &i in neighbors {
            mean_velocity += boids[i].velocity;
        }
        mean_velocity /= neighbors.len() as f32;

        let desired = mean_velocity.normalize_or_zero() * self.params.max_speed;
        if desired == Vec2::ZERO {
            return Vec2::ZERO;
        }
        self.steer_toward(desired)
    }

    // Steer towards the average position of the neighborhood
    pub fn cohesion(&self, boids: &[BoidSnapshot], neighbors: &[usize]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }

        let mut sum_positions = Vec2::ZERO;
        for &i in neighbors {
            sum_positions += boids[i].position;
        }
        let direction = sum_positions / neighbors.len() as f32 - self.position;

        let desired = direction.normalize_or_zero() * self.params.max_speed;
        if desired == Vec2::ZERO {
            return Vec2::ZERO;
        }
        self.steer_toward(desired)
    }

    // Steer away from neighbors inside half the neighborhood radius,
    // weighted by inverse distance so the closest push hardest
    pub fn separation(&self, boids: &[BoidSnapshot], neighbors: &[usize]) -> Vec2 {
        let close_radius = self.params.neighborhood_radius / 2.0;

        let mut direction = Vec2::ZERO;
        let mut count = 0;
        for &i in neighbors {
            let difference = self.position - boids[i].position;
            let distance = difference.length();
            if distance > close_radius {
                continue;
            }
            count += 1;
            // A coincident boid gives no usable direction; it still counts
            // towards the average but contributes nothing.
            if distance > 0.0 {
                direction += difference / (distance * distance);
            }
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        direction /= count as f32;

        let desired = direction.normalize_or_zero() * self.params.max_speed;
        if desired == Vec2::ZERO {
            return Vec2::ZERO;
        }
        self.steer_toward(desired)
    }

    // Blend the three rules into this tick's acceleration
    pub fn flock(&mut self, boids: &[BoidSnapshot], neighbors: &[usize]) {
        let alignment = self.alignment(boids, neighbors);
        let cohesion = self.cohesion(boids, neighbors);
        let separation = self.separation(boids, neighbors);

        self.acceleration = self.params.alignment_weight * alignment
            + self.params.cohesion_weight * cohesion
            + self.params.separation_weight * separation;
    }

    // Integrate one step: velocity under the speed limit, then position,
    // then the display heading
    pub fn integrate(&mut self, delta_time: f32) {
        self.velocity = limit_magnitude(
            self.velocity + self.acceleration,
            self.params.max_speed,
        );
        self.position += self.velocity * delta_time;
        self.heading = heading_of(self.velocity) + self.params.base_rotation;
    }

    // Teleport to the opposite edge when leaving the bounds
    pub fn warp(&mut self, bounds: &Bounds) {
        self.position = bounds.wrap(self.position);
    }

    /// Advance this boid by one tick against the frame-start snapshot.
    /// `neighbors` holds snapshot indices within `neighborhood_radius`,
    /// excluding the boid itself.
    pub fn step(
        &mut self,
        boids: &[BoidSnapshot],
        neighbors: &[usize],
        delta_time: f32,
        bounds: &Bounds,
    ) {
        self.flock(boids, neighbors);
        self.integrate(delta_time);
        self.warp(bounds);
    }
}
