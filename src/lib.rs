/*
 * 2D Flocking Simulation Core - Module Definitions
 *
 * This file defines the module structure for the flocking library.
 * The crate owns the boids, the steering rules and the simulation tick;
 * rendering and input belong to the host application driving it.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidSnapshot};
pub use neighbors::{BruteForceIndex, NeighborIndex, UniformGridIndex};
pub use params::{BoidParams, ConfigError, SpawnConfig};
pub use world::{BoidId, Bounds, FlockStats, World};

// Define modules
pub mod boid;
pub mod neighbors;
pub mod params;
pub mod vec2;
pub mod world;

// Constants
pub const WORLD_HALF_WIDTH: f32 = 14.0;
pub const WORLD_HALF_HEIGHT: f32 = 8.0;
