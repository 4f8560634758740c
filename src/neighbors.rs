/*
 * Neighbor Query Module
 *
 * This module answers "which boids are within radius R of boid A,
 * excluding A itself" over the tick's position snapshot. Two
 * implementations share one trait: a brute-force scan, and a uniform grid
 * that buckets boids by cell so a query only distance-checks the cells a
 * circle of the given radius can touch. Both return the same set.
 */

use glam::Vec2;

use crate::world::Bounds;

/// Radius query over the positions captured at the start of a tick.
pub trait NeighborIndex {
    /// Refresh internal structures from this tick's positions.
    fn rebuild(&mut self, positions: &[Vec2]);

    /// Collect into `out` the index of every boid whose distance to boid
    /// `me` is at most `radius`, excluding `me` itself.
    fn neighbors_within(
        &self,
        me: usize,
        positions: &[Vec2],
        radius: f32,
        out: &mut Vec<usize>,
    );
}

/// O(n) scan over the whole population.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceIndex;

impl NeighborIndex for BruteForceIndex {
    fn rebuild(&mut self, _positions: &[Vec2]) {}

    fn neighbors_within(
        &self,
        me: usize,
        positions: &[Vec2],
        radius: f32,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let origin = positions[me];
        let radius_squared = radius * radius;
        for (i, &position) in positions.iter().enumerate() {
            if i != me && origin.distance_squared(position) <= radius_squared {
                out.push(i);
            }
        }
    }
}

/// Uniform grid over the world rectangle. Positions outside the bounds
/// land in the nearest edge cell, so spawn overshoot stays queryable.
#[derive(Debug, Clone)]
pub struct UniformGridIndex {
    origin: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl UniformGridIndex {
    pub fn new(bounds: &Bounds, cell_size: f32) -> Self {
        let extent = bounds.max - bounds.min;
        let cols = (extent.x / cell_size).ceil().max(1.0) as usize;
        let rows = (extent.y / cell_size).ceil().max(1.0) as usize;

        Self {
            origin: bounds.min,
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    // Convert world coordinates to grid cell coordinates
    #[inline]
    fn cell_coords(&self, position: Vec2) -> (usize, usize) {
        let x = ((position.x - self.origin.x) / self.cell_size)
            .clamp(0.0, self.cols as f32 - 1.0) as usize;
        let y = ((position.y - self.origin.y) / self.cell_size)
            .clamp(0.0, self.rows as f32 - 1.0) as usize;
        (x, y)
    }
}

impl NeighborIndex for UniformGridIndex {
    fn rebuild(&mut self, positions: &[Vec2]) {
        for cell in &mut self.cells {
            cell.clear();
        }
        for (i, &position) in positions.iter().enumerate() {
            let (x, y) = self.cell_coords(position);
            self.cells[y * self.cols + x].push(i);
        }
    }

    fn neighbors_within(
        &self,
        me: usize,
        positions: &[Vec2],
        radius: f32,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let origin = positions[me];
        let radius_squared = radius * radius;
        let (cell_x, cell_y) = self.cell_coords(origin);

        // Cells a circle of `radius` can touch. One extra ring covers the
        // clamping of out-of-bounds positions into edge cells.
        let reach = (radius / self.cell_size).ceil() as isize + 1;
        let x_min = (cell_x as isize - reach).max(0) as usize;
        let x_max = (cell_x as isize + reach).min(self.cols as isize - 1) as usize;
        let y_min = (cell_y as isize - reach).max(0) as usize;
        let y_max = (cell_y as isize + reach).min(self.rows as isize - 1) as usize;

        for y in y_min..=y_max {
            let row_start = y * self.cols;
            for x in x_min..=x_max {
                for &i in &self.cells[row_start + x] {
                    if i != me
                        && origin.distance_squared(positions[i]) <= radius_squared
                    {
                        out.push(i);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn collect<I: NeighborIndex>(
        index: &I,
        me: usize,
        positions: &[Vec2],
        radius: f32,
    ) -> Vec<usize> {
        let mut out = Vec::new();
        index.neighbors_within(me, positions, radius, &mut out);
        out.sort_unstable();
        out
    }

    #[test]
    fn brute_force_excludes_the_querying_boid() {
        let positions = [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let index = BruteForceIndex;
        let neighbors = collect(&index, 0, &positions, 10.0);
        assert_eq!(neighbors, vec![1, 2]);
    }

    #[test]
    fn radius_is_inclusive() {
        let positions = [Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(3.1, 0.0)];
        let index = BruteForceIndex;
        assert_eq!(collect(&index, 0, &positions, 3.0), vec![1]);
    }

    #[test]
    fn coincident_boids_see_each_other() {
        let positions = [Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0)];
        let index = BruteForceIndex;
        assert_eq!(collect(&index, 0, &positions, 1.0), vec![1]);
        assert_eq!(collect(&index, 1, &positions, 1.0), vec![0]);
    }

    #[test]
    fn grid_matches_brute_force_on_random_populations() {
        let bounds = Bounds::default();
        let mut rng = StdRng::seed_from_u64(7);
        let positions: Vec<Vec2> = (0..200)
            .map(|_| {
                Vec2::new(
                    rng.gen_range(bounds.min.x..bounds.max.x),
                    rng.gen_range(bounds.min.y..bounds.max.y),
                )
            })
            .collect();

        let brute = BruteForceIndex;
        for &radius in &[0.5, 1.5, 3.0, 9.0] {
            let mut grid = UniformGridIndex::new(&bounds, 3.0);
            grid.rebuild(&positions);
            for me in 0..positions.len() {
                assert_eq!(
                    collect(&grid, me, &positions, radius),
                    collect(&brute, me, &positions, radius),
                    "radius {radius}, boid {me}"
                );
            }
        }
    }

    #[test]
    fn grid_finds_neighbors_clamped_in_from_outside_the_bounds() {
        let bounds = Bounds::default();
        // One boid just outside the right edge, one just inside.
        let positions = [Vec2::new(14.4, 0.0), Vec2::new(13.8, 0.0)];
        let mut grid = UniformGridIndex::new(&bounds, 3.0);
        grid.rebuild(&positions);

        assert_eq!(collect(&grid, 0, &positions, 1.0), vec![1]);
        assert_eq!(collect(&grid, 1, &positions, 1.0), vec![0]);
    }
}
