/*
 * Vector Helpers Module
 *
 * Thin extensions over glam's Vec2 for the steering math. Arithmetic,
 * distance and zero-safe normalization come from glam itself; this module
 * holds the magnitude limiting and heading extraction the rules share.
 */

use glam::Vec2;

// Rescale a vector down to `max_magnitude` when it is longer than that.
#[inline]
pub fn limit_magnitude(v: Vec2, max_magnitude: f32) -> Vec2 {
    let length_squared = v.length_squared();
    if length_squared > max_magnitude * max_magnitude {
        v * (max_magnitude / length_squared.sqrt())
    } else {
        v
    }
}

// Angle of a vector against the +x axis, in radians.
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn limit_magnitude_leaves_short_vectors_alone() {
        let v = Vec2::new(0.375, -0.5);
        assert_eq!(limit_magnitude(v, 1.0), v);
        // A vector exactly at the limit is unchanged too.
        assert_eq!(limit_magnitude(v, 0.625), v);
    }

    #[test]
    fn limit_magnitude_rescales_long_vectors() {
        let limited = limit_magnitude(Vec2::new(3.0, 4.0), 2.0);
        assert_relative_eq!(limited.length(), 2.0, epsilon = 1e-6);
        assert_relative_eq!(limited.x, 1.2, epsilon = 1e-6);
        assert_relative_eq!(limited.y, 1.6, epsilon = 1e-6);
    }

    #[test]
    fn limit_magnitude_keeps_zero_vector_zero() {
        assert_eq!(limit_magnitude(Vec2::ZERO, 1.0), Vec2::ZERO);
        assert_eq!(limit_magnitude(Vec2::new(1.0, 1.0), 0.0), Vec2::ZERO);
    }

    #[test]
    fn heading_of_cardinal_directions() {
        assert_relative_eq!(heading_of(Vec2::X), 0.0);
        assert_relative_eq!(heading_of(Vec2::Y), FRAC_PI_2);
        assert_relative_eq!(heading_of(-Vec2::X), PI);
        assert_relative_eq!(heading_of(-Vec2::Y), -FRAC_PI_2);
    }
}
