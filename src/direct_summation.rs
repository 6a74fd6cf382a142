//! Brute-force O(N²) accelerations, the reference the quadtree is checked against.

use nalgebra::Vector2;

use crate::{gravity, Parameters, Point};

/// Acceleration of every point due to all others, with the same softened kernel as the tree.
///
/// Points on the same spot don't act on each other.
#[must_use]
pub fn accelerations(points: &[Point], parameters: &Parameters) -> Vec<Vector2<f32>> {
    points
        .iter()
        .map(|p1| {
            let mut acc = Vector2::zeros();
            for p2 in points {
                if p1.position == p2.position {
                    continue;
                }
                acc += gravity::acceleration(
                    p1.position,
                    p2.mass,
                    p2.position,
                    parameters.gravity_constant,
                    parameters.softening,
                );
            }
            acc
        })
        .collect()
}
