//! Semi-implicit (symplectic) Euler.
//!
//! Within one tick the velocity is updated first and the position then moves
//! with the new velocity:
//! v_(i + 1) = v_i + a_i dt
//! x_(i + 1) = x_i + v_(i + 1) dt
//!
//! Points are neither clamped to the world nor collided.

use nalgebra::Vector2;

use crate::Point;

pub fn kick(point: &mut Point, acceleration: Vector2<f32>, time_step: f32) {
    point.velocity += acceleration * time_step;
}

/// Move `point` along its (already kicked) velocity.
pub fn step(point: &mut Point, time_step: f32) {
    point.position += point.velocity * time_step;
}

pub fn advance(point: &mut Point, acceleration: Vector2<f32>, time_step: f32) {
    kick(point, acceleration, time_step);
    step(point, time_step);
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn velocity_before_position() {
        let mut point = Point::new(1., Vector2::new(1., 1.), Vector2::new(1., 0.));
        advance(&mut point, Vector2::new(0., 2.), 0.5);

        assert_abs_diff_eq!(point.velocity, Vector2::new(1., 1.));
        assert_abs_diff_eq!(point.position, Vector2::new(1.5, 1.5));
    }

    #[test]
    fn leaves_the_world_unclamped() {
        let mut point = Point::new(1., Vector2::new(799., 0.), Vector2::new(10., 0.));
        step(&mut point, 1.);

        assert_abs_diff_eq!(point.position, Vector2::new(809., 0.));
    }
}
