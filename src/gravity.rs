use nalgebra::Vector2;

/// `sqrt(|r|² + softening²)`.
#[must_use]
pub fn softened_distance(r: Vector2<f32>, softening: f32) -> f32 {
    (r.norm_squared() + softening * softening).sqrt()
}

/// Acceleration of a point at `position1` due to `mass2` at `position2`.
///
/// The softening enters twice, once in the distance and once more in the
/// denominator of the magnitude: `G m2 / (d² + s²)` along `r / d`
/// with `d = sqrt(|r|² + s²)`.
/// This is used instead of the force to save on one division by a mass.
#[must_use]
pub fn acceleration(
    position1: Vector2<f32>,
    mass2: f32,
    position2: Vector2<f32>,
    gravity_constant: f32,
    softening: f32,
) -> Vector2<f32> {
    let r = position2 - position1;
    let distance = softened_distance(r, softening);
    let magnitude = gravity_constant * mass2 / (distance * distance + softening * softening);
    r * (magnitude / distance)
}
