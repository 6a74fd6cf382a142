//! Random initial conditions.

use std::f32::consts::FRAC_PI_2;

use nalgebra::Vector2;
use rand::{rngs::ThreadRng, Rng};
use rand_distr::{Distribution, Uniform};

use crate::{Point, Rect};

pub trait ParticleCreator {
    fn create_particle(&mut self) -> Point;

    fn create_particles(&mut self, n: usize) -> Vec<Point> {
        (0..n).map(|_| self.create_particle()).collect()
    }
}

/// Sample masses, positions, and velocities (per component) from distributions.
pub struct DistrParticleCreator<R, MD, PD, VD>
where
    R: Rng,
    MD: Distribution<f32>,
    PD: Distribution<f32>,
    VD: Distribution<f32>,
{
    rng: R,
    mass_distr: MD,
    position_distr: PD,
    velocity_distr: VD,
}

impl<MD, PD, VD> DistrParticleCreator<ThreadRng, MD, PD, VD>
where
    MD: Distribution<f32>,
    PD: Distribution<f32>,
    VD: Distribution<f32>,
{
    pub fn new(mass_distr: MD, position_distr: PD, velocity_distr: VD) -> Self {
        Self::rng(mass_distr, position_distr, velocity_distr, rand::thread_rng())
    }
}

impl<R, MD, PD, VD> DistrParticleCreator<R, MD, PD, VD>
where
    R: Rng,
    MD: Distribution<f32>,
    PD: Distribution<f32>,
    VD: Distribution<f32>,
{
    pub fn rng(mass_distr: MD, position_distr: PD, velocity_distr: VD, rng: R) -> Self {
        Self {
            rng,
            mass_distr,
            position_distr,
            velocity_distr,
        }
    }
}

impl<R, MD, PD, VD> ParticleCreator for DistrParticleCreator<R, MD, PD, VD>
where
    R: Rng,
    MD: Distribution<f32>,
    PD: Distribution<f32>,
    VD: Distribution<f32>,
{
    fn create_particle(&mut self) -> Point {
        let rng = &mut self.rng;

        let m = self.mass_distr.sample(rng);
        let pos = Vector2::new(
            self.position_distr.sample(rng),
            self.position_distr.sample(rng),
        );
        let vel = Vector2::new(
            self.velocity_distr.sample(rng),
            self.velocity_distr.sample(rng),
        );

        Point::new(m, pos, vel)
    }
}

/// Equal masses spread uniformly over the world, all circling its center.
///
/// Every point starts with unit speed, perpendicular to the line to the center.
pub struct DiscParticleCreator<R: Rng> {
    rng: R,
    mass: f32,
    x_distr: Uniform<f32>,
    y_distr: Uniform<f32>,
    center: Vector2<f32>,
}

impl DiscParticleCreator<ThreadRng> {
    #[must_use]
    pub fn new(world: Rect, mass: f32) -> Self {
        Self::rng(world, mass, rand::thread_rng())
    }
}

impl<R: Rng> DiscParticleCreator<R> {
    pub fn rng(world: Rect, mass: f32, rng: R) -> Self {
        let far = world.origin + world.size;
        Self {
            rng,
            mass,
            x_distr: Uniform::new(world.origin.x, far.x),
            y_distr: Uniform::new(world.origin.y, far.y),
            center: world.center(),
        }
    }
}

impl<R: Rng> ParticleCreator for DiscParticleCreator<R> {
    fn create_particle(&mut self) -> Point {
        let pos = Vector2::new(
            self.x_distr.sample(&mut self.rng),
            self.y_distr.sample(&mut self.rng),
        );

        let to_center = self.center - pos;
        let angle = to_center.y.atan2(to_center.x) - FRAC_PI_2;
        let vel = Vector2::new(angle.cos(), angle.sin());

        Point::new(self.mass, pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn disc_inside_world_and_tangential() {
        let world = Rect::new(0., 0., 800., 800.);
        let mut creator = DiscParticleCreator::rng(world, 1., StdRng::seed_from_u64(0));
        let points = creator.create_particles(1000);

        assert_eq!(points.len(), 1000);
        for p in &points {
            assert!(world.contains(&p.position));
            assert_eq!(p.mass, 1.);
            assert_abs_diff_eq!(p.velocity.norm(), 1., epsilon = 1e-5);
            let radial = (world.center() - p.position).normalize();
            assert_abs_diff_eq!(p.velocity.dot(&radial), 0., epsilon = 1e-4);
        }
    }

    #[test]
    fn distributions() {
        let mut creator = DistrParticleCreator::rng(
            Uniform::new(1f32, 2.),
            Uniform::new(-5f32, 5.),
            Uniform::new(-0.1f32, 0.1),
            StdRng::seed_from_u64(1),
        );

        for p in creator.create_particles(100) {
            assert!((1. ..2.).contains(&p.mass));
            assert!(p.position.iter().all(|x| (-5. ..5.).contains(x)));
            assert!(p.velocity.iter().all(|v| (-0.1..0.1).contains(v)));
        }
    }
}
