//! Barnes-Hut approximation of inverse-square forces in two dimensions.
//!
//! Every tick a [`Quadtree`] is built over the current points, masses are aggregated
//! bottom-up and each point is accelerated by walking the tree, treating far away
//! cells as a single mass at their center of mass.
//! Velocities and then positions are updated with a fixed time step.

#[cfg(feature = "randomization")]
pub mod creator;
pub mod direct_summation;
pub mod gravity;
pub mod integrator;
mod parameters;
mod point;
pub mod quadtree;
mod rect;

#[cfg(not(feature = "rayon"))]
use std::num::NonZeroUsize;
use std::thread;

use nalgebra::Vector2;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub use parameters::Parameters;
pub use point::{Point, PointMass};
pub use quadtree::{Interactions, Node, Quadtree};
pub use rect::Rect;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    SingleThreaded,
    /// Scoped threads, each updating its own chunk of the points.
    Multithreaded {
        num_threads: usize,
    },
    #[cfg(feature = "rayon")]
    RayonIter,
}

impl Execution {
    /// The best parallel strategy compiled in.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn parallel() -> Self {
        Execution::RayonIter
    }

    /// The best parallel strategy compiled in.
    #[cfg(not(feature = "rayon"))]
    #[must_use]
    pub fn parallel() -> Self {
        Execution::Multithreaded {
            num_threads: thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

/// Outcome of one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub inserted: usize,
    /// Points outside of the world, they neither exerted nor felt any force.
    pub dropped: usize,
    pub nodes: usize,
}

/// Advance `points` by one tick.
///
/// A fresh tree over `world` is built and aggregated, then every point gets
/// its velocity kicked by the tree's acceleration and moves with the new velocity.
/// The force evaluation runs in parallel.
pub fn build_and_evaluate(points: &mut [Point], world: Rect, parameters: &Parameters) -> TickReport {
    let mut tree = Quadtree::new(world, parameters.max_depth);
    tick(&mut tree, points, world, parameters, Execution::parallel())
}

fn tick(
    tree: &mut Quadtree,
    points: &mut [Point],
    world: Rect,
    parameters: &Parameters,
    execution: Execution,
) -> TickReport {
    tree.rebuild(points, world);
    let tree = &*tree;

    // The tree holds snapshots, so points can move while others are still evaluated.
    let update = |point: &mut Point| {
        let acc = tree.acceleration(&point.point_mass(), parameters);
        integrator::advance(point, acc, parameters.time_step);
    };

    match execution {
        Execution::SingleThreaded => points.iter_mut().for_each(update),
        Execution::Multithreaded { num_threads } => {
            let chunk_size = points.len().div_ceil(num_threads).max(1);
            thread::scope(|s| {
                for chunk in points.chunks_mut(chunk_size) {
                    s.spawn(move || chunk.iter_mut().for_each(update));
                }
            });
        }
        #[cfg(feature = "rayon")]
        Execution::RayonIter => points.par_iter_mut().for_each(update),
    }

    TickReport {
        inserted: tree.inserted(),
        dropped: tree.dropped(),
        nodes: tree.len(),
    }
}

/// A set of points in a fixed world, stepped tick by tick.
///
/// The quadtree arena is kept between ticks so its allocation is reused,
/// but it is rebuilt from scratch every tick.
#[derive(Clone, Debug)]
pub struct Simulation {
    points: Vec<Point>,
    world: Rect,
    parameters: Parameters,
    execution: Execution,
    tree: Quadtree,
}

impl Simulation {
    #[must_use]
    pub fn new(points: Vec<Point>, world: Rect, parameters: Parameters) -> Self {
        Self {
            points,
            world,
            parameters,
            execution: Execution::SingleThreaded,
            tree: Quadtree::new(world, parameters.max_depth),
        }
    }

    /// Evaluate forces with `num_threads` scoped threads.
    #[must_use]
    pub fn multithreaded(mut self, num_threads: usize) -> Self {
        assert!(num_threads > 0, "need at least one thread");
        self.execution = Execution::Multithreaded { num_threads };
        self
    }

    /// Use Rayon to evaluate the forces on multiple threads.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn rayon_iter(mut self) -> Self {
        self.execution = Execution::RayonIter;
        self
    }

    #[must_use]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    #[must_use]
    pub fn world(&self) -> Rect {
        self.world
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The tree of the last tick.
    #[must_use]
    pub fn tree(&self) -> &Quadtree {
        &self.tree
    }

    pub fn step(&mut self) -> TickReport {
        let report = tick(
            &mut self.tree,
            &mut self.points,
            self.world,
            &self.parameters,
            self.execution,
        );
        log::trace!("tick done: {report:?}");
        report
    }

    /// Run `num_steps` ticks and return the positions after each one,
    /// starting with the initial positions.
    pub fn simulate(&mut self, num_steps: usize) -> Vec<Vec<Vector2<f32>>> {
        let mut positions = Vec::with_capacity(num_steps + 1);
        positions.push(self.positions());

        for _ in 0..num_steps {
            self.step();
            positions.push(self.positions());
        }

        positions
    }

    fn positions(&self) -> Vec<Vector2<f32>> {
        self.points.iter().map(|p| p.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_points(n: usize, seed: u64) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                Point::new(
                    1.,
                    Vector2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..800.0)),
                    Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
                )
            })
            .collect()
    }

    #[test]
    fn two_points_one_tick() {
        let mut points = vec![
            Point::at_rest(1., Vector2::new(0., 0.)),
            Point::at_rest(1., Vector2::new(100., 0.)),
        ];
        let world = Rect::new(-400., -400., 800., 800.);
        let params = Parameters::default();

        let report = build_and_evaluate(&mut points, world, &params);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.dropped, 0);

        let dv0 = points[0].velocity;
        let dv1 = points[1].velocity;
        assert_eq!(dv0.y, 0.);
        assert_eq!(dv1.y, 0.);
        assert!(dv0.x > 0.);
        assert_abs_diff_eq!(dv0, -dv1);

        let distance = (100f32 * 100. + 15. * 15.).sqrt();
        let expected = 100. / distance * 0.1 / (distance * distance + 15. * 15.);
        assert_relative_eq!(dv0.x, expected, max_relative = 1e-5);
        // within a few percent of the bare G m m / (r² + s²)
        assert_relative_eq!(dv0.x, 0.1 / (100. * 100. + 15. * 15.), max_relative = 0.05);

        // positions move with the new velocity
        assert_abs_diff_eq!(points[0].position, dv0);
        assert_abs_diff_eq!(points[1].position, Vector2::new(100., 0.) + dv1);
    }

    #[test]
    fn point_outside_world_is_dropped() {
        let mut points = vec![
            Point::at_rest(1., Vector2::new(400., 400.)),
            Point::at_rest(1., Vector2::new(410., 400.)),
            Point::new(1., Vector2::new(900., 900.), Vector2::new(1., 0.)),
        ];
        let world = Rect::new(0., 0., 800., 800.);

        let mut alone = points[..2].to_vec();
        build_and_evaluate(&mut alone, world, &Parameters::default());
        let report = build_and_evaluate(&mut points, world, &Parameters::default());

        assert_eq!(report.dropped, 1);
        assert_eq!(report.inserted, 2);
        // exerts nothing
        assert_eq!(points[..2], alone[..]);
        // feels nothing, still drifts
        assert_eq!(points[2].velocity, Vector2::new(1., 0.));
        assert_eq!(points[2].position, Vector2::new(901., 900.));
    }

    #[test]
    fn executions_agree() {
        let points = random_points(300, 11);
        let world = Rect::new(-200., -200., 1200., 1200.);
        let params = Parameters::default();

        let mut single = Simulation::new(points.clone(), world, params);
        let mut multi = Simulation::new(points, world, params).multithreaded(3);
        assert_eq!(multi.execution(), Execution::Multithreaded { num_threads: 3 });

        let pos_single = single.simulate(5);
        let pos_multi = multi.simulate(5);

        assert_eq!(pos_single, pos_multi);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn rayon_agrees() {
        let points = random_points(300, 12);
        let world = Rect::new(-200., -200., 1200., 1200.);

        let mut single = Simulation::new(points.clone(), world, Parameters::default());
        let mut rayon = Simulation::new(points, world, Parameters::default()).rayon_iter();

        assert_eq!(single.simulate(5), rayon.simulate(5));
    }

    #[test]
    fn more_threads_than_points() {
        let world = Rect::new(0., 0., 800., 800.);
        let mut sim = Simulation::new(random_points(3, 13), world, Parameters::default())
            .multithreaded(8);
        let report = sim.step();

        assert_eq!(report.inserted + report.dropped, 3);
    }

    #[test]
    fn symmetric_pair_stays_symmetric() {
        let points = vec![
            Point::at_rest(10., Vector2::new(350., 400.)),
            Point::at_rest(10., Vector2::new(450., 400.)),
        ];
        let world = Rect::new(0., 0., 800., 800.);
        let mut sim = Simulation::new(points, world, Parameters::default());

        let positions = sim.simulate(20);
        assert_eq!(positions.len(), 21);
        assert_eq!(positions[0][0], Vector2::new(350., 400.));

        let first = &positions[1];
        assert!(first[0].x > 350.);
        assert!(first[1].x < 450.);

        let last = &positions[20];
        assert_relative_eq!(last[0].x - 400., 400. - last[1].x, max_relative = 1e-4);
        for p in last {
            assert_eq!(p.y, 400.);
        }
    }

    #[test]
    fn tree_is_rebuilt_every_tick() {
        let world = Rect::new(-100., -100., 1000., 1000.);
        let mut sim = Simulation::new(random_points(50, 14), world, Parameters::default());

        sim.step();
        assert_eq!(sim.tree().inserted(), 50);

        sim.points_mut()[0].position = Vector2::new(-500., -500.);
        let report = sim.step();
        assert_eq!(report.dropped, 1);
        assert_eq!(sim.tree().inserted(), 49);
        assert_relative_eq!(sim.tree().root().total_mass, 49., max_relative = 1e-5);
    }
}
