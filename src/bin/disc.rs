//! Headless run of a rotating disc of points.
//!
//! Usage: `disc [num_points] [num_ticks]`, logging goes through `RUST_LOG`.

use std::time::Instant;

use color_eyre::eyre::{eyre, WrapErr};
use quad_barnes_hut::{
    creator::{DiscParticleCreator, ParticleCreator},
    Parameters, Rect, Simulation,
};

const NUM_POINTS: usize = 16_000;
const NUM_TICKS: usize = 600;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let num_points = match args.next() {
        Some(arg) => arg
            .parse()
            .wrap_err_with(|| format!("invalid number of points {arg:?}"))?,
        None => NUM_POINTS,
    };
    let num_ticks: usize = match args.next() {
        Some(arg) => arg
            .parse()
            .wrap_err_with(|| format!("invalid number of ticks {arg:?}"))?,
        None => NUM_TICKS,
    };
    if num_points == 0 {
        return Err(eyre!("need at least one point"));
    }

    let world = Rect::new(0., 0., 800., 800.);
    let points = DiscParticleCreator::new(world, 1.).create_particles(num_points);
    let mut simulation = Simulation::new(points, world, Parameters::default()).rayon_iter();
    log::info!(
        "simulating {num_points} points for {num_ticks} ticks ({:?})",
        simulation.execution()
    );

    let mut fps_sum = 0.;
    for tick in 0..num_ticks {
        let start = Instant::now();
        let report = simulation.step();
        let dt = start.elapsed().as_secs_f32();

        fps_sum += 1. / dt;
        log::info!(
            "tick {tick}: {:.2} fps ({:.2} avg), {} nodes, {} dropped",
            1. / dt,
            fps_sum / (tick + 1) as f32,
            report.nodes,
            report.dropped
        );
    }

    let remaining = simulation
        .points()
        .iter()
        .filter(|p| world.contains(&p.position))
        .count();
    log::info!("{remaining} of {num_points} points still inside the world");

    Ok(())
}
