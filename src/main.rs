use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glam::IVec2;

use regolith::config::SimConfig;
use regolith::headless;
use regolith::simulation::{Material, Simulation};
use regolith::world::Rgba;

/// Headless falling-sand demo: pours sand and water over a seeded floor,
/// then optionally writes the final frame as a PPM image.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON config preset (built-in 700x500 sandbox when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// RNG seed (drawn from entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final color snapshot to this path as binary PPM
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut simulation = Simulation::new(config);
    let width = simulation.grid().width() as i32;
    let height = simulation.grid().height() as i32;

    // A footprint stamp near the ceiling, the way a dropped image would
    // arrive from the input boundary.
    let block_width = (width / 8).max(1) as u32;
    let block_height = (height / 16).max(1) as u32;
    let block_colors: Vec<Rgba> = (0..block_width * block_height)
        .map(|i| [(i % 200) as u8 + 55, 96, 64, 255])
        .collect();
    simulation.place_footprint(
        IVec2::new(width / 2 - block_width as i32 / 2, height / 12),
        block_width,
        block_height,
        &block_colors,
    );

    // Scripted brush standing in for pointer input: a sand stroke
    // sweeping left to right, switching to water halfway through.
    let started = Instant::now();
    for frame in 0..args.frames {
        if frame == args.frames / 2 {
            simulation.set_brush_material(Material::Water);
        }
        if frame % 4 == 0 {
            let t = frame as f32 / args.frames.max(1) as f32;
            let x = ((t * (width - 1) as f32) as i32).clamp(0, width - 1);
            simulation.paint(IVec2::new(x, height / 4));
        }
        simulation.step_frame();
    }
    let elapsed = started.elapsed();

    let grid = simulation.grid();
    log::info!(
        "Simulated {} frames in {:.2?} ({} sand, {} water, {} wall cells)",
        args.frames,
        elapsed,
        grid.count_material(Material::Sand),
        grid.count_material(Material::Water),
        grid.count_material(Material::Wall),
    );

    if let Some(path) = &args.out {
        let colors = simulation.snapshot_colors();
        headless::write_ppm(path, grid.width(), grid.height(), &colors)?;
        log::info!("Wrote snapshot to {}", path.display());
    }

    Ok(())
}
