//! crowdflow — congestion-aware crowd routing over a floor plan.
//!
//! Loads an ASCII floor plan and a movement file, routes every agent one at
//! a time so later agents avoid cells crowded by earlier ones, and writes:
//!
//! | File              | Contents                                         |
//! |-------------------|--------------------------------------------------|
//! | `routes.csv`      | one row per agent (cost, length, refresh flag)   |
//! | `requests.csv`    | one row per processed request                    |
//! | `occupancy.csv`   | traversal count of every used cell               |
//! | `occupancy.png`   | normalized occupancy, walls white                |
//! | `overlay.png`     | floor plan with congestion in red, last route in blue |
//!
//! Without `--map` the built-in office floor and its movements are used;
//! `--random ROWSxCOLS` generates a seeded random floor instead.

mod floorplan;
mod settings;
mod synthetic;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use memory_stats::memory_stats;
use tracing_subscriber::EnvFilter;

use cf_core::{CellId, Downscale, RequestId, RoutingConfig};
use cf_grid::{Environment, IntensityGrid, ObstacleGrid, OverlayImage};
use cf_movement::{MovementQueue, load_movements, load_movements_reader};
use cf_output::{CsvWriter, OutputWriter, SimOutputObserver, save_occupancy_png, save_overlay_png};
use cf_route::AgentStep;
use cf_sim::{RequestSummary, SimBuilder, SimObserver, SimReport, run_sessions};

use settings::Settings;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "crowdflow", about = "Congestion-aware crowd routing over a floor plan")]
struct Cli {
    /// ASCII floor plan (`#` wall, `.` free).  Built-in demo floor if absent.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Movement file (`start_row:start_col,target_row:target_col,count`).
    #[arg(long, requires = "map")]
    movements: Option<PathBuf>,

    /// Random floor plan of the given size instead of a map file.
    #[arg(long, value_name = "ROWSxCOLS", value_parser = synthetic::parse_dims, conflicts_with = "map")]
    random: Option<(usize, usize)>,

    /// Obstacle probability per cell for `--random`.
    #[arg(long, default_value_t = 0.2)]
    density: f64,

    /// Seed for `--random`.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Requests generated for `--random`.
    #[arg(long, default_value_t = 8)]
    requests: u32,

    /// Agents generated for `--random`, split across the requests.
    #[arg(long, default_value_t = 200)]
    agents: u32,

    /// Output directory.
    #[arg(long, default_value = "output/floorplan")]
    out: PathBuf,

    /// TOML settings file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    weight0: Option<f64>,

    #[arg(long)]
    alpha: Option<f64>,

    /// Heuristic refresh period in agents.
    #[arg(long)]
    modulo: Option<u32>,

    /// Downscale factor or `auto`.
    #[arg(long)]
    downscale: Option<Downscale>,

    /// Grow walls by this many cells.
    #[arg(long)]
    inflate: Option<u32>,

    /// Snap endpoints on walls to the nearest free cell.
    #[arg(long)]
    snap: bool,

    /// Write the tables to `output.db` instead of CSV.
    #[cfg(feature = "sqlite")]
    #[arg(long)]
    sqlite: bool,

    /// Log filter (`error`, `warn`, `info`, `debug`, `trace`); `RUST_LOG`
    /// wins when set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Forwards to the output observer and remembers the last routed path.
struct DemoObserver<W: OutputWriter> {
    inner:      SimOutputObserver<W>,
    last_route: Vec<CellId>,
    routed:     u64,
}

impl<W: OutputWriter> DemoObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, last_route: Vec::new(), routed: 0 }
    }
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_agent_routed(&mut self, request: RequestId, agent: u32, step: &AgentStep) {
        if let Some(route) = &step.route {
            self.last_route.clone_from(&route.cells);
            self.routed += 1;
        }
        self.inner.on_agent_routed(request, agent, step);
    }

    fn on_request_end(&mut self, summary: &RequestSummary) {
        println!(
            "  {:<12} {:>3}:{:<3} → {:>3}:{:<3} {:>6} agents  {:>10.1} cost",
            summary.id.to_string(),
            summary.start.row,
            summary.start.col,
            summary.target.row,
            summary.target.col,
            summary.agents_routed,
            summary.total_cost,
        );
        self.inner.on_request_end(summary);
    }

    fn on_sim_end(&mut self, env: &Environment, report: &SimReport) {
        self.inner.on_sim_end(env, report);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Settings file (if any) with command-line overrides applied.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let routing = &mut settings.routing;
    if let Some(w) = cli.weight0 {
        routing.weight0 = w;
    }
    if let Some(a) = cli.alpha {
        routing.alpha = a;
    }
    if let Some(m) = cli.modulo {
        routing.modulo = m;
    }
    if let Some(d) = cli.downscale {
        routing.downscale = d;
    }
    if let Some(r) = cli.inflate {
        settings.session.inflate = r;
    }
    settings.session.snap_endpoints |= cli.snap;
    settings.routing.validate()?;
    Ok(settings)
}

fn load_inputs(cli: &Cli) -> Result<(ObstacleGrid, MovementQueue)> {
    if let Some(dims) = cli.random {
        return synthetic::generate(dims, cli.density, cli.seed, cli.requests, cli.agents);
    }
    match (&cli.map, &cli.movements) {
        (Some(map), Some(movements)) => {
            let grid = ObstacleGrid::load(map).with_context(|| format!("loading map {}", map.display()))?;
            let queue = load_movements(movements)
                .with_context(|| format!("loading movements {}", movements.display()))?;
            Ok((grid, queue))
        }
        (Some(_), None) => bail!("--map needs --movements"),
        _ => {
            let grid = ObstacleGrid::parse_reader(floorplan::FLOOR_PLAN.as_bytes())?;
            let queue = load_movements_reader(floorplan::MOVEMENTS.as_bytes())?;
            Ok((grid, queue))
        }
    }
}

/// Grayscale occupancy and the red overlay, both at plan resolution.
fn write_images(out: &Path, env: &Environment, factor: u32, last_route: &[CellId]) -> Result<()> {
    let intensity = IntensityGrid::from_environment(env, 1.0);
    save_occupancy_png(&out.join("occupancy.png"), &intensity, factor)?;

    let walls = ObstacleGrid::new(env.rows() as usize, env.cols() as usize, env.blocked_slice().to_vec())?;
    let mut overlay = OverlayImage::from_obstacles(&walls, factor);
    overlay.overlay_occupancy(env);
    overlay.paint_cells(env, last_route, image::Rgb([0, 0, 255]));
    save_overlay_png(&out.join("overlay.png"), &overlay)?;
    Ok(())
}

fn run_sweep(grid: &ObstacleGrid, queue: &MovementQueue, settings: &Settings) {
    let configs: Vec<RoutingConfig> = settings
        .session
        .sweep_alpha
        .iter()
        .map(|&alpha| RoutingConfig { alpha, ..settings.routing.clone() })
        .collect();
    if configs.is_empty() {
        return;
    }

    println!();
    println!("Alpha sweep ({} sessions):", configs.len());
    println!("{:<8} {:>10} {:>10} {:>10}", "alpha", "mean cost", "max count", "cells used");
    println!("{}", "-".repeat(42));
    let opts = &settings.session;
    for result in run_sessions(grid, queue, &configs, opts.inflate, opts.snap_endpoints) {
        match result {
            Ok(session) => {
                let used = session.env.occupancy_slice().iter().filter(|&&c| c > 0).count();
                println!(
                    "{:<8} {:>10.2} {:>10} {:>10}",
                    session.config.alpha,
                    session.report.mean_cost(),
                    session.env.max_count(),
                    used
                );
            }
            Err(e) => eprintln!("sweep session failed: {e}"),
        }
    }
}

fn make_writer(cli: &Cli, out: &Path) -> Result<Box<dyn OutputWriter>> {
    #[cfg(feature = "sqlite")]
    if cli.sqlite {
        return Ok(Box::new(cf_output::SqliteWriter::new(out)?));
    }
    let _ = cli;
    Ok(Box::new(CsvWriter::new(out)?))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    println!("=== crowdflow — congestion-aware crowd routing ===");
    let settings = resolve_settings(&cli)?;
    let (grid, queue) = load_inputs(&cli)?;
    println!(
        "Floor plan: {}x{} ({} walls)  |  Requests: {}  |  Agents: {}",
        grid.rows(),
        grid.cols(),
        grid.obstacle_count(),
        queue.len(),
        queue.total_agents()
    );
    let routing = &settings.routing;
    println!(
        "weight0 = {}  alpha = {}  modulo = {}  downscale = {}",
        routing.weight0, routing.alpha, routing.modulo, routing.downscale
    );
    println!();

    // 1. Build the session.
    let mut sim = SimBuilder::new(settings.routing.clone(), grid.clone())
        .requests(queue.clone())
        .inflate(settings.session.inflate)
        .snap_endpoints(settings.session.snap_endpoints)
        .build()?;
    println!(
        "Routing grid: {}x{} (factor {})  |  mem {:.1} MB",
        sim.env.rows(),
        sim.env.cols(),
        sim.factor,
        mem_mb()
    );

    // 2. Output.
    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;
    let writer = make_writer(&cli, &cli.out)?;
    let mut obs = DemoObserver::new(SimOutputObserver::new(writer));

    // 3. Run.
    let t0 = Instant::now();
    let report = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    write_images(&cli.out, &sim.env, sim.factor, &obs.last_route)?;

    // 4. Summary.
    println!();
    println!("Routing complete in {:.3} s ({} agents)", elapsed.as_secs_f64(), obs.routed);
    println!("  {report}");
    println!("  max count {}  |  traversals {}", sim.env.max_count(), sim.env.total_traversals());
    println!("  output in {}  |  mem {:.1} MB", cli.out.display(), mem_mb());

    run_sweep(&grid, &queue, &settings);

    Ok(())
}
