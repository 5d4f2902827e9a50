//! NoC congestion simulator
//!
//! Runs a seeded session and prints either a text summary or the full JSON
//! report.

use std::path::PathBuf;

use clap::Parser;
use noc_sim::{
    LbfMetric, MeshCoord, RoutingAlgorithm, SimulationConfig, SimulationSession,
    DEFAULT_MESH_SIZE,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hotspots used when none are given on the command line.
const DEMO_HOTSPOTS: [MeshCoord; 6] = [
    MeshCoord::new(1, 2),
    MeshCoord::new(2, 5),
    MeshCoord::new(3, 4),
    MeshCoord::new(5, 1),
    MeshCoord::new(6, 7),
    MeshCoord::new(7, 3),
];

/// Command-line arguments.
#[derive(Parser)]
#[command(about = "Network-on-Chip congestion simulator")]
struct Cli {
    /// Mesh side length
    #[arg(long, default_value_t = DEFAULT_MESH_SIZE)]
    size: usize,

    /// Cycles to simulate
    #[arg(long, default_value_t = 10)]
    cycles: u64,

    /// RNG seed (overrides the configuration)
    #[arg(long)]
    seed: Option<u64>,

    /// Hotspot router as ROW,COL (repeatable)
    #[arg(long = "hotspot", value_name = "ROW,COL", value_parser = parse_coord)]
    hotspots: Vec<MeshCoord>,

    /// Routing algorithm (overrides the configuration)
    #[arg(long)]
    routing: Option<RoutingAlgorithm>,

    /// LBF metric (overrides the configuration)
    #[arg(long)]
    metric: Option<LbfMetric>,

    /// JSON configuration file; the NOC_* environment is used otherwise
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip the initial hotspot and background congestion
    #[arg(long)]
    no_init: bool,

    /// Print the session report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_coord(s: &str) -> Result<MeshCoord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad column '{col}': {e}"))?;
    Ok(MeshCoord::new(row, col))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noc_sim=info,noc_routing=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::from_env()?,
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(routing) = cli.routing {
        config.traffic.routing = routing;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric;
    }

    let hotspots: Vec<MeshCoord> = if cli.hotspots.is_empty() {
        DEMO_HOTSPOTS
            .into_iter()
            .filter(|c| c.is_within(cli.size))
            .collect()
    } else {
        cli.hotspots.clone()
    };

    let mut session = SimulationSession::with_config(cli.size, config)?;
    session.set_hotspot_area(hotspots)?;
    if !cli.no_init {
        session.initialize_hotspots()?;
        session.initialize_non_hotspots()?;
    }
    info!(lbf = session.compute_lbf(), "initial load balance factor");

    session.run_simulation(cli.cycles)?;

    if cli.json {
        println!("{}", session.report().to_json()?);
        return Ok(());
    }

    let summary = session.summary();
    let stats = session.stats();
    println!(
        "{size}x{size} mesh, {cycles} cycles, routing {routing}, metric {metric}",
        size = session.size(),
        cycles = session.cycle(),
        routing = session.routing_policy(),
        metric = session.metric(),
    );
    println!(
        "congestion min {:.3} mean {:.3} max {:.3} std {:.3}",
        summary.min, summary.mean, summary.max, summary.std_dev
    );
    println!(
        "packets injected {} delivered {} avg hops {:.2}",
        stats.packets_injected,
        stats.packets_delivered,
        stats.average_hops()
    );
    for (cycle, lbf) in session.history().iter().enumerate() {
        println!("cycle {:>4}  lbf {lbf:.4}", cycle + 1);
    }
    Ok(())
}
