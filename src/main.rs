#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flashgrid::{EnergyGrid, FlashEngine};

#[inline(always)]
fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    let end = Instant::now();
    (result, end - start)
}

trait ReadString: Read {
    fn read_string(&mut self) -> io::Result<String> {
        let mut data = String::new();
        self.read_to_string(&mut data).map(|_| data)
    }
}

impl<T: Read> ReadString for T {}

/// Simulate a grid of flashing energy levels.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Grid file, one line of digits per row. Reads stdin if absent or "-".
    input: Option<PathBuf>,

    /// Number of ticks to sum flashes over.
    #[arg(long, default_value_t = 100)]
    ticks: usize,

    /// Give up looking for a synchronized flash after this many ticks.
    #[arg(long, default_value_t = 2000)]
    max_ticks: usize,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => io::stdin()
            .read_string()
            .context("failed to read grid from stdin"),
    }
}

fn solve(args: Args) -> anyhow::Result<()> {
    let input = read_input(args.input.as_ref())?;

    let (grid, duration) = timed(|| input.parse::<EnergyGrid>());
    let grid = grid.context("failed to parse grid")?;
    let dimensions = grid.dimensions();
    info!(
        rows = dimensions.rows.0,
        columns = dimensions.columns.0,
        ?duration,
        "parsed grid"
    );

    let (flashes, duration) = timed(|| FlashEngine::new(grid.clone()).total_flashes(args.ticks));
    let flashes = flashes.context("simulation failed")?;
    info!(ticks = args.ticks, flashes, ?duration, "summed flashes");
    println!("{}", flashes);

    let (tick, duration) = timed(|| FlashEngine::new(grid).first_synchrony(args.max_ticks));
    let tick = tick.context("simulation failed")?;
    info!(tick, ?duration, "found synchronized flash");
    println!("{}", tick);

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let (result, duration) = timed(move || solve(args));
    info!(?duration, "total duration");

    result
}
