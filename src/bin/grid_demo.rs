//! Run line detection and the cell lattice on one image and print a summary.

use clap::Parser;
use ledger_grid::detector::ExtractParams;
use ledger_grid::diagnostics::TimingBreakdown;
use ledger_grid::image::io::{load_grayscale_image, write_json_file};
use ledger_grid::lines::EdgePolicy;
use ledger_grid::types::Line;
use ledger_grid::{config, Grid, LedgerResult};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "grid_demo")]
#[command(about = "Detect rule lines and build the cell lattice of one image")]
struct Args {
    /// Input image.
    image: PathBuf,

    /// Write the summary as JSON here.
    #[arg(long)]
    json: Option<PathBuf>,

    /// JSON runtime configuration; only its parameters are used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not synthesize border rules.
    #[arg(long)]
    no_edges: bool,
}

#[derive(Serialize)]
struct GridSummary {
    width: usize,
    height: usize,
    horizontal: Vec<Line>,
    vertical: Vec<Line>,
    rows: usize,
    cols: usize,
    timing: TimingBreakdown,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> LedgerResult<()> {
    let params = match &args.config {
        Some(path) => config::load_config(path)?.params,
        None => ExtractParams::default(),
    };
    let edges = if args.no_edges {
        EdgePolicy::NONE
    } else {
        EdgePolicy::BOTH
    };

    let start = Instant::now();
    let mut timing = TimingBreakdown::default();
    let gray = timing.time("load", || load_grayscale_image(&args.image))?;
    let mut grid = Grid::from_gray(&gray);
    timing.time("detect_lines", || grid.detect_lines(&params.lines, edges, edges));
    timing.time("build_cells", || grid.build_cells(&params.cells))?;
    timing.total_ms = start.elapsed().as_secs_f64() * 1000.0;

    let summary = GridSummary {
        width: grid.width(),
        height: grid.height(),
        horizontal: grid.horizontal().lines().to_vec(),
        vertical: grid.vertical().lines().to_vec(),
        rows: grid.rows(),
        cols: grid.cols(),
        timing,
    };
    print_text_summary(&summary);
    if let Some(path) = &args.json {
        write_json_file(path, &summary)?;
        println!("\nJSON report written to {}", path.display());
    }
    Ok(())
}

fn print_text_summary(summary: &GridSummary) {
    println!("Grid summary");
    println!("  image: {}x{}", summary.width, summary.height);
    println!("  horizontal rules: {}", summary.horizontal.len());
    for line in &summary.horizontal {
        println!("    y {} -> {}", line.p0.y, line.p1.y);
    }
    println!("  vertical rules: {}", summary.vertical.len());
    for line in &summary.vertical {
        println!("    x {} -> {}", line.p0.x, line.p1.x);
    }
    println!("  cells: {} rows x {} cols", summary.rows, summary.cols);
    println!("Timings (ms)");
    for stage in &summary.timing.stages {
        println!("  {:<14} {:>8.2}", stage.label, stage.elapsed_ms);
    }
    println!("  {:<14} {:>8.2}", "total", summary.timing.total_ms);
}
