//! ledger-grid CLI: extract slash marks from scanned ledger pages into CSV.

use clap::Parser;
use ledger_grid::config::{self, RuntimeConfig};
use ledger_grid::image::io::write_json_file;
use ledger_grid::{collect_inputs, BatchRunner, CsvSink, LedgerDetector, LedgerResult};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ledger-grid")]
#[command(about = "Reconstruct ledger grids and extract slash-marked observations")]
#[command(version)]
struct Cli {
    /// Page images, or directories of page images.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// CSV file to append rows to.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Directory for `<stem>_out.png` review images.
    #[arg(long)]
    overlay_dir: Option<PathBuf>,

    /// Do not write review images.
    #[arg(long)]
    no_overlay: bool,

    /// JSON runtime configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON batch report here.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Worker threads for page extraction (default: all cores).
    #[cfg(feature = "parallel")]
    #[arg(long)]
    jobs: Option<usize>,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> LedgerResult<()> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(csv) = cli.csv {
        cfg.output.csv = csv;
    }
    if let Some(dir) = cli.overlay_dir {
        cfg.output.overlay_dir = dir;
    }
    if cli.no_overlay {
        cfg.output.overlays = false;
    }
    if let Some(report) = cli.report {
        cfg.output.report = Some(report);
    }

    #[cfg(feature = "parallel")]
    {
        if let Some(jobs) = cli.jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
                .map_err(|e| ledger_grid::LedgerError::Config(format!("thread pool: {e}")))?;
        }
    }

    let pages = collect_inputs(&cli.inputs)?;
    let mut sink = CsvSink::append(&cfg.output.csv)?;
    let mut runner = BatchRunner::new(LedgerDetector::new(cfg.params.clone()));
    if cfg.output.overlays {
        runner = runner.with_overlay_dir(cfg.output.overlay_dir.clone());
    }

    let report = runner.run(&pages, &mut sink)?;
    println!(
        "{} pages processed, {} failed, {} rows written to {}",
        report.processed(),
        report.failures.len(),
        report.rows_written,
        cfg.output.csv.display()
    );
    for failure in &report.failures {
        println!("  failed: {} ({})", failure.path.display(), failure.error);
    }
    if let Some(path) = &cfg.output.report {
        write_json_file(path, &report)?;
    }
    Ok(())
}
