//! Batch driver: many pages, one CSV, failures isolated per page.
//!
//! Pages are extracted independently and their rows are appended to the CSV
//! in input order, a page at a time. A page that fails is logged and listed in
//! the [`BatchReport`]; it never stops the batch and never leaves rows behind.
//! With the `parallel` feature pages are extracted on the rayon pool while the
//! CSV is still written sequentially.

use crate::detector::{LedgerDetector, PageResult};
use crate::diagnostics::{elapsed_ms, BatchReport, PageFailure};
use crate::error::LedgerResult;
use crate::output::{save_overlay, CsvSink};
use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// File extensions picked up when an input is a directory.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// Expand directories into their image files, sorted by name. Plain paths are
/// kept as given, even when they do not exist: that is a page failure, not a
/// batch failure.
pub fn collect_inputs(inputs: &[PathBuf]) -> LedgerResult<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_image(p))
                .collect();
            found.sort();
            pages.extend(found);
        } else {
            pages.push(input.clone());
        }
    }
    Ok(pages)
}

pub struct BatchRunner {
    detector: LedgerDetector,
    overlay_dir: Option<PathBuf>,
    stop: Option<Arc<AtomicBool>>,
}

impl BatchRunner {
    pub fn new(detector: LedgerDetector) -> Self {
        Self {
            detector,
            overlay_dir: None,
            stop: None,
        }
    }

    /// Save a `<stem>_out.png` review image per page into `dir`.
    pub fn with_overlay_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overlay_dir = Some(dir.into());
        self
    }

    /// Stop before the next page once `flag` is set.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    fn stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Extract one page and, when configured, save its overlay.
    pub fn process_page(&self, path: &Path) -> LedgerResult<PageResult> {
        let Some(dir) = &self.overlay_dir else {
            return self.detector.process_path(path);
        };
        let (name, gray) = LedgerDetector::load_page(path)?;
        let result = self.detector.process_image(&name, &gray)?;
        save_overlay(&gray, &result.overlays, dir, &name)?;
        Ok(result)
    }

    /// `None` when the stop flag was already set.
    fn extract(&self, path: &Path) -> Option<LedgerResult<PageResult>> {
        (!self.stopped()).then(|| self.process_page(path))
    }

    /// Process `pages` in order, appending successful pages to `sink`.
    ///
    /// Only CSV write errors abort the batch. An interrupted batch leaves the
    /// CSV holding a prefix of `pages`.
    pub fn run<W: Write>(&self, pages: &[PathBuf], sink: &mut CsvSink<W>) -> LedgerResult<BatchReport> {
        let start = Instant::now();
        let mut report = BatchReport::default();

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Option<LedgerResult<PageResult>>> =
            pages.par_iter().map(|path| self.extract(path)).collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes = pages.iter().map(|path| self.extract(path));

        Self::record_in_order(pages, outcomes, sink, &mut report)?;

        if report.interrupted {
            warn!("batch interrupted after {} pages", report.processed() + report.failures.len());
        }
        report.elapsed_ms = elapsed_ms(start);
        info!(
            "batch done: {} pages, {} failures, {} rows",
            report.processed(),
            report.failures.len(),
            report.rows_written
        );
        Ok(report)
    }

    /// Record outcomes in page order, stopping at the first page the stop
    /// flag skipped. Pages after it are dropped even when they finished.
    fn record_in_order<W, I>(
        pages: &[PathBuf],
        outcomes: I,
        sink: &mut CsvSink<W>,
        report: &mut BatchReport,
    ) -> LedgerResult<()>
    where
        W: Write,
        I: IntoIterator<Item = Option<LedgerResult<PageResult>>>,
    {
        for (path, outcome) in pages.iter().zip(outcomes) {
            let Some(outcome) = outcome else {
                report.interrupted = true;
                break;
            };
            Self::record(path, outcome, sink, report)?;
        }
        Ok(())
    }

    fn record<W: Write>(
        path: &Path,
        outcome: LedgerResult<PageResult>,
        sink: &mut CsvSink<W>,
        report: &mut BatchReport,
    ) -> LedgerResult<()> {
        match outcome {
            Ok(page) => {
                report.rows_written += sink.write_page(&page.rows)?;
                report.pages.push(page.report);
            }
            Err(err) => {
                warn!("{}: {err}", path.display());
                report.failures.push(PageFailure {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                });
            }
        }
        Ok(())
    }
}
