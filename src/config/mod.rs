//! JSON runtime configuration for the command-line tools.
//!
//! Every field is optional; missing fields fall back to the defaults of
//! [`ExtractParams`] and [`OutputConfig`]. Command-line flags override the
//! output paths.
//!
//! ```json
//! {
//!   "output": { "csv": "output/journal.csv", "overlays": false },
//!   "params": { "page": { "index_split_margin": 150 } }
//! }
//! ```

use crate::detector::ExtractParams;
use crate::error::{LedgerError, LedgerResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV: &str = "output/journal.csv";
pub const DEFAULT_OVERLAY_DIR: &str = "output";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv: PathBuf,
    pub overlay_dir: PathBuf,
    /// Write a `<stem>_out.png` review image per page.
    pub overlays: bool,
    pub report: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv: PathBuf::from(DEFAULT_CSV),
            overlay_dir: PathBuf::from(DEFAULT_OVERLAY_DIR),
            overlays: true,
            report: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub output: OutputConfig,
    pub params: ExtractParams,
}

pub fn load_config(path: &Path) -> LedgerResult<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        LedgerError::Config(format!("failed to read config {}: {e}", path.display()))
    })?;
    parse_config(&contents)
        .map_err(|e| LedgerError::Config(format!("failed to parse config {}: {e}", path.display())))
}

pub fn parse_config(json: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        assert_eq!(parse_config("{}").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn nested_overrides_apply() {
        let cfg = parse_config(
            r#"{ "output": { "overlays": false },
                 "params": { "labels": { "recheck_first_label": true },
                             "cells": { "mark_band": { "start_deg": 60.0, "end_deg": 30.0, "steps": 31 } } } }"#,
        )
        .unwrap();
        assert!(!cfg.output.overlays);
        assert_eq!(cfg.output.csv, PathBuf::from(DEFAULT_CSV));
        assert!(cfg.params.labels.recheck_first_label);
        assert_eq!(cfg.params.cells.mark_band.steps, 31);
        assert_eq!(cfg.params.cells.row_label_threshold, 20.0);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_config(Path::new("/nonexistent/ledger.json")).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
