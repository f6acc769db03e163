//! Consumers of page results: the CSV table and the review overlay.

pub mod csv;
pub mod overlay;

pub use self::csv::{header, record, CsvSink};
pub use overlay::{overlay_color, overlay_path, render_overlay, save_overlay};
