//! The page pipeline behind [`LedgerDetector`].

use super::params::ExtractParams;
use super::records::{ObservationRow, Overlay, OverlayKind, PageResult, DAYS_IN_MONTH};
use crate::diagnostics::{elapsed_ms, MonthReport, PageReport, TimingBreakdown};
use crate::error::{LedgerError, LedgerResult};
use crate::grid::split::SplitEdges;
use crate::grid::{month_spans, Grid, MonthSpan};
use crate::image::io::load_grayscale_image;
use crate::image::InkImage;
use crate::lines::EdgePolicy;
use ::image::GrayImage;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Extracts observation rows from scanned ledger pages.
///
/// The detector is immutable and holds only parameters, so one instance can
/// serve many pages (and many threads).
#[derive(Clone, Debug, Default)]
pub struct LedgerDetector {
    params: ExtractParams,
}

impl LedgerDetector {
    pub fn new(params: ExtractParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ExtractParams {
        &self.params
    }

    /// Load a page as grayscale together with the file stem its rows are
    /// tagged with.
    pub fn load_page(path: &Path) -> LedgerResult<(String, GrayImage)> {
        let gray = load_grayscale_image(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok((name, gray))
    }

    /// Load and process one page; rows are tagged with the file stem.
    pub fn process_path(&self, path: &Path) -> LedgerResult<PageResult> {
        let (name, gray) = Self::load_page(path)?;
        self.process_image(&name, &gray)
    }

    pub fn process_image(&self, file_name: &str, gray: &GrayImage) -> LedgerResult<PageResult> {
        self.process_ink(file_name, InkImage::from_gray(gray))
    }

    /// Process a page that is already inverted (ink bright).
    pub fn process_ink(&self, file_name: &str, ink: InkImage) -> LedgerResult<PageResult> {
        let start = Instant::now();
        let mut timing = TimingBreakdown::default();
        let mut result = PageResult {
            file_name: file_name.to_string(),
            rows: Vec::new(),
            overlays: Vec::new(),
            report: PageReport {
                file_name: file_name.to_string(),
                width: ink.width(),
                height: ink.height(),
                ..PageReport::default()
            },
        };

        let tables = timing.time("tables", || self.tables(Grid::new(ink)))?;
        result.report.tables = tables.len();
        for table in &tables {
            self.extract_table(table, &mut result, &mut timing)?;
        }

        result.report.rows_emitted = result.rows.len();
        result.report.marks = result.marks();
        timing.total_ms = elapsed_ms(start);
        result.report.timing = timing;
        info!(
            "{file_name}: {} months, {} rows, {} marks in {:.1} ms",
            result.report.months.len(),
            result.report.rows_emitted,
            result.report.marks,
            result.report.timing.total_ms
        );
        Ok(result)
    }

    /// The page as one table, or two when the stacked split applies.
    fn tables(&self, page: Grid) -> LedgerResult<Vec<Grid>> {
        let p = &self.params;
        let Some(limit) = p.page.split_row_limit else {
            return Ok(vec![page]);
        };
        let mut page = page;
        page.detect_lines(&p.lines, EdgePolicy::BOTH, EdgePolicy::BOTH);
        page.build_cells(&p.cells)?;
        page.split(
            limit,
            p,
            SplitEdges {
                horizontal: EdgePolicy::BOTH,
                vertical: EdgePolicy::BOTH,
            },
        )
    }

    fn extract_table(
        &self,
        table: &Grid,
        out: &mut PageResult,
        timing: &mut TimingBreakdown,
    ) -> LedgerResult<()> {
        let p = &self.params;
        let (index, data) = table.split_columns(p.page.index_split_margin)?;
        let index = timing.time("index_strip", || self.index_strip(index))?;

        out.report.index_rows += index.rows();
        for (row, _) in index
            .cells()
            .iter()
            .zip(index.row_labels())
            .filter(|&(_, &label)| label)
        {
            if let Some(cell) = row.first() {
                out.overlays.push(Overlay {
                    kind: OverlayKind::RowLabel,
                    patch: cell.patch(),
                });
                out.report.label_rows += 1;
            }
        }

        let spans = month_spans(&index, p.labels.row_index_column, p.page.min_month_rows);
        debug!("{} month spans", spans.len());
        let months = data.crop_months(&spans)?;
        for (span, month) in spans.iter().zip(months) {
            let chart = out.report.months.len() + 1;
            let month = timing.time(&format!("month_{chart}"), || self.month_table(month))?;
            let month_report = self.emit_month(chart, span, &month, out);
            out.report.months.push(month_report);
        }
        Ok(())
    }

    /// Rules of the index strip plus the synthetic line closing the label
    /// column, then row labels.
    fn index_strip(&self, mut index: Grid) -> LedgerResult<Grid> {
        let p = &self.params;
        index.detect_lines(&p.lines, EdgePolicy::BOTH, EdgePolicy::BOTH);
        let reference = *index
            .vertical()
            .get(p.page.label_strip_reference)
            .ok_or(LedgerError::InsufficientLines {
                axis: "vertical",
                found: index.vertical().len(),
            })?;
        let (w, h) = (index.width(), index.height());
        index
            .vertical_mut()
            .insert_line(&reference, p.page.label_strip_offset, w, h);
        index.build_cells(&p.cells)?;
        index.derive_row_labels(&p.cells, &p.labels);
        Ok(index)
    }

    /// Month tables have a drawn top rule but may lack the others.
    fn month_table(&self, mut month: Grid) -> LedgerResult<Grid> {
        let p = &self.params;
        month.detect_lines(&p.lines, EdgePolicy::TRAILING, EdgePolicy::BOTH);
        month.build_cells(&p.cells)?;
        month.derive_column_labels(&p.cells, &p.labels);
        month.first_label_column()?;
        Ok(month)
    }

    /// Header overlays, one row per data row, and mark overlays.
    ///
    /// Data rows exclude the header and the closing row below the labels.
    fn emit_month(
        &self,
        chart: usize,
        span: &MonthSpan,
        month: &Grid,
        out: &mut PageResult,
    ) -> MonthReport {
        let p = &self.params;
        if let Some(header) = month.header_row() {
            for (cell, _) in header
                .iter()
                .zip(month.col_labels())
                .filter(|&(_, &label)| label)
            {
                out.overlays.push(Overlay {
                    kind: OverlayKind::ColumnLabel,
                    patch: cell.patch(),
                });
            }
        }

        let day_columns = month.label_columns();
        let mut marks = 0;
        let data_rows = month.rows().saturating_sub(1);
        for (row_no, row) in month.cells().iter().enumerate().take(data_rows).skip(1) {
            let mut days = [false; DAYS_IN_MONTH];
            for (day, &col) in day_columns.iter().take(DAYS_IN_MONTH).enumerate() {
                let Some(cell) = row.get(col) else { continue };
                if cell.has_mark(&p.cells) {
                    days[day] = true;
                    marks += 1;
                    out.overlays.push(Overlay {
                        kind: OverlayKind::Mark,
                        patch: cell.patch(),
                    });
                }
            }
            out.rows.push(ObservationRow {
                file_name: out.file_name.clone(),
                chart_in_file: chart,
                row_no,
                days,
            });
        }

        MonthReport {
            chart_in_file: chart,
            span: *span,
            horizontal_lines: month.horizontal().len(),
            vertical_lines: month.vertical().len(),
            rows: month.rows(),
            cols: month.cols(),
            day_columns: day_columns.len(),
            marks,
        }
    }
}
