use super::timing::TimingBreakdown;
use crate::grid::MonthSpan;
use serde::Serialize;

/// Summary of one month table.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthReport {
    pub chart_in_file: usize,
    pub span: MonthSpan,
    pub horizontal_lines: usize,
    pub vertical_lines: usize,
    pub rows: usize,
    pub cols: usize,
    pub day_columns: usize,
    pub marks: usize,
}

/// Summary of one page.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    pub file_name: String,
    pub width: usize,
    pub height: usize,
    /// Tables on the page after the optional stacked split.
    pub tables: usize,
    pub index_rows: usize,
    pub label_rows: usize,
    pub months: Vec<MonthReport>,
    pub rows_emitted: usize,
    pub marks: usize,
    pub timing: TimingBreakdown,
}
