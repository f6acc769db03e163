//! Append-mode CSV sink for observation rows.

use crate::detector::{ObservationRow, DAYS_IN_MONTH};
use crate::error::LedgerResult;
use crate::image::io::ensure_parent_dir;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const LEADING_COLUMNS: [&str; 6] = [
    "file_name",
    "chart_in_file",
    "year",
    "month",
    "row_no",
    "bird_species",
];

/// Header row: six descriptive columns then one column per day.
pub fn header() -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|s| s.to_string())
        .chain((1..=DAYS_IN_MONTH).map(|d| d.to_string()))
        .collect()
}

/// CSV fields of one row; year, month, and species stay blank.
pub fn record(row: &ObservationRow) -> Vec<String> {
    let mut fields = Vec::with_capacity(LEADING_COLUMNS.len() + DAYS_IN_MONTH);
    fields.push(row.file_name.clone());
    fields.push(row.chart_in_file.to_string());
    fields.push(String::new());
    fields.push(String::new());
    fields.push(row.row_no.to_string());
    fields.push(String::new());
    fields.extend(
        row.days
            .iter()
            .map(|&marked| if marked { "1".to_string() } else { String::new() }),
    );
    fields
}

/// Writes whole pages of rows; nothing of a page is written until the page
/// is handed over complete.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<std::fs::File> {
    /// Open `path` for appending, writing the header only into an empty file.
    pub fn append(path: &Path) -> LedgerResult<Self> {
        ensure_parent_dir(path)?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let fresh = file.metadata()?.len() == 0;
        Self::new(file, fresh)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, write_header: bool) -> LedgerResult<Self> {
        let mut writer = csv::WriterBuilder::new().from_writer(inner);
        if write_header {
            writer.write_record(header())?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }

    /// Write one page's rows and flush.
    pub fn write_page(&mut self, rows: &[ObservationRow]) -> LedgerResult<usize> {
        for row in rows {
            self.writer.write_record(record(row))?;
        }
        self.writer.flush()?;
        Ok(rows.len())
    }

    pub fn into_inner(self) -> LedgerResult<W> {
        self.writer
            .into_inner()
            .map_err(|err| crate::error::LedgerError::Io(err.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row_no: usize, marked: &[usize]) -> ObservationRow {
        let mut days = [false; DAYS_IN_MONTH];
        for &d in marked {
            days[d - 1] = true;
        }
        ObservationRow {
            file_name: "page_01".into(),
            chart_in_file: 2,
            row_no,
            days,
        }
    }

    #[test]
    fn header_has_thirty_seven_columns() {
        let h = header();
        assert_eq!(h.len(), 37);
        assert_eq!(h[0], "file_name");
        assert_eq!(h[5], "bird_species");
        assert_eq!(h[6], "1");
        assert_eq!(h[36], "31");
    }

    #[test]
    fn rows_mark_days_with_ones() {
        let mut sink = CsvSink::new(Vec::new(), true).unwrap();
        assert_eq!(sink.write_page(&[row(1, &[1, 3]), row(2, &[])]).unwrap(), 2);
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("file_name,chart_in_file,year,month,row_no,bird_species,1,2,"));
        assert_eq!(lines[1], format!("page_01,2,,,1,,1,,1{}", ",".repeat(28)));
        assert_eq!(lines[2], format!("page_01,2,,,2,{}", ",".repeat(31)));
    }

    #[test]
    fn header_is_written_once_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("journal.csv");
        CsvSink::append(&path).unwrap().write_page(&[row(1, &[])]).unwrap();
        CsvSink::append(&path).unwrap().write_page(&[row(2, &[5])]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("file_name").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }
}
