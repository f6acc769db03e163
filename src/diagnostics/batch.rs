use super::page::PageReport;
use serde::Serialize;
use std::path::PathBuf;

/// A page that could not be processed.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a whole batch.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub pages: Vec<PageReport>,
    pub failures: Vec<PageFailure>,
    pub rows_written: usize,
    /// True when the stop flag ended the batch early.
    pub interrupted: bool,
    pub elapsed_ms: f64,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keys_are_camel_case() {
        let report = BatchReport {
            pages: vec![PageReport::default()],
            failures: vec![PageFailure {
                path: PathBuf::from("page_7.png"),
                error: "truncated".into(),
            }],
            rows_written: 12,
            ..BatchReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rowsWritten"], 12);
        assert_eq!(json["elapsedMs"], 0.0);
        assert_eq!(json["failures"][0]["path"], "page_7.png");
        let page = &json["pages"][0];
        assert!(page.get("rowsEmitted").is_some());
        assert!(page.get("labelRows").is_some());
        assert!(page["timing"].get("totalMs").is_some());
    }
}
