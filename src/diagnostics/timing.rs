use serde::Serialize;
use std::time::Instant;

/// Wall-clock time spent in one named stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-stage timings of one page, in execution order.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }

    /// Run `f` and record its duration under `label`.
    pub fn time<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, elapsed_ms(start));
        out
    }
}

pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
