use thiserror::Error;

use crate::model::thresholds::AcceptanceThreshold;

pub mod json;
pub mod text;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_pct_1(v: f64) -> String {
    format!("{:.1}%", v)
}

/// Caption shown next to a Yes share, e.g. `✅ ≥80%`.
pub fn threshold_caption(meets: bool, threshold: &AcceptanceThreshold) -> String {
    if meets {
        format!("\u{2705} \u{2265}{}%", threshold.min_yes_pct)
    } else {
        format!("\u{274c} <{}%", threshold.min_yes_pct)
    }
}
