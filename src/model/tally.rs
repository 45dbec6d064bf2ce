use serde::{Deserialize, Serialize};

use crate::model::thresholds::AcceptanceThreshold;
use crate::model::vocabulary::ResponseCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationMode {
    /// Yes/No only; "cannot answer" values are left out of numerator and denominator.
    StrictBinary,
    /// Yes/No/CannotAnswer all count towards the total.
    Ternary,
}

impl AggregationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationMode::StrictBinary => "strict-binary",
            AggregationMode::Ternary => "ternary",
        }
    }
}

/// How the aggregation mode of a column group is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModeSelection {
    #[default]
    Auto,
    StrictBinary,
    Ternary,
}

impl ModeSelection {
    pub fn forced(self) -> Option<AggregationMode> {
        match self {
            ModeSelection::Auto => None,
            ModeSelection::StrictBinary => Some(AggregationMode::StrictBinary),
            ModeSelection::Ternary => Some(AggregationMode::Ternary),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTally {
    pub mode: AggregationMode,
    pub total: usize,
    pub yes: usize,
    pub no: usize,
    pub cannot_answer: usize,
    /// Non-missing values outside the counted categories.
    pub ignored: usize,
    pub yes_percentage: f64,
}

impl ResponseTally {
    pub fn empty(mode: AggregationMode) -> Self {
        Self {
            mode,
            total: 0,
            yes: 0,
            no: 0,
            cannot_answer: 0,
            ignored: 0,
            yes_percentage: 0.0,
        }
    }

    pub fn count(&self, category: ResponseCategory) -> usize {
        match category {
            ResponseCategory::Yes => self.yes,
            ResponseCategory::No => self.no,
            ResponseCategory::CannotAnswer => self.cannot_answer,
        }
    }

    pub fn meets_threshold(&self, threshold: &AcceptanceThreshold) -> bool {
        threshold.is_met(self.yes_percentage, self.total)
    }
}

pub fn yes_percentage(yes: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    yes as f64 * 100.0 / total as f64
}
