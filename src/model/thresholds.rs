use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCEPTANCE_PCT: f64 = 80.0;

/// Inclusive cutoff on the Yes share. A tally with no recognized answers
/// never meets it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcceptanceThreshold {
    pub min_yes_pct: f64,
}

impl Default for AcceptanceThreshold {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl AcceptanceThreshold {
    pub fn default_v1() -> Self {
        Self {
            min_yes_pct: DEFAULT_ACCEPTANCE_PCT,
        }
    }

    pub fn new(min_yes_pct: f64) -> Self {
        Self { min_yes_pct }
    }

    pub fn is_met(&self, yes_percentage: f64, total: usize) -> bool {
        total > 0 && yes_percentage >= self.min_yes_pct
    }
}
