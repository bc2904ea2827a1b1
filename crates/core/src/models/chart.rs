use serde::{Deserialize, Serialize};

/// One labelled value in a time series (bar/line chart).
///
/// The core computes the numbers; the frontend only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    /// `YYYY-MM` for monthly series, `YYYY-MM-DD` for daily series.
    /// Labels sort lexicographically in chronological order.
    pub label: String,

    pub total: f64,
}

impl PeriodTotal {
    pub fn new(label: impl Into<String>, total: f64) -> Self {
        Self {
            label: label.into(),
            total,
        }
    }
}
