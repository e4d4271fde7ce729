//! Counter animation input model.

use serde::{Deserialize, Serialize};

/// Default animation length for headline counters.
pub const DEFAULT_COUNTER_DURATION_MS: f64 = 1500.0;

/// One numeric display animated from 0 to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSpec {
    /// Id of the element whose text shows the value.
    pub id: String,
    pub target: u64,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
}

impl CounterSpec {
    pub fn new(id: impl Into<String>, target: u64, duration_ms: f64) -> Self {
        Self {
            id: id.into(),
            target,
            duration_ms,
        }
    }
}

fn default_duration_ms() -> f64 {
    DEFAULT_COUNTER_DURATION_MS
}

/// Headline counters shown on the landing page.
pub fn default_counters() -> Vec<CounterSpec> {
    vec![
        CounterSpec::new("counter-co2", 370_000, DEFAULT_COUNTER_DURATION_MS),
        CounterSpec::new("counter-projects", 24, DEFAULT_COUNTER_DURATION_MS),
        CounterSpec::new("counter-communities", 18, DEFAULT_COUNTER_DURATION_MS),
    ]
}
