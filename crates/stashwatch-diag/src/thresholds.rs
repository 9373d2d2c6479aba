//! Classification cut-offs.

use serde::{Deserialize, Serialize};
use stashwatch_core::{Error, Result};

/// Heap usage (percent) above which the health check warns.
pub const DEFAULT_HEAP_USED_PERCENT: f64 = 80.0;

/// Backpressure ratio above which the queue is critical.
pub const DEFAULT_BACKPRESSURE_CRITICAL: f64 = 0.10;

/// Backpressure ratio above which the queue is in warning.
pub const DEFAULT_BACKPRESSURE_WARNING: f64 = 0.05;

/// Backpressure ratio above which the queue is in caution.
pub const DEFAULT_BACKPRESSURE_CAUTION: f64 = 0.01;

/// Cut-offs used by the diagnostic engine.
///
/// Every bound is exclusive: a value equal to a threshold falls into the
/// tier below it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Heap used percent, 0–100.
    pub heap_used_percent: f64,
    /// Backpressure ratio for `critical`, 0.0–1.0.
    pub backpressure_critical: f64,
    /// Backpressure ratio for `warning`, 0.0–1.0.
    pub backpressure_warning: f64,
    /// Backpressure ratio for `caution`, 0.0–1.0.
    pub backpressure_caution: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            heap_used_percent: DEFAULT_HEAP_USED_PERCENT,
            backpressure_critical: DEFAULT_BACKPRESSURE_CRITICAL,
            backpressure_warning: DEFAULT_BACKPRESSURE_WARNING,
            backpressure_caution: DEFAULT_BACKPRESSURE_CAUTION,
        }
    }
}

impl Thresholds {
    /// Check ranges and ordering.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.heap_used_percent) {
            return Err(Error::config(format!(
                "heap_used_percent must be within 0..=100, got {}",
                self.heap_used_percent
            )));
        }
        for (name, value) in [
            ("backpressure_caution", self.backpressure_caution),
            ("backpressure_warning", self.backpressure_warning),
            ("backpressure_critical", self.backpressure_critical),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        if self.backpressure_caution > self.backpressure_warning
            || self.backpressure_warning > self.backpressure_critical
        {
            return Err(Error::config(
                "backpressure thresholds must satisfy caution <= warning <= critical",
            ));
        }
        Ok(())
    }
}
