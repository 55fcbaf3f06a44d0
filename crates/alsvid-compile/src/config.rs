//! Optimizer tuning knobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for one [`Optimizer`](crate::Optimizer).
///
/// The defaults reproduce the production tuning: at most 50 parallel
/// slices, at least 100 operations per slice (below that a pass runs
/// serially), layer lists polished serially once they fit in 100 layers,
/// and no wall-clock cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Soft wall-clock budget for the fixed-point loop. Checked between
    /// passes only; in-flight passes run to completion.
    pub time_budget: Option<Duration>,
    /// Upper bound on concurrent slices per parallel pass.
    pub max_slices: usize,
    /// Minimum operations per slice; shorter ranges run serially.
    pub min_slice_ops: usize,
    /// Layer-count threshold at or below which the partitioner finishes
    /// with a serial seam-merging sweep.
    pub serial_layer_limit: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            time_budget: None,
            max_slices: 50,
            min_slice_ops: 100,
            serial_layer_limit: 100,
        }
    }
}

impl OptimizerConfig {
    /// Configuration with a wall-clock cap, other knobs at their defaults.
    pub fn with_time_budget(budget: Duration) -> Self {
        Self {
            time_budget: Some(budget),
            ..Self::default()
        }
    }
}
