//! The section optimizer: T-forwarding, layer fusion, absorption.

use std::time::Instant;

use tracing::{debug, info, instrument};

use alsvid_ir::{Operation, Section};

use crate::absorb::absorb_into_measurements;
use crate::combine::reduce_layer;
use crate::config::OptimizerConfig;
use crate::error::CompileResult;
use crate::forward::push_t_forward;
use crate::layer::{partition_into_layers, Layer};

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Absorb trailing Clifford/Pauli rotations into the measurement
    /// block after the rotation optimization converges.
    pub absorb_into_measurements: bool,
    /// Also produce the commuting-layer view of the final sequence.
    pub emit_layers: bool,
}

/// Result of one optimizer run.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    /// Number of T rotations in the final prefix.
    pub t_count: usize,
    /// Operations in `[0, split_index)` belong to this section's output;
    /// those in `[split_index, len)` carry forward to the next section.
    pub split_index: usize,
    /// Commuting layers of the final sequence, when requested.
    pub layers: Option<Vec<Layer>>,
}

/// Rewrites one section into canonical T-prefix form.
///
/// The optimizer owns its section for the duration of a run: every T
/// rotation moves to the front (rewritten in the Pauli frame as it
/// crosses), compatible rotations fuse, and optionally the trailing
/// Clifford/Pauli run is absorbed into the measurement block.
pub struct Optimizer {
    section: Section,
    config: OptimizerConfig,
}

impl Optimizer {
    /// Create an optimizer with the default configuration.
    pub fn new(section: Section) -> Self {
        Self::with_config(section, OptimizerConfig::default())
    }

    /// Create an optimizer with an explicit configuration.
    pub fn with_config(section: Section, config: OptimizerConfig) -> Self {
        Self { section, config }
    }

    /// The section in its current (possibly rewritten) state.
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Consume the optimizer, yielding the rewritten section.
    pub fn into_section(self) -> Section {
        self.section
    }

    /// Run the pipeline once over the owned section.
    #[instrument(skip(self), fields(ops = self.section.len()))]
    pub fn run(&mut self, options: RunOptions) -> CompileResult<OptimizeOutcome> {
        let deadline = Deadline::start(&self.config);

        let t_count = self.optimize_rotations(&deadline)?;

        let mut moved = 0;
        if options.absorb_into_measurements {
            let width = self.section.width();
            let ancilla_begin = self.section.ancilla_begin();
            moved =
                absorb_into_measurements(self.section.ops_mut(), width, ancilla_begin, t_count)?;
            debug!(moved, "absorbed trailing rotations");
        }

        let split_index = self.section.len() - moved;
        let layers = options
            .emit_layers
            .then(|| partition_into_layers(self.section.ops().to_vec(), &self.config));

        info!(
            total = self.section.len(),
            t_count, split_index, "section optimized"
        );

        Ok(OptimizeOutcome {
            t_count,
            split_index,
            layers,
        })
    }

    /// The fixed-point rotation optimization: T-forward, layer, fuse,
    /// repeat until a full round fuses nothing; then fuse the accumulated
    /// non-T tail and append it. Returns the T-count.
    fn optimize_rotations(&mut self, deadline: &Deadline) -> CompileResult<usize> {
        let ops = self.section.ops_mut();
        let mut tail: Vec<Operation> = Vec::new();
        let mut changed = true;

        while changed {
            changed = false;

            let split = push_t_forward(ops, &self.config)?;
            // New non-T material precedes what earlier rounds pushed back.
            let suffix: Vec<Operation> = ops.drain(split..).collect();
            tail.splice(0..0, suffix);

            if deadline.exceeded() {
                debug!("time budget exhausted, finalizing");
                break;
            }

            let prefix = std::mem::take(ops);
            let mut layers = partition_into_layers(prefix, &self.config);
            for layer in &mut layers {
                changed |= reduce_layer(layer);
            }
            *ops = layers.into_iter().flatten().collect();

            if deadline.exceeded() {
                debug!("time budget exhausted, finalizing");
                changed = false;
            }
        }

        let t_count = ops.len();
        debug!(t_count, tail = tail.len(), "rotation optimization converged");

        let mut tail_layers = partition_into_layers(tail, &self.config);
        for layer in &mut tail_layers {
            reduce_layer(layer);
        }
        ops.extend(tail_layers.into_iter().flatten());

        Ok(t_count)
    }
}

struct Deadline {
    started: Instant,
    budget: Option<std::time::Duration>,
}

impl Deadline {
    fn start(config: &OptimizerConfig) -> Self {
        Self {
            started: Instant::now(),
            budget: config.time_budget,
        }
    }

    fn exceeded(&self) -> bool {
        self.budget
            .is_some_and(|budget| self.started.elapsed() >= budget)
    }
}
