//! Sections: the optimizer's unit of work.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::operation::{Measurement, Operation};
use crate::pauli::{Axis, PauliString};

/// An ordered operation sequence over a fixed qubit count, with a split
/// index partitioning qubits into data `[0, ancilla_begin)` and ancillas
/// `[ancilla_begin, width)`.
///
/// A section is one maximal span ending in a block of measurements; the
/// optimizer rewrites one section at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    ops: Vec<Operation>,
    width: usize,
    ancilla_begin: usize,
}

impl Section {
    /// Create a section with an explicit data/ancilla split.
    ///
    /// Rejects an empty sequence, operations of mixed width and a split
    /// beyond the width.
    pub fn new(ops: Vec<Operation>, ancilla_begin: usize) -> IrResult<Self> {
        let width = match ops.first() {
            Some(op) => op.width(),
            None => return Err(IrError::EmptySection),
        };
        for op in &ops {
            if op.width() != width {
                return Err(IrError::WidthMismatch {
                    op: op.width(),
                    section: width,
                });
            }
        }
        if ancilla_begin > width {
            return Err(IrError::AncillaSplitOutOfRange {
                split: ancilla_begin,
                width,
            });
        }
        Ok(Self {
            ops,
            width,
            ancilla_begin,
        })
    }

    /// Create a section with no ancillas (the split sits at the width).
    pub fn without_ancillas(ops: Vec<Operation>) -> IrResult<Self> {
        let width = ops.first().map(Operation::width).unwrap_or(0);
        Self::new(ops, width)
    }

    /// Create an ancilla-free section and append `k` default +Z
    /// measurements on qubits `0..k`.
    pub fn with_default_measurements(mut ops: Vec<Operation>, k: usize) -> IrResult<Self> {
        let width = match ops.first() {
            Some(op) => op.width(),
            None => return Err(IrError::EmptySection),
        };
        if k > width {
            return Err(IrError::QubitOutOfRange {
                qubit: k.saturating_sub(1),
                width,
            });
        }
        for qubit in 0..k {
            let basis = PauliString::from_axes(width, &[Axis::Z], &[qubit])?;
            ops.push(Measurement::new(basis, true).into());
        }
        Self::without_ancillas(ops)
    }

    /// Number of qubits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// First ancilla qubit index; equals the width when there are none.
    pub fn ancilla_begin(&self) -> usize {
        self.ancilla_begin
    }

    /// The operation sequence.
    pub fn ops(&self) -> &[Operation] {
        &self.ops
    }

    /// Mutable access for the rewriting passes.
    pub fn ops_mut(&mut self) -> &mut Vec<Operation> {
        &mut self.ops
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when every operation has been optimized away.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consume the section, yielding the rewritten sequence.
    pub fn into_ops(self) -> Vec<Operation> {
        self.ops
    }
}
