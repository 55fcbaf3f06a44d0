//! Error types for the optimizer crate.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur while optimizing a section.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// The Pauli-frame rewriter only moves a rotation across a Pauli or
    /// Clifford rotation; two T-class rotations never reorder.
    #[error("cannot reorder across a non-Clifford rotation (angles {past} and {moved})")]
    NonCliffordReorder {
        /// Angle of the rotation being crossed.
        past: i8,
        /// Angle of the rotation being moved.
        moved: i8,
    },

    /// Only Pauli and Clifford rotations absorb into a measurement.
    #[error("rotation of angle {0} cannot be absorbed into a measurement")]
    NonCliffordAbsorption(i8),

    /// A T-class rotation reached an anticommuting measurement while being
    /// pushed forward; measurements are never rewritten by a crossing T.
    #[error("a non-Clifford rotation cannot cross an anticommuting measurement")]
    TAcrossMeasurement,
}

/// Result type for optimizer operations.
pub type CompileResult<T> = Result<T, CompileError>;
