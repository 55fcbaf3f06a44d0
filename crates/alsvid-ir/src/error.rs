//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while constructing or validating IR values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Axis and qubit lists must pair up one-to-one.
    #[error("axis list has {axes} entries but qubit list has {qubits}")]
    ArityMismatch {
        /// Number of axis entries supplied.
        axes: usize,
        /// Number of qubit indices supplied.
        qubits: usize,
    },

    /// Qubit index outside the string width.
    #[error("qubit {qubit} out of range for width {width}")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// The string width.
        width: usize,
    },

    /// The same qubit was named twice in one operand.
    #[error("duplicate qubit {0} in Pauli operand")]
    DuplicateQubit(usize),

    /// Basis character other than x, y or z.
    #[error("unknown Pauli axis '{0}'")]
    UnknownAxis(char),

    /// The x and z bit strings of one operand must have equal length.
    #[error("x bit string has length {x} but z bit string has length {z}")]
    BitStringMismatch {
        /// Length of the x bit string.
        x: usize,
        /// Length of the z bit string.
        z: usize,
    },

    /// Bit strings are composed of '0' and '1' only.
    #[error("invalid character '{0}' in bit string")]
    BadBitChar(char),

    /// Rotation angle outside the quarter-turn lattice.
    #[error("rotation angle {0} outside the lattice -2..=2")]
    AngleOutOfLattice(i8),

    /// A section must hold at least one operation.
    #[error("section must contain at least one operation")]
    EmptySection,

    /// All operations of a section share one width.
    #[error("operation width {op} does not match section width {section}")]
    WidthMismatch {
        /// Width of the offending operation.
        op: usize,
        /// Width of the section.
        section: usize,
    },

    /// The data/ancilla split must lie within the qubit range.
    #[error("ancilla split {split} out of range for width {width}")]
    AncillaSplitOutOfRange {
        /// The requested split index.
        split: usize,
        /// The section width.
        width: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
