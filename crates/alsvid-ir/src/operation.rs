//! Rotations, measurements and the operation sum type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::pauli::{Axis, PauliString};

/// A Pauli-product rotation on the quarter-turn lattice.
///
/// The integer angle encodes multiples of π/4 turns: `±1` is the T class
/// (±π/8), `±2` the Clifford class (±π/4) and `0` a Pauli (π/2). An
/// identity basis makes the rotation the identity regardless of angle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rotation {
    /// The rotation axis as a Pauli string.
    pub basis: PauliString,
    /// Encoded angle in `-2..=2`.
    pub angle: i8,
}

impl Rotation {
    /// Create a rotation, rejecting angles outside the lattice.
    pub fn new(basis: PauliString, angle: i8) -> IrResult<Self> {
        if angle.abs() > 2 {
            return Err(IrError::AngleOutOfLattice(angle));
        }
        Ok(Self { basis, angle })
    }

    /// Create a rotation from paired axis and qubit lists.
    pub fn from_axes(width: usize, angle: i8, axes: &[Axis], qubits: &[usize]) -> IrResult<Self> {
        Self::new(PauliString::from_axes(width, axes, qubits)?, angle)
    }

    /// The identity rotation over `width` qubits.
    pub fn identity(width: usize) -> Self {
        Self {
            basis: PauliString::identity(width),
            angle: 0,
        }
    }

    /// True when the basis is the identity string.
    pub fn is_identity(&self) -> bool {
        self.basis.is_identity()
    }

    /// True for a non-identity ±π/8 rotation, the non-Clifford class.
    pub fn is_t(&self) -> bool {
        !self.is_identity() && self.angle.abs() == 1
    }
}

/// Two identities are interchangeable whatever their encoded angles.
impl PartialEq for Rotation {
    fn eq(&self, other: &Self) -> bool {
        (self.basis == other.basis && self.angle == other.angle)
            || (self.is_identity() && other.is_identity())
    }
}

impl Eq for Rotation {}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{} {}", self.angle, self.basis)
    }
}

/// A Pauli-product measurement with optional classically-controlled tail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// The measured Pauli string.
    pub basis: PauliString,
    /// Measurement sign: `true` is +, `false` is −.
    pub phase: bool,
    /// Rotations applied conditionally on the measurement outcome.
    pub controlled: Vec<Rotation>,
    /// Caller-side output ordering tag; not part of the algebra.
    pub output_position: Option<u32>,
}

impl Measurement {
    /// Create a measurement with no controlled rotations.
    pub fn new(basis: PauliString, phase: bool) -> Self {
        Self {
            basis,
            phase,
            controlled: vec![],
            output_position: None,
        }
    }

    /// Create a measurement carrying classically-controlled rotations.
    pub fn with_controlled(basis: PauliString, phase: bool, controlled: Vec<Rotation>) -> Self {
        Self {
            basis,
            phase,
            controlled,
            output_position: None,
        }
    }

    /// Create a measurement from paired axis and qubit lists.
    pub fn from_axes(width: usize, phase: bool, axes: &[Axis], qubits: &[usize]) -> IrResult<Self> {
        Ok(Self::new(PauliString::from_axes(width, axes, qubits)?, phase))
    }

    /// True when at least one rotation is conditioned on the outcome.
    pub fn has_controlled(&self) -> bool {
        !self.controlled.is_empty()
    }
}

/// Output position is bookkeeping, not identity; degenerate identity-basis
/// measurements compare equal.
impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        (self.basis == other.basis
            && self.phase == other.phase
            && self.controlled == other.controlled)
            || (self.basis.is_identity() && other.basis.is_identity())
    }
}

impl Eq for Measurement {}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{} {}", if self.phase { '+' } else { '-' }, self.basis)
    }
}

/// One element of a section: a rotation or a measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// A Pauli-product rotation.
    Rotation(Rotation),
    /// A Pauli-product measurement.
    Measurement(Measurement),
}

impl Operation {
    /// The Pauli string of either variant.
    pub fn basis(&self) -> &PauliString {
        match self {
            Operation::Rotation(r) => &r.basis,
            Operation::Measurement(m) => &m.basis,
        }
    }

    /// Number of qubits the operation is defined over.
    pub fn width(&self) -> usize {
        self.basis().width()
    }

    /// True for the rotation variant.
    pub fn is_rotation(&self) -> bool {
        matches!(self, Operation::Rotation(_))
    }

    /// The rotation payload, if any.
    pub fn as_rotation(&self) -> Option<&Rotation> {
        match self {
            Operation::Rotation(r) => Some(r),
            Operation::Measurement(_) => None,
        }
    }

    /// The measurement payload, if any.
    pub fn as_measurement(&self) -> Option<&Measurement> {
        match self {
            Operation::Rotation(_) => None,
            Operation::Measurement(m) => Some(m),
        }
    }

    /// True for a T-class rotation; measurements are never T.
    pub fn is_t(&self) -> bool {
        match self {
            Operation::Rotation(r) => r.is_t(),
            Operation::Measurement(_) => false,
        }
    }

    /// True when the underlying Pauli string is the identity.
    pub fn is_identity(&self) -> bool {
        self.basis().is_identity()
    }

    /// Symplectic commutation of the underlying Pauli strings.
    pub fn commutes_with(&self, other: &Operation) -> bool {
        self.basis().commutes_with(other.basis())
    }
}

impl From<Rotation> for Operation {
    fn from(r: Rotation) -> Self {
        Operation::Rotation(r)
    }
}

impl From<Measurement> for Operation {
    fn from(m: Measurement) -> Self {
        Operation::Measurement(m)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Rotation(r) => r.fmt(f),
            Operation::Measurement(m) => m.fmt(f),
        }
    }
}
