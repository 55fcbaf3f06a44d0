//! Alsvid operation-level IR
//!
//! Core data structures for the Alsvid Clifford+T optimizer: the circuit
//! here is not a gate DAG but a flat, ordered sequence of Pauli-product
//! rotations and measurements, the form the lattice-surgery pipeline hands
//! to the optimizer one section at a time.
//!
//! # Core components
//!
//! - **Pauli strings**: [`PauliString`] encodes a tensor product over all
//!   qubits as an (X, Z) bit-plane pair; [`Axis`] names the single-qubit
//!   factors and [`QubitMask`]/[`BlockAction`] classify supports against
//!   the data/ancilla split.
//! - **Operations**: [`Rotation`] (quarter-turn-lattice angle) and
//!   [`Measurement`] (signed basis plus classically-controlled rotations),
//!   summed in [`Operation`].
//! - **Sections**: [`Section`] owns one ordered span of operations ending
//!   in measurements, with its ancilla split.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Axis, Operation, Rotation, Section};
//!
//! // A T rotation on qubit 0 of a 2-qubit section, measured out in Z.
//! let t = Rotation::from_axes(2, 1, &[Axis::X], &[0]).unwrap();
//! let section = Section::with_default_measurements(vec![Operation::from(t)], 2).unwrap();
//! assert_eq!(section.len(), 3);
//! ```

pub mod error;
pub mod operation;
pub mod pauli;
pub mod section;

pub use error::{IrError, IrResult};
pub use operation::{Measurement, Operation, Rotation};
pub use pauli::{Axis, BlockAction, PauliString, QubitMask};
pub use section::Section;
