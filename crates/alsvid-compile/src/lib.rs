//! Alsvid Clifford+T section optimizer
//!
//! Rewrites a flat section of Pauli-product rotations and measurements
//! into a canonical form: every non-Clifford (T-class) rotation pushed to
//! the front of the sequence, compatible rotations fused, and trailing
//! Clifford/Pauli rotations absorbed into the measurement block as a
//! change of basis. The logical semantics of the section are preserved up
//! to global phase and the classical measurement record.
//!
//! # Architecture
//!
//! ```text
//! Section ──▶ Optimizer::run
//!               │
//!               ├── forward:  T-forwarding (sliced, parallel)
//!               ├── layer:    commuting-layer partitioning (chunked)
//!               ├── combine:  in-layer rotation fusion
//!               │   └── repeat until a round fuses nothing
//!               └── absorb:   measurements swallow the Clifford tail
//!               │
//!               ▼
//! rewritten Section + split index (carry-forward cut point)
//! ```
//!
//! The commutation algebra lives in [`commute`]: reordering `P·Q` to
//! `Q′·P` rewrites the moved operand to `±i·PQ`, with the sign tracked
//! bit-parallel over the Pauli bit planes.
//!
//! # Example
//!
//! ```rust
//! use alsvid_compile::{Optimizer, RunOptions};
//! use alsvid_ir::{Axis, Operation, Rotation, Section};
//!
//! // A Pauli Z and a T rotation, measured out in Z on both qubits.
//! let z = Rotation::from_axes(2, 0, &[Axis::Z], &[1]).unwrap();
//! let t = Rotation::from_axes(2, 1, &[Axis::Z], &[0]).unwrap();
//! let section = Section::with_default_measurements(
//!     vec![Operation::from(z), Operation::from(t)],
//!     2,
//! )
//! .unwrap();
//!
//! let mut optimizer = Optimizer::new(section);
//! let outcome = optimizer
//!     .run(RunOptions {
//!         absorb_into_measurements: true,
//!         emit_layers: false,
//!     })
//!     .unwrap();
//!
//! // The T leads the section; the Pauli moved behind the measurements.
//! assert_eq!(outcome.t_count, 1);
//! assert_eq!(outcome.split_index, 3);
//! ```

pub mod absorb;
pub mod combine;
pub mod commute;
pub mod config;
pub mod error;
pub mod forward;
pub mod layer;
pub mod optimizer;

pub use absorb::absorb_into_measurements;
pub use combine::{combine_ops, combine_rotations, reduce_layer};
pub use commute::{rewrite_measurement, rewrite_rotation};
pub use config::OptimizerConfig;
pub use error::{CompileError, CompileResult};
pub use forward::{push_t_forward, push_t_forward_serial};
pub use layer::{partition_into_layers, Layer};
pub use optimizer::{OptimizeOutcome, Optimizer, RunOptions};
