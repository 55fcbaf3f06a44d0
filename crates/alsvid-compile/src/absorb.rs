//! Absorption of trailing Clifford/Pauli rotations into measurements.
//!
//! After T-forwarding and fusion the section is a T-prefix, a run of
//! Clifford/Pauli rotations and a trailing measurement block. This pass
//! walks the rotation run right to left and absorbs each rotation into the
//! measurement block as a change of basis: anticommuting measurements are
//! rewritten, and the rotation itself is either deleted (it acted only on
//! ancillas that are measured out) or moved behind the block for the
//! caller to splice into the next section.

use rustc_hash::FxHashSet;

use alsvid_ir::{BlockAction, Operation, QubitMask};

use crate::commute::{rewrite_measurement, rewrite_rotation};
use crate::error::CompileResult;

/// Absorb the non-T tail of `ops` into its trailing measurement block.
///
/// `t_count` is the length of the T-prefix, which the scan never enters.
/// Returns the number of rotations moved behind the measurement block;
/// moved rotations keep their relative order.
pub fn absorb_into_measurements(
    ops: &mut Vec<Operation>,
    width: usize,
    ancilla_begin: usize,
    t_count: usize,
) -> CompileResult<usize> {
    // The trailing measurement block and the union of its supports.
    let mut first_measurement = ops.len();
    let mut measured = QubitMask::empty(width);
    while first_measurement > t_count {
        match &ops[first_measurement - 1] {
            Operation::Measurement(m) => {
                measured.union_with(&m.basis.support());
                first_measurement -= 1;
            }
            Operation::Rotation(_) => break,
        }
    }

    let ancillas = QubitMask::ancilla_block(width, ancilla_begin);
    let mut move_set: FxHashSet<usize> = FxHashSet::default();
    let mut delete_set: FxHashSet<usize> = FxHashSet::default();

    let mut index = first_measurement;
    while index > t_count {
        index -= 1;
        let rotation = match &ops[index] {
            Operation::Rotation(r) => r.clone(),
            // Tail contract: rotations then measurements. A measurement
            // this far left ends the absorbable region.
            Operation::Measurement(_) => break,
        };

        let touched_ancillas = ancillas.intersection(&rotation.basis.support());
        let blocked = match rotation.basis.block_action(ancilla_begin) {
            // Some touched ancilla is never measured out.
            BlockAction::Ancilla => !measured.contains_all(&touched_ancillas),
            // Entangles data with an ancilla that is measured out.
            BlockAction::Mixed => touched_ancillas.intersects(&measured),
            BlockAction::Data => false,
        };
        if blocked {
            break;
        }

        for slot in first_measurement..ops.len() {
            if let Operation::Measurement(m) = &mut ops[slot] {
                if !rotation.basis.commutes_with(&m.basis) {
                    *m = rewrite_measurement(&rotation, m)?;
                } else {
                    for controlled in &mut m.controlled {
                        if !controlled.basis.commutes_with(&rotation.basis) {
                            *controlled = rewrite_rotation(&rotation, controlled)?;
                        }
                    }
                }
            }
        }

        if rotation.basis.block_action(ancilla_begin) == BlockAction::Ancilla
            && measured.contains_all(&touched_ancillas)
        {
            delete_set.insert(index);
        } else {
            move_set.insert(index);
        }
    }

    // Compact: survivors keep order, moved rotations follow the block.
    let tail: Vec<Operation> = ops.drain(t_count..).collect();
    let mut moved = Vec::with_capacity(move_set.len());
    let mut kept = Vec::with_capacity(tail.len());
    for (offset, op) in tail.into_iter().enumerate() {
        let at = t_count + offset;
        if move_set.contains(&at) {
            moved.push(op);
        } else if !delete_set.contains(&at) {
            kept.push(op);
        }
    }
    let moved_count = moved.len();
    ops.extend(kept);
    ops.extend(moved);

    Ok(moved_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::Axis::{self, X, Y, Z};
    use alsvid_ir::{Measurement, Rotation};

    fn rot(width: usize, angle: i8, axes: &[Axis], qubits: &[usize]) -> Operation {
        Operation::Rotation(Rotation::from_axes(width, angle, axes, qubits).unwrap())
    }

    fn meas(width: usize, phase: bool, axes: &[Axis], qubits: &[usize]) -> Operation {
        Operation::Measurement(Measurement::from_axes(width, phase, axes, qubits).unwrap())
    }

    #[test]
    fn test_pauli_tail_flips_measurement_phases() {
        // Five Pauli rotations ahead of two Z measurements: every one
        // commutes through or flips a phase, and all five move behind the
        // block in their original order.
        let mut ops = vec![
            rot(2, 0, &[X], &[0]),
            rot(2, 0, &[X, Y], &[0, 1]),
            rot(2, 0, &[Z], &[0]),
            rot(2, 0, &[Z, Z], &[0, 1]),
            rot(2, 0, &[Z], &[1]),
            meas(2, true, &[Z], &[0]),
            meas(2, true, &[Z], &[1]),
        ];
        let moved = absorb_into_measurements(&mut ops, 2, 2, 0).unwrap();
        assert_eq!(moved, 5);
        assert_eq!(
            ops,
            vec![
                meas(2, true, &[Z], &[0]),
                meas(2, false, &[Z], &[1]),
                rot(2, 0, &[X], &[0]),
                rot(2, 0, &[X, Y], &[0, 1]),
                rot(2, 0, &[Z], &[0]),
                rot(2, 0, &[Z, Z], &[0, 1]),
                rot(2, 0, &[Z], &[1]),
            ]
        );
    }

    #[test]
    fn test_clifford_changes_measurement_basis() {
        let mut ops = vec![
            rot(2, 2, &[X, X], &[0, 1]),
            meas(2, true, &[Y], &[0]),
        ];
        let moved = absorb_into_measurements(&mut ops, 2, 2, 0).unwrap();
        assert_eq!(moved, 1);
        assert_eq!(
            ops,
            vec![meas(2, false, &[Z, X], &[0, 1]), rot(2, 2, &[X, X], &[0, 1])]
        );
    }

    // The ancilla fixtures: 4 qubits, ancillas begin at index 2.

    #[test]
    fn test_data_rotations_move_past_ancilla_measurement() {
        let mut ops = vec![
            rot(4, 2, &[X], &[0]),
            rot(4, 2, &[X], &[1]),
            meas(4, true, &[X], &[2]),
        ];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(
            ops,
            vec![
                meas(4, true, &[X], &[2]),
                rot(4, 2, &[X], &[0]),
                rot(4, 2, &[X], &[1]),
            ]
        );
    }

    #[test]
    fn test_single_data_rotation_moves() {
        let mut ops = vec![rot(4, 2, &[X], &[0]), meas(4, true, &[X], &[2])];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 1);
        assert_eq!(ops, vec![meas(4, true, &[X], &[2]), rot(4, 2, &[X], &[0])]);
    }

    #[test]
    fn test_measured_ancilla_rotation_deleted() {
        // The rotation acts only on ancilla 0, which the block measures
        // out: it has no observable effect and is dropped.
        let mut ops = vec![rot(4, 2, &[X], &[2]), meas(4, true, &[X], &[2])];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(ops, vec![meas(4, true, &[X], &[2])]);
    }

    #[test]
    fn test_unmeasured_ancilla_rotation_blocks() {
        // Ancilla-only rotation whose qubit is not measured: nothing may
        // be absorbed past it.
        let mut ops = vec![rot(4, 2, &[X], &[2]), meas(4, true, &[X], &[0])];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(ops, vec![rot(4, 2, &[X], &[2]), meas(4, true, &[X], &[0])]);
    }

    #[test]
    fn test_data_rotation_moves_past_data_measurement_block() {
        // Rotation on data qubit 0 ahead of a measurement of that same
        // qubit: 'd' support always commutes through or rewrites, here it
        // anticommutes and moves. X0 vs X0 commute, so it just moves.
        let mut ops = vec![rot(4, 2, &[X], &[2]), meas(4, true, &[X], &[0])];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 0);

        let mut ops = vec![rot(4, 2, &[X], &[0]), meas(4, true, &[X], &[0])];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 1);
        assert_eq!(ops, vec![meas(4, true, &[X], &[0]), rot(4, 2, &[X], &[0])]);
    }

    #[test]
    fn test_mixed_rotation_with_measured_ancilla_blocks() {
        let mut ops = vec![
            rot(4, 2, &[X, Z], &[0, 2]),
            meas(4, true, &[X], &[2]),
        ];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(
            ops,
            vec![rot(4, 2, &[X, Z], &[0, 2]), meas(4, true, &[X], &[2])]
        );

        let mut ops = vec![
            rot(4, 2, &[X, Z, X], &[0, 2, 3]),
            meas(4, true, &[X], &[3]),
        ];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(
            ops,
            vec![
                rot(4, 2, &[X, Z, X], &[0, 2, 3]),
                meas(4, true, &[X], &[3]),
            ]
        );
    }

    #[test]
    fn test_blocked_rotation_stops_the_whole_scan() {
        // The unmeasured-ancilla rotation freezes the pass; the data
        // rotation to its left stays in place even though it could move.
        let mut ops = vec![
            rot(4, 2, &[X], &[0]),
            rot(4, 2, &[X], &[2]),
            meas(4, true, &[X], &[0]),
        ];
        let moved = absorb_into_measurements(&mut ops, 4, 2, 0).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(
            ops,
            vec![
                rot(4, 2, &[X], &[0]),
                rot(4, 2, &[X], &[2]),
                meas(4, true, &[X], &[0]),
            ]
        );
    }

    #[test]
    fn test_controlled_rotations_rewritten_behind_commuting_measurement() {
        // X1 commutes with the Z0 measurement but anticommutes with its
        // controlled Z1 tail rotation, which picks up the crossed frame.
        let controlled = vec![
            Rotation::from_axes(2, -2, &[Z], &[1]).unwrap(),
            Rotation::from_axes(2, -2, &[Z], &[0]).unwrap(),
        ];
        let m = Measurement::with_controlled(
            Rotation::from_axes(2, 0, &[Z], &[0]).unwrap().basis,
            true,
            controlled,
        );
        let mut ops = vec![rot(2, 0, &[X], &[1]), Operation::Measurement(m)];
        let moved = absorb_into_measurements(&mut ops, 2, 2, 0).unwrap();
        assert_eq!(moved, 1);
        let out = ops[0].as_measurement().unwrap();
        assert!(out.phase);
        assert_eq!(out.controlled[0], Rotation::from_axes(2, 2, &[Z], &[1]).unwrap());
        assert_eq!(out.controlled[1], Rotation::from_axes(2, -2, &[Z], &[0]).unwrap());
    }

    #[test]
    fn test_t_prefix_untouched() {
        let mut ops = vec![
            rot(2, 1, &[X], &[0]),
            rot(2, 0, &[Z], &[0]),
            meas(2, true, &[X], &[0]),
        ];
        let moved = absorb_into_measurements(&mut ops, 2, 2, 1).unwrap();
        assert_eq!(moved, 1);
        assert_eq!(
            ops,
            vec![
                rot(2, 1, &[X], &[0]),
                meas(2, false, &[X], &[0]),
                rot(2, 0, &[Z], &[0]),
            ]
        );
    }
}
