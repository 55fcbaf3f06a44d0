//! Rotation fusion on the quarter-turn lattice.

use alsvid_ir::{Operation, Rotation};

/// Try to fuse two rotations into at most one.
///
/// Returns `(combined, result)`: on success the result holds zero or one
/// rotation, on refusal it returns the two inputs unchanged. The rules, in
/// order: identities drop out; differing bases refuse; a zero angle sum
/// cancels; a Pauli (angle 0) only fuses with a −2 partner, the sum
/// normalizing to +2; a ±3 sum falls outside the lattice and refuses; a ±4
/// sum collapses to a Pauli.
pub fn combine_rotations(a: &Rotation, b: &Rotation) -> (bool, Vec<Rotation>) {
    match (a.is_identity(), b.is_identity()) {
        (true, true) => return (true, vec![]),
        (true, false) => return (true, vec![b.clone()]),
        (false, true) => return (true, vec![a.clone()]),
        (false, false) => {}
    }

    if a.basis != b.basis {
        return (false, vec![a.clone(), b.clone()]);
    }

    let mut angle = a.angle + b.angle;
    if angle == 0 {
        return (true, vec![]);
    }

    if a.angle == 0 || b.angle == 0 {
        if !matches!((a.angle, b.angle), (-2, 0) | (0, -2)) {
            return (false, vec![a.clone(), b.clone()]);
        }
        // Pauli plus inverse Clifford lands on the positive quarter turn.
        angle = 2;
    }

    if angle.abs() == 3 {
        return (false, vec![a.clone(), b.clone()]);
    }
    if angle.abs() == 4 {
        angle = 0;
    }

    (
        true,
        vec![Rotation {
            basis: a.basis.clone(),
            angle,
        }],
    )
}

/// Operation-level fusion: rotations delegate to [`combine_rotations`],
/// measurements never combine.
pub fn combine_ops(a: &Operation, b: &Operation) -> Option<Vec<Rotation>> {
    match (a.as_rotation(), b.as_rotation()) {
        (Some(a), Some(b)) => {
            let (combined, result) = combine_rotations(a, b);
            combined.then_some(result)
        }
        _ => None,
    }
}

/// One greedy fusion sweep over a mutually-commuting operation list.
///
/// Measurements never fuse. Returns whether the sweep changed anything.
pub fn reduce_layer_once(ops: &mut Vec<Operation>) -> bool {
    if ops.len() == 1 {
        return match &ops[0] {
            Operation::Rotation(r) if r.is_identity() => {
                ops.clear();
                true
            }
            _ => false,
        };
    }

    let mut changed = false;
    let mut i = 0;
    let mut j = 1;
    while ops.len() > 1 && i < ops.len() - 1 {
        match combine_ops(&ops[i], &ops[j]) {
            Some(result) => {
                match result.into_iter().next() {
                    Some(rotation) => {
                        ops[i] = Operation::Rotation(rotation);
                        ops.remove(j);
                    }
                    None => {
                        // Remove the right element first to keep i valid.
                        ops.remove(j);
                        ops.remove(i);
                    }
                }
                changed = true;
            }
            None => j += 1,
        }
        if j >= ops.len() {
            i += 1;
            j = i + 1;
        }
    }
    changed
}

/// Fuse a mutually-commuting operation list to its fixpoint.
pub fn reduce_layer(ops: &mut Vec<Operation>) -> bool {
    if ops.is_empty() {
        return false;
    }
    let changed = reduce_layer_once(ops);
    if changed {
        while reduce_layer_once(ops) {}
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Axis, PauliString};

    fn rot(angle: i8, axes: &[Axis], qubits: &[usize]) -> Rotation {
        Rotation::from_axes(3, angle, axes, qubits).unwrap()
    }

    fn identity() -> Rotation {
        Rotation::new(PauliString::identity(3), 0).unwrap()
    }

    use Axis::{X, Y, Z};

    #[test]
    fn test_combine_rotations() {
        let xyz = |angle| rot(angle, &[X, Y, Z], &[0, 1, 2]);
        let cases: Vec<(Rotation, Rotation, bool, Vec<Rotation>)> = vec![
            (xyz(2), xyz(2), true, vec![xyz(0)]),
            (identity(), identity(), true, vec![]),
            (xyz(0), identity(), true, vec![xyz(0)]),
            (identity(), xyz(1), true, vec![xyz(1)]),
            (rot(0, &[Y], &[1]), xyz(1), false, vec![rot(0, &[Y], &[1]), xyz(1)]),
            (
                rot(-1, &[X, Z, Z], &[0, 1, 2]),
                xyz(1),
                false,
                vec![rot(-1, &[X, Z, Z], &[0, 1, 2]), xyz(1)],
            ),
            (xyz(-2), xyz(-1), false, vec![xyz(-2), xyz(-1)]),
            (xyz(1), xyz(-1), true, vec![]),
            (xyz(1), xyz(-2), true, vec![xyz(-1)]),
            (xyz(0), xyz(0), true, vec![]),
            (xyz(0), xyz(-2), true, vec![xyz(2)]),
            (rot(1, &[X], &[0]), rot(1, &[X], &[0]), true, vec![rot(2, &[X], &[0])]),
        ];
        for (idx, (a, b, expect_combined, expect)) in cases.iter().enumerate() {
            let (combined, result) = combine_rotations(a, b);
            assert_eq!(combined, *expect_combined, "combined flag, case {idx}");
            assert_eq!(&result, expect, "result, case {idx}");
        }
    }

    fn ops(rotations: &[Rotation]) -> Vec<Operation> {
        rotations.iter().cloned().map(Operation::Rotation).collect()
    }

    #[test]
    fn test_reduce_layer_once() {
        let yxz = |angle| rot(angle, &[Y, X, Z], &[0, 1, 2]);
        let izi = rot(0, &[Z], &[1]);

        let cases: Vec<(Vec<Operation>, Vec<Operation>, bool)> = vec![
            (ops(&[identity()]), vec![], true),
            (ops(&[identity(), izi.clone()]), ops(&[izi.clone()]), true),
            (
                ops(&[yxz(1), yxz(-2), yxz(0)]),
                ops(&[yxz(-1), yxz(0)]),
                true,
            ),
            (ops(&[yxz(1)]), ops(&[yxz(1)]), false),
            (ops(&[yxz(0), yxz(-2), yxz(-2)]), vec![], true),
            (
                ops(&[yxz(0), yxz(1), izi.clone()]),
                ops(&[yxz(0), yxz(1), izi.clone()]),
                false,
            ),
            (
                ops(&[yxz(1), yxz(1), izi.clone(), yxz(-2), yxz(-1), yxz(1)]),
                ops(&[izi.clone()]),
                true,
            ),
        ];
        for (idx, (input, expect, expect_changed)) in cases.into_iter().enumerate() {
            let mut layer = input;
            let changed = reduce_layer_once(&mut layer);
            assert_eq!(changed, expect_changed, "changed flag, case {idx}");
            assert_eq!(layer, expect, "layer, case {idx}");
        }
    }

    #[test]
    fn test_reduce_layer_fixpoint() {
        let yxz = |angle| rot(angle, &[Y, X, Z], &[0, 1, 2]);

        let mut layer = ops(&[yxz(0), yxz(1), yxz(1), yxz(2), identity()]);
        assert!(reduce_layer(&mut layer));
        assert!(layer.is_empty());

        let mut layer = ops(&[yxz(0), yxz(2), yxz(1), yxz(2), yxz(-1), yxz(-1)]);
        assert!(reduce_layer(&mut layer));
        assert_eq!(layer, ops(&[yxz(-1)]));

        let mut layer: Vec<Operation> = vec![];
        assert!(!reduce_layer(&mut layer));
    }

    #[test]
    fn test_measurements_never_fuse() {
        let basis = PauliString::from_axes(3, &[Z], &[0]).unwrap();
        let m = Operation::Measurement(alsvid_ir::Measurement::new(basis, true));
        let mut layer = vec![m.clone(), m.clone()];
        assert!(!reduce_layer(&mut layer));
        assert_eq!(layer, vec![m.clone(), m]);
    }
}
