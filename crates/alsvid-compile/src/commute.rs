//! The Pauli-frame commutation rewriter.
//!
//! Reordering `P·Q` into `Q′·P` for anticommuting operands turns `Q` into
//! `±i·PQ`; the bit planes of the product come from a plane-wise XOR and
//! the sign from the parity census below. Callers are expected to have
//! checked anticommutation; the transform is only meaningful there.

use alsvid_ir::{Measurement, PauliString, Rotation};

use crate::error::{CompileError, CompileResult};

/// Parity of the four sign-bearing single-qubit meetings between `p` and
/// `q`: Z·X, Y·X, Z·Y and Y·Y.
fn sign_parities(p: &PauliString, q: &PauliString) -> [bool; 4] {
    let mut counts = [0u32; 4];
    let planes = p
        .x_words()
        .iter()
        .zip(p.z_words())
        .zip(q.x_words().iter().zip(q.z_words()));
    for ((&px, &pz), (&qx, &qz)) in planes {
        let pz_only = !px & pz;
        let py = px & pz;
        let qx_only = qx & !qz;
        let qy = qx & qz;
        counts[0] += (pz_only & qx_only).count_ones();
        counts[1] += (py & qx_only).count_ones();
        counts[2] += (pz_only & qy).count_ones();
        counts[3] += (py & qy).count_ones();
    }
    counts.map(|c| c % 2 == 1)
}

/// Net count of imaginary factors picked up by the Y decompositions.
fn y_census(p: &PauliString, q: &PauliString, product: &PauliString) -> i64 {
    i64::from(p.count_y()) + i64::from(q.count_y()) - i64::from(product.count_y()) + 1
}

/// Rewrite the moved rotation `moved` as it crosses leftward over `past`.
///
/// `past` must be a Pauli (angle 0) or Clifford (angle ±2) rotation; a
/// Pauli crossing just negates the moved angle, a Clifford crossing
/// produces the product basis with the census-determined sign.
pub fn rewrite_rotation(past: &Rotation, moved: &Rotation) -> CompileResult<Rotation> {
    if past.angle == 0 {
        return Ok(Rotation {
            basis: moved.basis.clone(),
            angle: -moved.angle,
        });
    }
    if past.angle.abs() != 2 {
        return Err(CompileError::NonCliffordReorder {
            past: past.angle,
            moved: moved.angle,
        });
    }

    let basis = &past.basis ^ &moved.basis;
    let mut negate = past.angle < 0;
    for parity in sign_parities(&past.basis, &moved.basis) {
        negate ^= parity;
    }
    if y_census(&past.basis, &moved.basis, &basis).rem_euclid(4) == 0 {
        negate = !negate;
    }

    Ok(Rotation {
        basis,
        angle: if negate { -moved.angle } else { moved.angle },
    })
}

/// Rewrite an anticommuting measurement as the rotation `past` crosses it.
///
/// A Pauli crossing flips the sign; a Clifford crossing moves the
/// measurement to the product basis with the census-determined sign, a
/// −π/4 crossing contributing one extra flip. Controlled rotations ride
/// along in the new frame: each one anticommuting with `past` is rewritten
/// by the rotation rule.
pub fn rewrite_measurement(past: &Rotation, measurement: &Measurement) -> CompileResult<Measurement> {
    let mut out = measurement.clone();

    if past.angle == 0 {
        out.phase = !out.phase;
    } else if past.angle.abs() == 2 {
        out.basis = &past.basis ^ &measurement.basis;
        for parity in sign_parities(&past.basis, &measurement.basis) {
            if parity {
                out.phase = !out.phase;
            }
        }
        // The measurement frame takes the opposite census branch from the
        // rotation frame; both are pinned by the reference fixtures.
        if y_census(&past.basis, &measurement.basis, &out.basis).rem_euclid(4) != 0 {
            out.phase = !out.phase;
        }
        if past.angle == -2 {
            out.phase = !out.phase;
        }
    } else {
        return Err(CompileError::NonCliffordAbsorption(past.angle));
    }

    for controlled in &mut out.controlled {
        if !controlled.basis.commutes_with(&past.basis) {
            *controlled = rewrite_rotation(past, controlled)?;
        }
    }

    Ok(out)
}
