//! The T-forwarding pass.
//!
//! Moves every T-class rotation to the front of a range without disturbing
//! the order of T's among themselves or of non-T's among themselves. Each
//! T bubbles leftward one neighbour at a time: a commuting neighbour is a
//! pure swap, an anticommuting Pauli or Clifford neighbour rewrites the T
//! in the crossed frame. Measurements act as non-T barriers.

use rayon::prelude::*;

use alsvid_ir::Operation;

use crate::commute::rewrite_rotation;
use crate::config::OptimizerConfig;
use crate::error::{CompileError, CompileResult};

/// Serial T-forwarding over one contiguous range.
///
/// Returns the split index: everything before it is a T, everything from
/// it on is a non-T.
pub fn push_t_forward_serial(ops: &mut [Operation]) -> CompileResult<usize> {
    let mut frontier = match ops.iter().position(|op| !op.is_t()) {
        Some(first_non_t) => first_non_t,
        None => return Ok(ops.len()),
    };

    for index in frontier + 1..ops.len() {
        if !ops[index].is_t() {
            continue;
        }
        let mut pivot = index;
        while pivot > frontier {
            let (left, right) = ops.split_at_mut(pivot);
            let past = &left[pivot - 1];
            let moved = &mut right[0];
            if !moved.commutes_with(past) {
                let Operation::Rotation(past_rotation) = past else {
                    return Err(CompileError::TAcrossMeasurement);
                };
                if let Operation::Rotation(moved_rotation) = moved {
                    *moved_rotation = rewrite_rotation(past_rotation, moved_rotation)?;
                }
            }
            ops.swap(pivot - 1, pivot);
            pivot -= 1;
        }
        frontier += 1;
    }

    Ok(frontier)
}

/// Sliced parallel T-forwarding over the whole sequence.
///
/// The sequence splits into up to `max_slices` contiguous slices of at
/// least `min_slice_ops` operations; each slice forwards serially behind a
/// join barrier. The first slice's T-prefix and the last slice's non-T
/// tail are then fixed, and the interior re-runs with one slice fewer
/// until a single slice remains; a final serial pass yields the split.
pub fn push_t_forward(ops: &mut [Operation], config: &OptimizerConfig) -> CompileResult<usize> {
    let mut begin = 0;
    let mut end = ops.len();
    let mut slices = slice_count(end - begin, config);

    while slices > 1 {
        let range = &mut ops[begin..end];
        let chunk_len = range.len().div_ceil(slices);
        let results: Vec<CompileResult<usize>> = range
            .par_chunks_mut(chunk_len)
            .map(push_t_forward_serial)
            .collect();

        let mut splits = Vec::with_capacity(results.len());
        for (chunk_index, result) in results.into_iter().enumerate() {
            splits.push(begin + chunk_index * chunk_len + result?);
        }
        begin = splits[0];
        end = splits[splits.len() - 1];
        slices = (slices - 1).min(slice_count(end - begin, config));
    }

    Ok(begin + push_t_forward_serial(&mut ops[begin..end])?)
}

fn slice_count(len: usize, config: &OptimizerConfig) -> usize {
    if config.min_slice_ops == 0 {
        return 1;
    }
    (len / config.min_slice_ops).clamp(1, config.max_slices.max(1))
}
