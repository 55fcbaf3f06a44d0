//! Greedy partitioning into layers of mutually commuting operations.
//!
//! Layering starts from one operation per layer and repeatedly pulls a
//! rotation into the preceding layer when it commutes with everything
//! already there, so the concatenation of layers stays equivalent to the
//! input: any two non-commuting operations keep their relative order. A
//! measurement stops the sweep: measurements keep their own layers and
//! nothing reorders across them.

use rayon::prelude::*;

use alsvid_ir::Operation;

use crate::config::OptimizerConfig;

/// One group of mutually commuting operations.
pub type Layer = Vec<Operation>;

/// Greedy fixpoint reduction of a layer list, in place.
///
/// Returns whether any operation moved.
pub fn reduce_layers(layers: &mut Vec<Layer>) -> bool {
    let mut changed = false;
    let mut settled = false;
    while !settled {
        settled = true;
        let mut index = 0;
        let mut saw_measurement = false;
        while index + 1 < layers.len() {
            if layers[index].is_empty() {
                layers.remove(index);
                continue;
            }

            let mut pulled = Vec::new();
            for (offset, op) in layers[index + 1].iter().enumerate() {
                if !op.is_rotation() {
                    saw_measurement = true;
                    break;
                }
                if layers[index].iter().all(|held| op.commutes_with(held)) {
                    pulled.push(offset);
                }
            }

            if !pulled.is_empty() {
                let mut moved = Vec::with_capacity(pulled.len());
                for &offset in pulled.iter().rev() {
                    moved.push(layers[index + 1].remove(offset));
                }
                moved.reverse();
                layers[index].extend(moved);
                settled = false;
                changed = true;
            }

            if layers[index + 1].is_empty() {
                layers.remove(index + 1);
            } else {
                index += 1;
            }

            if saw_measurement {
                break;
            }
        }
    }
    changed
}

/// Partition an operation sequence into commuting layers.
///
/// While the layer count exceeds the serial limit the list is cut into up
/// to `max_slices` contiguous chunks reduced in parallel; chunk seams are
/// not merged in that phase, and if no chunk makes progress the seams are
/// left as they are. Once the list fits the serial limit, one serial
/// fixpoint sweep finishes the job.
pub fn partition_into_layers(ops: Vec<Operation>, config: &OptimizerConfig) -> Vec<Layer> {
    let mut layers: Vec<Layer> = ops.into_iter().map(|op| vec![op]).collect();

    while layers.len() > config.serial_layer_limit {
        let chunk_len = layers.len().div_ceil(config.max_slices.max(1)).max(2);
        let mut chunks: Vec<Vec<Layer>> = Vec::with_capacity(config.max_slices + 1);
        let mut rest = layers;
        while rest.len() > chunk_len {
            let tail = rest.split_off(chunk_len);
            chunks.push(rest);
            rest = tail;
        }
        chunks.push(rest);

        let progressed: Vec<bool> = chunks.par_iter_mut().map(reduce_layers).collect();
        layers = chunks.into_iter().flatten().collect();

        if !progressed.into_iter().any(|p| p) {
            return layers;
        }
    }

    reduce_layers(&mut layers);
    layers
}
