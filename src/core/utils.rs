//! Helper functions for operator expansion and state-index bit manipulation.

use ndarray::Array2;
use num_complex::Complex64;

/// Generates the full operator matrix ($2^N \times 2^N$) for the whole system.
///
/// Expands a local operator acting on `targets` (and controlled by `controls`)
/// to an operator on the full register of `num_total_qubits`. Qubit `i`
/// corresponds to bit `i` of the state index.
pub fn expand_operator(
    num_total_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
    controls: &[usize],
) -> Array2<Complex64> {
    let dim = 1 << num_total_qubits;
    let mut full_matrix = Array2::<Complex64>::zeros((dim, dim));

    let mut control_mask = 0usize;
    for &c in controls {
        control_mask |= 1 << c;
    }
    let mut target_mask = 0usize;
    for &t in targets {
        target_mask |= 1 << t;
    }
    // Bits outside the targets pass through unchanged.
    let passive_mask = !target_mask;

    for col_idx in 0..dim {
        // Basis states where not all control qubits are 1 are untouched.
        if (col_idx & control_mask) != control_mask {
            full_matrix[[col_idx, col_idx]] = Complex64::new(1.0, 0.0);
            continue;
        }

        let small_col = extract_bits(col_idx, targets);
        for small_row in 0..matrix.nrows() {
            let val = matrix[[small_row, small_col]];
            if val.norm_sqr() < f64::EPSILON {
                continue;
            }
            // Preserve passive bits, scatter the local row bits back to the
            // physical target positions.
            let new_target_bits = deposit_bits(small_row, targets);
            let row_idx = (col_idx & passive_mask) | new_target_bits;
            full_matrix[[row_idx, col_idx]] = val;
        }
    }

    full_matrix
}

/// Gathers the bits of `value` at positions `indices` into a compact value.
fn extract_bits(value: usize, indices: &[usize]) -> usize {
    let mut result = 0;
    for (i, &pos) in indices.iter().enumerate() {
        if (value >> pos) & 1 == 1 {
            result |= 1 << i;
        }
    }
    result
}

/// Scatters the i-th bit of `compact_value` to bit position `indices[i]`.
fn deposit_bits(compact_value: usize, indices: &[usize]) -> usize {
    let mut result = 0;
    for (i, &pos) in indices.iter().enumerate() {
        if (compact_value >> i) & 1 == 1 {
            result |= 1 << pos;
        }
    }
    result
}

/// Find duplicate in a slice of usize
pub fn find_duplicate(indices: &[usize]) -> Option<usize> {
    let mut seen = std::collections::HashSet::new();
    indices.iter().find(|&&idx| !seen.insert(idx)).copied()
}
