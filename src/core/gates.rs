use crate::core::errors::GateError;
use crate::core::utils;
use ndarray::{Array2, arr2};
use num_complex::Complex64;

/// Represents a quantum gate.
///
/// A gate is defined by its unitary matrix and the number of qubits it acts on.
#[derive(Debug)]
pub struct Gate {
    /// The unitary matrix of the gate.
    pub matrix: Array2<Complex64>,
    /// The number of qubits the gate acts on.
    pub num_qubits: usize,
}

impl Gate {
    /// Creates a new `Gate` from a unitary matrix.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if the matrix is not square, its dimensions are
    /// not a power of 2, or it is not unitary.
    pub fn new(matrix: Array2<Complex64>) -> Result<Self, GateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(GateError::NotSquareMatrix);
        }
        if !rows.is_power_of_two() {
            return Err(GateError::InvalidDimensions);
        }
        if !Self::check_unitary(&matrix) {
            return Err(GateError::NonUnitary);
        }

        let num_qubits = rows.trailing_zeros() as usize;
        Ok(Self { matrix, num_qubits })
    }

    /// Checks if a given matrix is unitary
    fn check_unitary(matrix: &Array2<Complex64>) -> bool {
        let (rows, _) = matrix.dim();
        let eye = Array2::<Complex64>::eye(rows);

        let u_dagger = matrix.t().mapv(|x| x.conj());
        let product = matrix.dot(&u_dagger);

        product
            .iter()
            .zip(eye.iter())
            .all(|(a, b)| (*a - *b).norm() < 1e-6)
    }

    /// Expands a gate to act on a larger register of qubits.
    ///
    /// The resulting gate applies the original `gate` to the specified
    /// `targets`, conditioned on the `controls` all being 1, and Identity on
    /// every other qubit.
    ///
    /// # Errors
    ///
    /// Returns `GateError` on duplicate indices or a qubit used as both
    /// control and target.
    pub fn expand_gate(
        num_total_qubits: usize,
        gate: &Gate,
        targets: &[usize],
        controls: &[usize],
    ) -> Result<Gate, GateError> {
        if let Some(dup) = utils::find_duplicate(targets) {
            return Err(GateError::DuplicateQubit(dup));
        }
        if let Some(dup) = utils::find_duplicate(controls) {
            return Err(GateError::DuplicateQubit(dup));
        }
        for &c in controls {
            if targets.contains(&c) {
                return Err(GateError::ControlTargetOverlap(c));
            }
        }

        Ok(Gate {
            matrix: utils::expand_operator(num_total_qubits, &gate.matrix, targets, controls),
            num_qubits: num_total_qubits,
        })
    }

    // --- Standard Gates ---

    /// Creates a Pauli-X gate (bit-flip).
    pub fn x() -> Gate {
        Gate::new(arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ]))
        .unwrap()
    }

    /// Creates a Pauli-Z gate (phase-flip).
    pub fn z() -> Gate {
        Gate::new(arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)],
        ]))
        .unwrap()
    }

    /// Creates a Hadamard gate (basis change between rectilinear and diagonal).
    pub fn h() -> Gate {
        let factor = 1.0 / 2.0_f64.sqrt();
        Gate::new(arr2(&[
            [Complex64::new(factor, 0.0), Complex64::new(factor, 0.0)],
            [Complex64::new(factor, 0.0), Complex64::new(-factor, 0.0)],
        ]))
        .unwrap()
    }

    /// Creates a CNOT (controlled bit-flip) gate. Local qubit 0 is the
    /// control, local qubit 1 the target.
    pub fn cnot() -> Gate {
        Gate::expand_gate(2, &Gate::x(), &[1], &[0]).unwrap()
    }

    /// Creates a CZ (controlled phase-flip) gate.
    pub fn cz() -> Gate {
        Gate::expand_gate(2, &Gate::z(), &[1], &[0]).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_unitary_matrix() {
        let m = arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ]);
        assert_eq!(Gate::new(m).unwrap_err(), GateError::NonUnitary);
    }

    #[test]
    fn rejects_non_square_matrix() {
        let m = Array2::<Complex64>::zeros((2, 4));
        assert_eq!(Gate::new(m).unwrap_err(), GateError::NotSquareMatrix);
    }

    #[test]
    fn standard_gates_are_unitary() {
        for gate in [Gate::x(), Gate::z(), Gate::h(), Gate::cnot(), Gate::cz()] {
            assert!(Gate::check_unitary(&gate.matrix));
        }
    }

    #[test]
    fn cnot_flips_target_when_control_set() {
        let cnot = Gate::cnot();
        // |01> (control=1, target=0) -> |11>
        assert_eq!(cnot.matrix[[3, 1]], Complex64::new(1.0, 0.0));
        // |00> untouched
        assert_eq!(cnot.matrix[[0, 0]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn cz_negates_only_the_11_state() {
        let cz = Gate::cz();
        assert_eq!(cz.matrix[[3, 3]], Complex64::new(-1.0, 0.0));
        assert_eq!(cz.matrix[[1, 1]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn expand_rejects_control_target_overlap() {
        let err = Gate::expand_gate(2, &Gate::x(), &[0], &[0]).unwrap_err();
        assert_eq!(err, GateError::ControlTargetOverlap(0));
    }
}
