use crate::core::Gate;
use crate::core::errors::StateError;
use crate::core::utils::{expand_operator, find_duplicate};
use ndarray::Array1;
use num_complex::Complex64;
use rand::Rng;

const NORM_TOLERANCE: f64 = 1e-12;

/// A pure quantum state over `num_qubits` two-level systems, held as a
/// normalized complex amplitude vector of length `2^num_qubits`.
///
/// Qubit `i` corresponds to bit `i` of the amplitude index, so qubit 0 is the
/// least significant bit of the basis-state label.
#[derive(Clone, Debug)]
pub struct QuantumState {
    pub amplitudes: Array1<Complex64>,
    pub num_qubits: usize,
}

impl QuantumState {
    /// Creates a new quantum state initialized to |0...0>.
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1 << num_qubits;
        let mut amplitudes = Array1::<Complex64>::zeros(dim);
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Creates a single-qubit state encoding a classical bit: |0> or |1>.
    pub fn prepare(bit: bool) -> Self {
        let mut amplitudes = Array1::<Complex64>::zeros(2);
        amplitudes[bit as usize] = Complex64::new(1.0, 0.0);

        Self {
            amplitudes,
            num_qubits: 1,
        }
    }

    /// Creates a `QuantumState` from a generic amplitude vector.
    pub fn from_amplitudes(amplitudes: Array1<Complex64>) -> Result<Self, StateError> {
        let dim = amplitudes.len();

        if !dim.is_power_of_two() {
            return Err(StateError::InvalidDimensions);
        }

        let norm_sqr: f64 = amplitudes.iter().map(|c| c.norm_sqr()).sum();
        if (norm_sqr - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::NotNormalized(norm_sqr));
        }

        let num_qubits = dim.trailing_zeros() as usize;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Checks if a given index is within the register's range
    fn validate_qubit_index(&self, index: usize) -> Result<(), StateError> {
        if index >= self.num_qubits {
            return Err(StateError::IndexOutOfBounds {
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Sum of squared amplitude magnitudes; 1.0 for any valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability of measuring `qubit` as 1 in the current state.
    pub fn probability_of_one(&self, qubit: usize) -> Result<f64, StateError> {
        self.validate_qubit_index(qubit)?;

        let mask = 1usize << qubit;
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum())
    }

    /// Applies a gate to the given target qubits, preserving normalization.
    pub fn apply(&mut self, gate: &Gate, targets: &[usize]) -> Result<(), StateError> {
        if gate.num_qubits != targets.len() {
            return Err(StateError::ArityMismatch {
                expected: gate.num_qubits,
                got: targets.len(),
            });
        }
        for &q in targets {
            self.validate_qubit_index(q)?;
        }
        if let Some(dup) = find_duplicate(targets) {
            return Err(StateError::GateError(
                crate::core::errors::GateError::DuplicateQubit(dup),
            ));
        }

        let full_operator = expand_operator(self.num_qubits, &gate.matrix, targets, &[]);
        self.amplitudes = full_operator.dot(&self.amplitudes);
        Ok(())
    }

    /// Applies a gate only when `classical_bit == expected`; otherwise a no-op.
    ///
    /// Models the classically-conditioned corrections of teleportation: each
    /// correction is a pure function of a previously measured classical bit.
    pub fn apply_if(
        &mut self,
        gate: &Gate,
        targets: &[usize],
        classical_bit: bool,
        expected: bool,
    ) -> Result<(), StateError> {
        if classical_bit == expected {
            self.apply(gate, targets)
        } else {
            Ok(())
        }
    }

    /// Measures one qubit in the computational basis, collapsing the state.
    ///
    /// The outcome is 1 with probability equal to the summed squared
    /// magnitudes of the consistent amplitudes (Born rule). Amplitudes
    /// inconsistent with the outcome are zeroed and the rest renormalized.
    ///
    /// Consumes exactly one `f64` draw from `rng` per call, even when the
    /// outcome is certain, so a fixed seed yields a fixed transcript.
    pub fn measure<R: Rng>(
        &mut self,
        qubit: usize,
        rng: &mut R,
    ) -> Result<bool, StateError> {
        let total = self.norm_sqr();
        if (total - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::NotNormalized(total));
        }

        let p_one = self.probability_of_one(qubit)?;

        // roll in [0, 1): p_one = 0 can never select 1, p_one = 1 always does.
        let roll: f64 = rng.random();
        let outcome = roll < p_one;

        let p_kept = if outcome { p_one } else { 1.0 - p_one };
        let norm = p_kept.sqrt();
        let mask = 1usize << qubit;

        for (idx, amp) in self.amplitudes.iter_mut().enumerate() {
            if ((idx & mask) != 0) != outcome {
                *amp = Complex64::new(0.0, 0.0);
            } else {
                *amp /= norm;
            }
        }

        Ok(outcome)
    }
}
