use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Matrix is not Unitary (U†U != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Invalid Dimensions")]
    InvalidDimensions,

    #[error("Qubit {0} cannot be both control and target")]
    ControlTargetOverlap(usize),

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),
}

/// Internal invariant violations of the state simulator. Every variant is a
/// programming bug, not a user error; callers propagate and never retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("State vector is not normalized. Norm squared: {0}")]
    NotNormalized(f64),

    #[error("Invalid dimensions: amplitude vector length must be a power of 2")]
    InvalidDimensions,

    #[error("Gate acts on {expected} qubits but {got} targets were given")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Qubit index {index} out of bounds for {num_qubits}-qubit register")]
    IndexOutOfBounds { index: usize, num_qubits: usize },

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),
}

/// Caller-visible protocol errors. `InvalidBit` is rejected at the
/// orchestrator boundary before any simulation work begins; `State` wraps a
/// simulator invariant violation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("Message bit at position {index} is {value}; expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },

    #[error("Sequence length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("State error: {0}")]
    State(#[from] StateError),
}
