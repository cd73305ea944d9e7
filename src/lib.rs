mod core;
pub mod protocols;

pub use crate::core::{Gate, QuantumState, errors};
pub use crate::protocols::{bb84, secure, teleport};
