//! BB84 key exchange engine.
//!
//! The sender encodes random bits into qubits under randomly chosen bases,
//! the receiver measures each qubit in its own randomly chosen basis, and
//! sifting keeps only the positions where the two basis choices coincided.
//! The channel is noiseless and trusted: no error-rate estimation or
//! eavesdropper detection is performed.

use crate::core::errors::ProtocolError;
use crate::core::{Gate, QuantumState};
use rand::Rng;

/// Encoding/measurement frame for one BB84 position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Basis {
    /// Computational basis {|0>, |1>}.
    Rectilinear,
    /// Hadamard basis {|+>, |->}.
    Diagonal,
}

impl Basis {
    /// Draws a uniformly random basis choice.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }
}

/// Full transcript of one BB84 run.
#[derive(Clone, Debug)]
pub struct KeyExchange {
    pub sender_bits: Vec<bool>,
    pub sender_bases: Vec<Basis>,
    pub receiver_bases: Vec<Basis>,
    pub receiver_results: Vec<bool>,
    /// Sender bits at positions where the basis choices coincided, in index
    /// order. In the noiseless model the receiver observed the same bits.
    pub sifted_key: Vec<bool>,
}

/// Runs a full BB84 key exchange over `n` positions.
///
/// Draw order from `rng` is fixed so a fixed seed yields a fixed transcript:
/// `n` sender bits, then `n` sender bases, then `n` receiver bases, then one
/// measurement draw per position in index order.
///
/// `n = 0` yields an empty key.
pub fn generate_key<R: Rng>(n: usize, rng: &mut R) -> Result<KeyExchange, ProtocolError> {
    let sender_bits: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();
    let sender_bases: Vec<Basis> = (0..n).map(|_| Basis::random(rng)).collect();
    let receiver_bases: Vec<Basis> = (0..n).map(|_| Basis::random(rng)).collect();

    let result = exchange(&sender_bits, &sender_bases, &receiver_bases, rng)?;
    tracing::debug!(
        raw = n,
        sifted = result.sifted_key.len(),
        "bb84 key exchange complete"
    );
    Ok(result)
}

/// Runs the quantum phase and sifting for explicit bit/basis choices.
///
/// Exposed separately from [`generate_key`] so deterministic scenarios
/// (forced matching bases, rigged truncation) can be driven directly.
pub fn exchange<R: Rng>(
    sender_bits: &[bool],
    sender_bases: &[Basis],
    receiver_bases: &[Basis],
    rng: &mut R,
) -> Result<KeyExchange, ProtocolError> {
    let n = sender_bits.len();
    for len in [sender_bases.len(), receiver_bases.len()] {
        if len != n {
            return Err(ProtocolError::LengthMismatch {
                expected: n,
                got: len,
            });
        }
    }

    let mut receiver_results = Vec::with_capacity(n);

    for i in 0..n {
        // Sender prepares the qubit in their chosen basis.
        let mut state = QuantumState::prepare(sender_bits[i]);
        if sender_bases[i] == Basis::Diagonal {
            state.apply(&Gate::h(), &[0])?;
        }

        // Receiver rotates into their own basis before reading out.
        if receiver_bases[i] == Basis::Diagonal {
            state.apply(&Gate::h(), &[0])?;
        }

        receiver_results.push(state.measure(0, rng)?);
    }

    // Sifting: keep the sender's bit wherever the bases coincided. Under
    // matching bases the receiver observed the same bit with certainty.
    let sifted_key = (0..n)
        .filter(|&i| sender_bases[i] == receiver_bases[i])
        .map(|i| sender_bits[i])
        .collect();

    Ok(KeyExchange {
        sender_bits: sender_bits.to_vec(),
        sender_bases: sender_bases.to_vec(),
        receiver_bases: receiver_bases.to_vec(),
        receiver_results,
        sifted_key,
    })
}
