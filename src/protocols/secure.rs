//! Secure communication orchestrator.
//!
//! Generates a BB84 key sized to the message, then teleports each message
//! bit one-time-pad encoded with the corresponding key bit. When sifting
//! leaves the key shorter than the message, only the covered prefix is sent
//! and the transmission is reported as incomplete rather than failing.

use crate::core::errors::ProtocolError;
use crate::protocols::bb84;
use crate::protocols::teleport::{self, Session};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Result of one transmission run. Nothing is persisted beyond this value.
#[derive(Clone, Debug)]
pub struct Transmission {
    /// Received bits, one per transmitted position; length `m <= n`.
    pub received: Vec<u8>,
    /// The sifted key bits actually used; length `m`.
    pub key: Vec<u8>,
    /// Per-bit session traces, for diagnostic display.
    pub sessions: Vec<Session>,
    /// False when the sifted key was shorter than the message and only a
    /// prefix was transmitted. A reported condition, not an error.
    pub complete: bool,
    /// True iff the whole message was transmitted and received intact.
    pub success: bool,
}

/// Transmits `message` over the composed BB84 + teleportation channel.
///
/// Message values must be 0 or 1; anything else is rejected before any
/// simulation work begins.
pub fn transmit<R: Rng>(
    message: &[u8],
    rng: &mut R,
) -> Result<Transmission, ProtocolError> {
    validate_message(message)?;

    let exchange = bb84::generate_key(message.len(), rng)?;
    let key: Vec<bool> = exchange.sifted_key;

    send(message, &key, rng)
}

/// Transmits `message` under a caller-supplied key instead of running BB84.
///
/// Only the first `min(message.len(), key.len())` bits are sent.
pub fn transmit_with_key<R: Rng>(
    message: &[u8],
    key: &[bool],
    rng: &mut R,
) -> Result<Transmission, ProtocolError> {
    validate_message(message)?;
    send(message, key, rng)
}

/// Reproducible transmission over a seeded random stream.
pub fn transmit_seeded(message: &[u8], seed: u64) -> Result<Transmission, ProtocolError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    transmit(message, &mut rng)
}

fn validate_message(message: &[u8]) -> Result<(), ProtocolError> {
    for (index, &value) in message.iter().enumerate() {
        if value > 1 {
            return Err(ProtocolError::InvalidBit { index, value });
        }
    }
    Ok(())
}

fn send<R: Rng>(
    message: &[u8],
    key: &[bool],
    rng: &mut R,
) -> Result<Transmission, ProtocolError> {
    let n = message.len();
    let m = n.min(key.len());

    if m < n {
        tracing::warn!(
            sent = m,
            message_len = n,
            "sifted key shorter than message; transmission truncated"
        );
    }

    let mut received = Vec::with_capacity(m);
    let mut sessions = Vec::with_capacity(m);

    for i in 0..m {
        let session = teleport::teleport(message[i] == 1, key[i], rng)?;
        received.push(session.received as u8);
        sessions.push(session);
    }

    let complete = m == n;
    let success = complete && received == message;

    Ok(Transmission {
        received,
        key: key[..m].iter().map(|&b| b as u8).collect(),
        sessions,
        complete,
        success,
    })
}
