//! Teleportation channel.
//!
//! Transmits one classical bit from a sender qubit to a receiver qubit via a
//! fresh Bell pair and two bits of classical side information. The bit is
//! one-time-pad encoded with a key bit before transmission and decoded on the
//! receiver's qubit afterwards.
//!
//! Register layout: qubit 0 is the input, qubit 1 the sender's half of the
//! pair, qubit 2 the receiver's half.

use crate::core::errors::StateError;
use crate::core::{Gate, QuantumState};
use rand::Rng;

/// Per-bit teleportation record. Created per message bit, consumed by the
/// caller once the received bit is read.
#[derive(Clone, Debug)]
pub struct Session {
    /// The decoded bit read out on the receiver's qubit.
    pub received: bool,
    /// Classical correction bits: c0 from the input qubit, c1 from the
    /// sender's pair qubit.
    pub corrections: (bool, bool),
    /// Human-readable listing of the operations applied, in order.
    pub trace: Vec<String>,
}

impl Session {
    /// The trace as one printable block, one operation per line.
    pub fn render_trace(&self) -> String {
        self.trace.join("\n")
    }
}

/// Teleports `message_bit`, one-time-pad encoded with `key_bit`, across a
/// fresh entangled pair.
///
/// In the noiseless model the received bit always equals `message_bit`,
/// regardless of the measured correction bits.
pub fn teleport<R: Rng>(
    message_bit: bool,
    key_bit: bool,
    rng: &mut R,
) -> Result<Session, StateError> {
    let mut state = QuantumState::new(3);
    let mut trace = Vec::new();

    // One-time-pad encode, then load the payload onto the input qubit.
    let payload = message_bit ^ key_bit;
    if payload {
        state.apply(&Gate::x(), &[0])?;
        trace.push("x q0            encode payload 1".to_string());
    } else {
        trace.push("                encode payload 0".to_string());
    }

    // Bell pair shared between sender (q1) and receiver (q2).
    state.apply(&Gate::h(), &[1])?;
    trace.push("h q1            bell pair".to_string());
    state.apply(&Gate::cnot(), &[1, 2])?;
    trace.push("cnot q1 -> q2   bell pair".to_string());

    // Entangle the input with the sender's half.
    state.apply(&Gate::cnot(), &[0, 1])?;
    trace.push("cnot q0 -> q1".to_string());
    state.apply(&Gate::h(), &[0])?;
    trace.push("h q0".to_string());

    // Two classical correction bits.
    let c0 = state.measure(0, rng)?;
    trace.push(format!("measure q0 -> c0 = {}", c0 as u8));
    let c1 = state.measure(1, rng)?;
    trace.push(format!("measure q1 -> c1 = {}", c1 as u8));

    // Corrections on the receiver's qubit: bit-flip keyed on c1, then
    // phase-flip keyed on c0. After these, q2 holds the payload exactly.
    state.apply_if(&Gate::x(), &[2], c1, true)?;
    trace.push(format!("x q2 if c1      {}", applied(c1)));
    state.apply_if(&Gate::z(), &[2], c0, true)?;
    trace.push(format!("z q2 if c0      {}", applied(c0)));

    // Undo the one-time pad on the receiver's side.
    state.apply_if(&Gate::x(), &[2], key_bit, true)?;
    trace.push(format!("x q2 if key     {}", applied(key_bit)));

    let received = state.measure(2, rng)?;
    trace.push(format!("measure q2 -> received = {}", received as u8));

    Ok(Session {
        received,
        corrections: (c0, c1),
        trace,
    })
}

fn applied(condition: bool) -> &'static str {
    if condition { "applied" } else { "skipped" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn round_trip_is_exact_for_all_bit_key_combinations() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            for message_bit in [false, true] {
                for key_bit in [false, true] {
                    let session = teleport(message_bit, key_bit, &mut rng).unwrap();
                    assert_eq!(
                        session.received, message_bit,
                        "message {message_bit}, key {key_bit}, corrections {:?}",
                        session.corrections
                    );
                }
            }
        }
    }

    #[test]
    fn one_time_pad_is_an_involution() {
        for b in [false, true] {
            for k in [false, true] {
                assert_eq!((b ^ k) ^ k, b);
            }
        }
    }

    #[test]
    fn trace_records_the_full_session() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let session = teleport(true, false, &mut rng).unwrap();

        assert_eq!(session.trace.len(), 11);
        assert!(session.trace[0].contains("encode payload 1"));
        assert!(
            session
                .trace
                .last()
                .unwrap()
                .starts_with("measure q2 -> received")
        );
    }

    #[test]
    fn corrections_cover_all_four_patterns_over_many_runs() {
        // The two correction bits are each uniform; 200 sessions hit every
        // pattern with overwhelming probability.
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let session = teleport(false, false, &mut rng).unwrap();
            let (c0, c1) = session.corrections;
            seen[((c0 as usize) << 1) | c1 as usize] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
