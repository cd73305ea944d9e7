//! End-to-end properties of the composed BB84 + teleportation channel.

use qsecure::bb84::{self, Basis};
use qsecure::secure;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const MESSAGE: [u8; 16] = [0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1];

#[test]
fn received_prefix_always_matches_the_message() {
    // Whatever the sifted key length m turns out to be, the first m bits
    // arrive intact and the success flag is set iff m == n.
    for seed in 0..20 {
        let result = secure::transmit_seeded(&MESSAGE, seed).unwrap();

        let m = result.received.len();
        assert!(m <= MESSAGE.len());
        assert_eq!(result.key.len(), m);
        assert_eq!(result.sessions.len(), m);
        assert_eq!(result.received, &MESSAGE[..m]);
        assert_eq!(result.complete, m == MESSAGE.len());
        assert_eq!(result.success, result.complete);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = secure::transmit_seeded(&MESSAGE, 1234).unwrap();
    let b = secure::transmit_seeded(&MESSAGE, 1234).unwrap();

    assert_eq!(a.received, b.received);
    assert_eq!(a.key, b.key);
    assert_eq!(a.complete, b.complete);
    for (sa, sb) in a.sessions.iter().zip(&b.sessions) {
        assert_eq!(sa.corrections, sb.corrections);
        assert_eq!(sa.trace, sb.trace);
    }
}

#[test]
fn forced_matching_bases_transmit_everything() {
    // Rig the exchange so every basis matches: the key covers the whole
    // message and the transmission is complete.
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let sender_bits: Vec<bool> = MESSAGE.iter().map(|&b| b == 1).collect();
    let bases = vec![Basis::Diagonal; MESSAGE.len()];
    let exchange = bb84::exchange(&sender_bits, &bases, &bases, &mut rng).unwrap();
    assert_eq!(exchange.sifted_key.len(), MESSAGE.len());

    let result = secure::transmit_with_key(&MESSAGE, &exchange.sifted_key, &mut rng).unwrap();
    assert!(result.complete);
    assert!(result.success);
    assert_eq!(result.received, MESSAGE);
}

#[test]
fn truncated_runs_report_incomplete_instead_of_failing() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let short_key = vec![true, true, false];

    let result = secure::transmit_with_key(&MESSAGE, &short_key, &mut rng).unwrap();
    assert!(!result.complete);
    assert!(!result.success);
    assert_eq!(result.received.len(), 3);
    assert_eq!(result.received, &MESSAGE[..3]);
}

#[test]
fn session_traces_are_printable() {
    let result = secure::transmit_seeded(&MESSAGE, 77).unwrap();
    let first = result.sessions.first().expect("at least one bit sent");

    let rendered = first.render_trace();
    assert!(rendered.contains("bell pair"));
    assert!(rendered.contains("measure q2 -> received"));
}
