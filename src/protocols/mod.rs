//! Quantum communication protocols.
//!
//! - **bb84**: basis-encoding key exchange with sifting.
//! - **teleport**: one-bit teleportation over a fresh Bell pair, with
//!   one-time-pad encoding of the transmitted bit.
//! - **secure**: the orchestrator composing the two into end-to-end secure
//!   message transmission.

pub mod bb84;
pub mod secure;
pub mod teleport;
