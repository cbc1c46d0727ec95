//! Transcript initialization-vector derivation.
//!
//! Factored out as a pure function: the "bootstrap sponge" that folds `protocol_id` and
//! `session_id` into a 32-byte IV is independently testable without spinning up a full
//! [`crate::codec::Codec`].
use crate::duplex_sponge::{DuplexSponge, DuplexSpongeInterface};
use crate::keccak::AlignedKeccakF1600;

/// Length-prefixes `value` with its big-endian 4-byte length (`I2OSP(len(value), 4)`).
fn length_prefixed(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + value.len());
    out.extend_from_slice(&(value.len() as u32).to_be_bytes());
    out.extend_from_slice(value);
    out
}

/// Derives the 32-byte transcript IV from a protocol identifier and a session identifier.
///
/// This binds every challenge produced by a [`crate::nisigma::NISigmaProtocol`] instance to the
/// specific (protocol, session) pair, so that a transcript produced for one protocol or session
/// can never be replayed as if it belonged to another. `instance_label` is deliberately *not*
/// folded in here: it is absorbed by `Codec::init` instead, once the sponge already has a label
/// binding it to a concrete protocol instance (see `DESIGN.md` for the rationale).
pub fn derive_iv(protocol_id: &[u8], session_id: &[u8]) -> [u8; 32] {
    let mut bootstrap = DuplexSponge::<AlignedKeccakF1600>::new([0u8; 32]);
    bootstrap.absorb(&length_prefixed(protocol_id));
    bootstrap.absorb(&length_prefixed(session_id));

    let mut iv = [0u8; 32];
    bootstrap.squeeze(&mut iv);
    iv
}
