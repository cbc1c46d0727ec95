//!
//! **This crate is work in progress, not suitable for production.**
//!
//! sigmafish compiles interactive Σ-protocols into non-interactive zero-knowledge proofs via the
//! Fiat-Shamir transform, built on a Keccak-f\[1600\] duplex sponge running in overwrite mode.
//!
//! # Overview
//!
//! The crate is organized as four layers, each usable on its own:
//!
//! - [`keccak`] / [`duplex_sponge`] — the permutation and the duplex construction built on it.
//! - [`group`] — canonical, fixed-length encodings for group elements and scalars.
//! - [`codec`] — absorbs prover messages and squeezes unbiased verifier challenges from a sponge.
//! - [`sigma`] / [`nisigma`] — the external Σ-protocol seam, and the glue that compiles a
//!   Σ-protocol down to a proof using a codec.
//!
//! This crate ships no concrete Σ-protocol (no Schnorr, no DLEQ) — it is the machinery that any
//! of those plug into.
//!
//! ```
//! use sigmafish::duplex_sponge::{DuplexSponge, DuplexSpongeInterface};
//! use sigmafish::keccak::AlignedKeccakF1600;
//!
//! let mut sponge = DuplexSponge::<AlignedKeccakF1600>::new([0x11u8; 32]);
//! sponge.absorb(b"hello");
//! let mut out = [0u8; 32];
//! sponge.squeeze(&mut out);
//! ```
//!
//! # Acknowledgements
//!
//! This library implements
//! "A Fiat–Shamir Transformation From Duplex Sponges",
//! by Alessandro Chiesa and Michele Orrù, over a Keccak-f\[1600\] permutation.

#[cfg(target_endian = "big")]
compile_error!(
    r#"
This crate doesn't support big-endian targets.
"#
);

/// The duplex sponge construction and the [`duplex_sponge::Permutation`] trait it's generic over.
pub mod duplex_sponge;
/// Built-in proof and transcript-bookkeeping errors.
pub mod errors;
/// Canonical group-element and scalar encodings.
pub mod group;
/// Transcript initialization-vector derivation.
mod iv;
/// Built-in permutation functions.
pub mod keccak;

/// Encodes prover messages into, and unbiased challenges out of, a transcript sponge.
pub mod codec;
/// Fiat-Shamir glue compiling a Σ-protocol into a non-interactive proof system.
pub mod nisigma;
/// The interactive Σ-protocol interface consumed by [`nisigma`].
pub mod sigma;

pub use codec::Codec;
pub use errors::{ProofError, ProofResult};
pub use group::Group;
pub use iv::derive_iv;
pub use nisigma::NISigmaProtocol;
pub use sigma::SigmaProtocol;

/// Default random number generator used ([`rand::rngs::OsRng`]).
pub type DefaultRng = rand::rngs::OsRng;

/// Default permutation used ([`keccak::AlignedKeccakF1600`]).
pub type DefaultPermutation = keccak::AlignedKeccakF1600;
