//! Error taxonomy for the transcript core.
//!
//! [`ProofError`] is the single, `thiserror`-derived enum that every public fallible operation
//! returns. Every variant names a distinct rejection reason a verifier can hit; none of them
//! carry secret material.

/// Every rejection reason a verifier (or a malformed-input-handling prover) can produce.
///
/// All of these collapse to "reject" from the caller's point of view: nothing about accept vs.
/// reject should ever be inferred from *which* variant was returned on a hot verification path,
/// only from `Result::is_ok`. The variant is kept around for logging and metrics, never for
/// control flow an adversary could observe.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProofError {
    /// The byte length of a received proof does not equal the expected fixed length for its wire
    /// format.
    #[error("invalid proof length: expected {expected}, got {actual}")]
    InvalidProofLength { expected: usize, actual: usize },

    /// A tagged proof started with a byte other than the expected compact/batchable tag.
    #[error("invalid proof tag: expected 0x{expected:02x}, got 0x{actual:02x}")]
    InvalidTag { expected: u8, actual: u8 },

    /// A commitment, challenge, or response failed to deserialize (malformed encoding, a scalar
    /// at or above the field order, a point not on the curve, ...).
    #[error("deserialization error")]
    DeserializationError,

    /// The Σ-protocol's verification equation did not hold.
    #[error("verification failed")]
    VerificationFailed,
}

/// The result type for every fallible verification-path operation.
pub type ProofResult<T> = Result<T, ProofError>;
