//! Compiles an interactive Σ-protocol into a non-interactive one via Fiat-Shamir.
//!
//! [`NISigmaProtocol`] is the only type most callers need: it owns a [`crate::codec::Codec`] and a
//! [`crate::sigma::SigmaProtocol`] implementation and produces/verifies proofs in two wire
//! formats — compact (`challenge ‖ response`) and batchable (`commitment ‖ response`).

use rand::{CryptoRng, RngCore};

use crate::codec::Codec;
use crate::errors::{ProofError, ProofResult};
use crate::sigma::SigmaProtocol;

/// Tag byte prepended to a compact proof.
pub const COMPACT_TAG: u8 = 0xAA;
/// Tag byte prepended to a batchable proof.
pub const BATCHABLE_TAG: u8 = 0xBB;

/// Tracks where a single prove/verify call is in its lifecycle, so that calling the glue's
/// internal steps out of order is rejected immediately rather than silently desynchronizing the
/// sponge from what a verifier would reconstruct.
///
/// This sits on top of, and never overrides, the duplex sponge's own absorb/squeeze index
/// discipline — it only pre-validates call order before anything reaches the sponge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TranscriptPhase {
    Fresh,
    AbsorbedCommitment,
    SqueezedChallenge,
    Final,
}

/// Binds a Σ-protocol, a codec, and a sponge into a single non-interactive proof system.
pub struct NISigmaProtocol<S: SigmaProtocol> {
    protocol: S,
    session_id: Vec<u8>,
    phase: TranscriptPhase,
}

impl<S: SigmaProtocol> NISigmaProtocol<S> {
    /// Binds a fresh instance to `(protocol.protocol_id(), session_id, protocol.instance_label())`.
    ///
    /// # Panics
    ///
    /// Panics if `protocol.protocol_id()` is not exactly 64 bytes. This is a configuration bug,
    /// not something an adversary can trigger, so it aborts loudly rather than returning a
    /// recoverable error.
    pub fn new(protocol: S, session_id: Vec<u8>) -> Self {
        assert_eq!(
            protocol.protocol_id().len(),
            64,
            "protocol_id must be exactly 64 bytes"
        );
        Self {
            protocol,
            session_id,
            phase: TranscriptPhase::Fresh,
        }
    }

    fn fresh_codec(&self) -> Codec<S::GroupElement> {
        Codec::init(
            &self.protocol.protocol_id(),
            &self.session_id,
            &self.protocol.instance_label(),
        )
    }

    /// Byte length of a serialized challenge for this protocol's group.
    fn challenge_bytes_len(&self) -> usize {
        <S::GroupElement as crate::group::Group>::scalar_byte_length()
    }

    /// Produces a compact non-interactive proof: `0xAA ‖ challenge ‖ response`.
    ///
    /// # Panics
    ///
    /// Panics if the prover's own self-check — replaying the verification equation on the
    /// commitment, challenge, and response it just produced — fails. This indicates a bug in the
    /// Σ-protocol implementation or its RNG, not a rejectable proof.
    pub fn prove(&mut self, witness: &S::Witness, rng: &mut (impl RngCore + CryptoRng)) -> Vec<u8> {
        self.phase = TranscriptPhase::Fresh;
        let mut codec = self.fresh_codec();

        let (prover_state, commitment) = self.protocol.prover_commit(witness, rng);
        codec.prover_message(&self.protocol.commitment_elements(&commitment));
        self.phase = TranscriptPhase::AbsorbedCommitment;

        let challenge_scalar = codec.verifier_challenge();
        self.phase = TranscriptPhase::SqueezedChallenge;
        let challenge = self.protocol.challenge_from_scalar(challenge_scalar);

        let response = self.protocol.prover_response(prover_state, &challenge);
        self.phase = TranscriptPhase::Final;

        assert!(
            self.protocol.verifier(&commitment, &challenge, &response),
            "prover self-check failed: verifier rejected its own freshly produced proof"
        );

        let mut proof = Vec::with_capacity(1 + self.protocol.response_bytes_len() + 64);
        proof.push(COMPACT_TAG);
        proof.extend(self.protocol.serialize_challenge(&challenge));
        proof.extend(self.protocol.serialize_response(&response));
        log::debug!("produced compact proof, {} byte(s)", proof.len());
        proof
    }

    /// Verifies a compact proof produced by [`NISigmaProtocol::prove`].
    ///
    /// Reconstructs the commitment via [`crate::sigma::SigmaProtocol::simulate_commitment`] rather
    /// than replaying the transcript, so this form never re-derives the challenge from the
    /// commitment — it trusts the embedded challenge and checks internal consistency only.
    pub fn verify(&self, proof: &[u8]) -> ProofResult<()> {
        let expected_len = 1 + self.challenge_bytes_len() + self.protocol.response_bytes_len();
        if proof.len() != expected_len {
            return Err(ProofError::InvalidProofLength {
                expected: expected_len,
                actual: proof.len(),
            });
        }
        if proof[0] != COMPACT_TAG {
            return Err(ProofError::InvalidTag {
                expected: COMPACT_TAG,
                actual: proof[0],
            });
        }

        let challenge_bytes = &proof[1..1 + self.challenge_bytes_len()];
        let response_bytes = &proof[1 + self.challenge_bytes_len()..];

        let challenge = self.protocol.deserialize_challenge(challenge_bytes)?;
        let response = self.protocol.deserialize_response(response_bytes)?;
        let commitment = self.protocol.simulate_commitment(&response, &challenge);

        if self.protocol.verifier(&commitment, &challenge, &response) {
            Ok(())
        } else {
            Err(ProofError::VerificationFailed)
        }
    }

    /// Produces a batchable non-interactive proof: `0xBB ‖ commitment ‖ response`.
    pub fn prove_batchable(
        &mut self,
        witness: &S::Witness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Vec<u8> {
        self.phase = TranscriptPhase::Fresh;
        let mut codec = self.fresh_codec();

        let (prover_state, commitment) = self.protocol.prover_commit(witness, rng);
        codec.prover_message(&self.protocol.commitment_elements(&commitment));
        self.phase = TranscriptPhase::AbsorbedCommitment;

        let challenge_scalar = codec.verifier_challenge();
        self.phase = TranscriptPhase::SqueezedChallenge;
        let challenge = self.protocol.challenge_from_scalar(challenge_scalar);

        let response = self.protocol.prover_response(prover_state, &challenge);
        self.phase = TranscriptPhase::Final;

        assert!(
            self.protocol.verifier(&commitment, &challenge, &response),
            "prover self-check failed: verifier rejected its own freshly produced proof"
        );

        let mut proof =
            Vec::with_capacity(1 + self.protocol.commit_bytes_len() + self.protocol.response_bytes_len());
        proof.push(BATCHABLE_TAG);
        proof.extend(self.protocol.serialize_commitment(&commitment));
        proof.extend(self.protocol.serialize_response(&response));
        log::debug!("produced batchable proof, {} byte(s)", proof.len());
        proof
    }

    /// Verifies a batchable proof produced by [`NISigmaProtocol::prove_batchable`].
    ///
    /// Unlike [`NISigmaProtocol::verify`], this form absorbs the deserialized commitment into a
    /// fresh codec and squeezes the challenge itself, so it re-derives the challenge from the
    /// transcript rather than trusting an embedded one — the property that allows many such
    /// proofs to be checked in a batch.
    pub fn verify_batchable(&self, proof: &[u8]) -> ProofResult<()> {
        let expected_len =
            1 + self.protocol.commit_bytes_len() + self.protocol.response_bytes_len();
        if proof.len() != expected_len {
            return Err(ProofError::InvalidProofLength {
                expected: expected_len,
                actual: proof.len(),
            });
        }
        if proof[0] != BATCHABLE_TAG {
            return Err(ProofError::InvalidTag {
                expected: BATCHABLE_TAG,
                actual: proof[0],
            });
        }

        let commitment_bytes = &proof[1..1 + self.protocol.commit_bytes_len()];
        let response_bytes = &proof[1 + self.protocol.commit_bytes_len()..];

        let commitment = self.protocol.deserialize_commitment(commitment_bytes)?;
        let response = self.protocol.deserialize_response(response_bytes)?;

        let mut codec = self.fresh_codec();
        codec.prover_message(&self.protocol.commitment_elements(&commitment));
        let challenge_scalar = codec.verifier_challenge();
        let challenge = self.protocol.challenge_from_scalar(challenge_scalar);

        if self.protocol.verifier(&commitment, &challenge, &response) {
            Ok(())
        } else {
            Err(ProofError::VerificationFailed)
        }
    }

    /// Returns the current transcript phase. Exposed only for diagnostics/tests; callers should
    /// never need to branch on it.
    #[cfg(test)]
    fn phase(&self) -> TranscriptPhase {
        self.phase
    }
}
