//! The interactive Σ-protocol interface the Fiat-Shamir glue consumes.
//!
//! This crate ships no concrete Σ-protocol: it is the seam at which a Schnorr proof, a DLEQ proof,
//! a Pedersen commitment opening, or an AND-composition of any of those plugs in. Implementations
//! live in consuming crates (or, here, in the integration test suite that exercises the glue).

use crate::errors::ProofResult;
use crate::group::Group;

/// An interactive, public-coin Σ-protocol over a group `G`.
///
/// A type implementing this trait provides everything [`crate::nisigma::NISigmaProtocol`] needs
/// to compile it down to a non-interactive proof: the three interactive-protocol moves
/// (`prover_commit`, `prover_response`, `verifier`), the single extra move needed to verify a
/// *compact* proof without replaying the commitment (`simulate_commitment`), and fixed-length
/// (de)serializers for every message type.
pub trait SigmaProtocol {
    /// Secret input to the prover.
    type Witness;
    /// Prover-side state carried from the commitment step to the response step (e.g. the nonce).
    type ProverState;
    /// The prover's first message.
    type Commitment: Clone;
    /// The verifier's challenge, drawn from `G::Scalar`.
    type Challenge: Clone;
    /// The prover's second message.
    type Response: Clone;

    /// Produces a commitment and the prover state needed to later respond to a challenge.
    fn prover_commit(
        &self,
        witness: &Self::Witness,
        rng: &mut (impl rand::RngCore + rand::CryptoRng),
    ) -> (Self::ProverState, Self::Commitment);

    /// Produces a response to `challenge`, given the state saved at commitment time.
    fn prover_response(&self, state: Self::ProverState, challenge: &Self::Challenge) -> Self::Response;

    /// Checks the Σ-protocol's verification equation for `(commitment, challenge, response)`.
    fn verifier(
        &self,
        commitment: &Self::Commitment,
        challenge: &Self::Challenge,
        response: &Self::Response,
    ) -> bool;

    /// Reconstructs the unique commitment consistent with `(challenge, response)`, i.e. the
    /// inverse of the verification equation. Used to verify compact proofs without transmitting
    /// the commitment.
    fn simulate_commitment(&self, response: &Self::Response, challenge: &Self::Challenge) -> Self::Commitment;

    /// Serializes a commitment to its fixed-length wire encoding.
    fn serialize_commitment(&self, commitment: &Self::Commitment) -> Vec<u8>;
    /// Deserializes a commitment from its fixed-length wire encoding.
    fn deserialize_commitment(&self, bytes: &[u8]) -> ProofResult<Self::Commitment>;

    /// Serializes a response to its fixed-length wire encoding.
    fn serialize_response(&self, response: &Self::Response) -> Vec<u8>;
    /// Deserializes a response from its fixed-length wire encoding.
    fn deserialize_response(&self, bytes: &[u8]) -> ProofResult<Self::Response>;

    /// The group this protocol is defined over; its scalar field is the challenge space.
    type GroupElement: Group;

    /// Converts a challenge scalar squeezed from the codec into this protocol's `Challenge`
    /// representation.
    fn challenge_from_scalar(&self, scalar: <Self::GroupElement as Group>::Scalar) -> Self::Challenge;

    /// Serializes a challenge to its fixed-length (`scalar_byte_length()`) wire encoding.
    fn serialize_challenge(&self, challenge: &Self::Challenge) -> Vec<u8>;
    /// Deserializes a challenge from its fixed-length wire encoding.
    fn deserialize_challenge(&self, bytes: &[u8]) -> ProofResult<Self::Challenge>;

    /// The commitment, as the group elements that get absorbed into the transcript.
    fn commitment_elements(&self, commitment: &Self::Commitment) -> Vec<Self::GroupElement>;

    /// A fixed 64-byte identifier for this protocol, folded into the transcript IV.
    ///
    /// [`crate::nisigma::NISigmaProtocol::new`] asserts this is exactly 64 bytes at construction
    /// time; a `Vec` rather than `[u8; 64]` lets that assertion actually catch a misconfigured
    /// implementation instead of being enforced (and made redundant) by the type system.
    fn protocol_id(&self) -> Vec<u8>;
    /// A variable-length label binding the transcript to a specific public statement.
    fn instance_label(&self) -> Vec<u8>;

    /// Byte length of [`SigmaProtocol::serialize_commitment`]'s output.
    fn commit_bytes_len(&self) -> usize;
    /// Byte length of [`SigmaProtocol::serialize_response`]'s output.
    fn response_bytes_len(&self) -> usize;
}
