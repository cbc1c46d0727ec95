//! Encoding prover messages into, and unbiased verifier challenges out of, a transcript sponge.

use crate::duplex_sponge::{DuplexSponge, DuplexSpongeInterface};
use crate::errors::{ProofError, ProofResult};
use crate::group::{self, Group};
use crate::iv::derive_iv;
use crate::keccak::AlignedKeccakF1600;

/// Overhead, in bytes, squeezed beyond a scalar's natural byte length before reducing modulo the
/// group order. Bounds the statistical distance from uniform at 2^-128 for any curve with a
/// 128-bit-or-larger scalar field.
const CHALLENGE_OVERSAMPLING_BYTES: usize = 16;

/// Wraps a [`DuplexSponge`] with the group-aware encode/decode operations a Σ-protocol needs:
/// absorbing commitments and scalars, and squeezing unbiased challenge scalars.
#[derive(Clone)]
pub struct Codec<G: Group> {
    sponge: DuplexSponge<AlignedKeccakF1600>,
    _group: std::marker::PhantomData<G>,
}

impl<G: Group> Codec<G> {
    /// Initializes a fresh codec, binding its sponge to `protocol_id`, `session_id`, and
    /// `instance_label`.
    ///
    /// `protocol_id` identifies the Σ-protocol being run; `session_id` distinguishes concurrent or
    /// repeated proof sessions for the same protocol; `instance_label` binds the transcript to a
    /// specific public statement (e.g. the group elements being proven about).
    pub fn init(protocol_id: &[u8], session_id: &[u8], instance_label: &[u8]) -> Self {
        let iv = derive_iv(protocol_id, session_id);
        let mut sponge = DuplexSponge::<AlignedKeccakF1600>::new(iv);
        sponge.absorb(instance_label);
        log::trace!(
            "codec initialized: protocol_id_len={}, session_id_len={}, instance_label_len={}",
            protocol_id.len(),
            session_id.len(),
            instance_label.len()
        );
        Self {
            sponge,
            _group: std::marker::PhantomData,
        }
    }

    /// Absorbs the canonical encodings of `elements` (a prover's commitment or any other public
    /// group-valued message) into the transcript.
    pub fn prover_message(&mut self, elements: &[G]) {
        for element in elements {
            self.sponge.absorb(&element.serialize_element());
        }
        log::trace!("absorbed {} group element(s) into transcript", elements.len());
    }

    /// Absorbs the canonical big-endian encodings of `scalars` into the transcript.
    pub fn prover_scalars(&mut self, scalars: &[G::Scalar]) {
        for scalar in scalars {
            self.sponge.absorb(&group::serialize_scalar::<G>(scalar));
        }
        log::trace!("absorbed {} scalar(s) into transcript", scalars.len());
    }

    /// Squeezes a single verifier challenge scalar, uniform over `[0, q)` up to statistical
    /// distance 2^-128.
    pub fn verifier_challenge(&mut self) -> G::Scalar {
        let wide = self
            .sponge
            .squeeze_bytes(G::scalar_byte_length() + CHALLENGE_OVERSAMPLING_BYTES);
        group::scalar_from_wide_bytes(&wide)
    }

    /// Squeezes `n` independent verifier challenge scalars.
    pub fn verifier_challenges(&mut self, n: usize) -> Vec<G::Scalar> {
        (0..n).map(|_| self.verifier_challenge()).collect()
    }

    /// Decodes `bytes` as a single group element and absorbs it, in one step — the verifier-side
    /// counterpart of [`Codec::prover_message`] for the batchable wire format, where the
    /// commitment must be parsed off the wire before it can be absorbed.
    pub fn absorb_serialized_element(&mut self, bytes: &[u8]) -> ProofResult<G> {
        let element = G::deserialize_element(bytes).ok_or(ProofError::DeserializationError)?;
        self.prover_message(std::slice::from_ref(&element));
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::short_weierstrass::Affine;
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_secp256r1::Fr;
    use ark_std::UniformRand;

    type P256 = Affine<ark_secp256r1::Config>;

    fn sample_point(rng: &mut impl ark_std::rand::RngCore) -> P256 {
        (P256::generator() * Fr::rand(rng)).into_affine()
    }

    #[test]
    fn deterministic_for_equal_transcripts() {
        let mut rng = ark_std::test_rng();
        let point = sample_point(&mut rng);

        let mut a = Codec::<P256>::init(&[0x01; 64], b"session", b"instance");
        a.prover_message(&[point]);
        let challenge_a = a.verifier_challenge();

        let mut b = Codec::<P256>::init(&[0x01; 64], b"session", b"instance");
        b.prover_message(&[point]);
        let challenge_b = b.verifier_challenge();

        assert_eq!(challenge_a, challenge_b);
    }

    #[test]
    fn distinct_instance_labels_diverge() {
        let mut rng = ark_std::test_rng();
        let point = sample_point(&mut rng);

        let mut a = Codec::<P256>::init(&[0x01; 64], b"session", b"instance-a");
        a.prover_message(&[point]);
        let challenge_a = a.verifier_challenge();

        let mut b = Codec::<P256>::init(&[0x01; 64], b"session", b"instance-b");
        b.prover_message(&[point]);
        let challenge_b = b.verifier_challenge();

        assert_ne!(challenge_a, challenge_b);
    }

    #[test]
    fn successive_challenges_are_independent() {
        let mut codec = Codec::<P256>::init(&[0x02; 64], b"session", b"instance");
        let challenges = codec.verifier_challenges(8);
        for i in 0..challenges.len() {
            for j in (i + 1)..challenges.len() {
                assert_ne!(challenges[i], challenges[j]);
            }
        }
    }

    #[test]
    fn absorb_serialized_rejects_malformed_bytes() {
        let mut codec = Codec::<P256>::init(&[0x03; 64], b"session", b"instance");
        let garbage = vec![0xffu8; P256::element_byte_length()];
        assert!(codec.absorb_serialized_element(&garbage).is_err());
    }
}
