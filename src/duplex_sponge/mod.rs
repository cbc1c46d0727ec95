//! The duplex sponge construction that can absorb and squeeze bytes.
//!
//! [`DuplexSponge`] implements a [`DuplexSpongeInterface`] on top of any fixed-width
//! [`Permutation`], using the duplex construction in **overwrite mode** (cf.
//! [Wikipedia](https://en.wikipedia.org/wiki/Sponge_function#Duplex_construction)): absorbed
//! bytes replace the rate portion of the state rather than being XORed into it. This is a
//! deliberate departure from the padding/XOR rules of the NIST SHA-3 sponge and must be
//! preserved byte-for-byte: any implementation that XORs instead of overwrites produces a
//! transcript incompatible with this one.
//!
//! Two cursors, `absorb_index` and `squeeze_index`, track how much of the current rate block has
//! been written to or read from. Exactly one of "absorbing" and "squeezing" is logically active at
//! a time; switching from one to the other invalidates the other cursor so that the next operation
//! of the opposite kind is forced through a fresh permutation the first time it runs.

#[cfg(test)]
mod tests;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The basic state of a cryptographic permutation used to drive a [`DuplexSponge`].
///
/// For implementors:
///
/// - State is read/written in *the first* [`Permutation::R`] (rate) bytes of the state. The last
///   [`Permutation::N`]-[`Permutation::R`] bytes (the capacity) are never touched directly except
///   during initialization.
/// - The [`Default`] implementation *MUST* initialize the state to zero.
/// - [`Permutation::new`] MUST write the supplied `iv` into the first 32 bytes of the capacity
///   region (i.e. state bytes `[R..R+32)`), and leave the rate region zeroed.
pub trait Permutation: Zeroize + Default + Clone + AsRef<[u8]> + AsMut<[u8]> {
    /// The width of the state, equal to rate plus capacity. Cannot be less than [`Permutation::R`].
    const N: usize;

    /// The rate of the sponge, in bytes.
    const R: usize;

    /// Initializes the state, writing the 32-byte `iv` into the capacity region.
    fn new(iv: [u8; 32]) -> Self;

    /// Applies the permutation to the whole state.
    fn permute(&mut self);
}

/// Abstract interface for absorbing and squeezing bytes from a duplex sponge.
///
/// **HAZARD**: don't implement this trait unless you know what you are doing. Consider using
/// [`DuplexSponge`], which is already correct for any [`Permutation`].
pub trait DuplexSpongeInterface: Default + Clone + Zeroize {
    /// Initializes a new sponge from a 32-byte IV, placed in the capacity region.
    fn new(iv: [u8; 32]) -> Self;

    /// Absorbs `input`, overwriting (not XORing into) the rate region a block at a time.
    fn absorb(&mut self, input: &[u8]) -> &mut Self;

    /// Fills `output` with fresh squeezed bytes.
    fn squeeze(&mut self, output: &mut [u8]) -> &mut Self;

    /// Permutes the state and zeroes the rate region, so that no earlier absorbed byte can ever
    /// be recovered from the post-ratchet state. Used to compress a prefix of the transcript.
    fn ratchet(&mut self) -> &mut Self;
}

/// A cryptographic duplex sponge built from a fixed-width [`Permutation`].
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct DuplexSponge<P: Permutation> {
    permutation: P,
    absorb_index: usize,
    squeeze_index: usize,
}

impl<P: Permutation> DuplexSpongeInterface for DuplexSponge<P> {
    fn new(iv: [u8; 32]) -> Self {
        assert!(P::N > P::R, "capacity of the sponge must be > 0");
        Self {
            permutation: P::new(iv),
            absorb_index: 0,
            // sentinel: nothing has been squeezed yet, so the first squeeze must permute.
            squeeze_index: P::R,
        }
    }

    fn absorb(&mut self, mut input: &[u8]) -> &mut Self {
        // Invalidate any pending squeeze phase: the next squeeze call must re-permute.
        self.squeeze_index = P::R;
        while !input.is_empty() {
            if self.absorb_index == P::R {
                self.permutation.permute();
                self.absorb_index = 0;
            }
            let chunk_len = usize::min(P::R - self.absorb_index, input.len());
            let (chunk, rest) = input.split_at(chunk_len);
            self.permutation.as_mut()[self.absorb_index..self.absorb_index + chunk_len]
                .copy_from_slice(chunk);
            self.absorb_index += chunk_len;
            input = rest;
        }
        self
    }

    fn squeeze(&mut self, output: &mut [u8]) -> &mut Self {
        if output.is_empty() {
            // Zero-length squeeze is a strict no-op: no permutation, no index change.
            return self;
        }
        // Starting a squeeze phase always restarts the absorb block: a later absorb call must
        // begin by permuting, not by resuming whatever partial rate block was in flight.
        self.absorb_index = 0;

        let mut output = output;
        while !output.is_empty() {
            if self.squeeze_index == P::R {
                self.permutation.permute();
                self.squeeze_index = 0;
                self.absorb_index = 0;
            }
            let chunk_len = usize::min(P::R - self.squeeze_index, output.len());
            let (chunk, rest) = output.split_at_mut(chunk_len);
            chunk.copy_from_slice(
                &self.permutation.as_ref()[self.squeeze_index..self.squeeze_index + chunk_len],
            );
            self.squeeze_index += chunk_len;
            output = rest;
        }
        self
    }

    fn ratchet(&mut self) -> &mut Self {
        self.permutation.permute();
        // Zero the rate region so the pre-ratchet absorbed bytes can't be recovered from state.
        self.permutation.as_mut()[0..P::R]
            .iter_mut()
            .for_each(|b| b.zeroize());
        self.absorb_index = 0;
        self.squeeze_index = P::R;
        self
    }
}

impl<P: Permutation> DuplexSponge<P> {
    /// Absorbs `input` and returns `self` by value, for one-shot construction idioms.
    pub fn absorbing(mut self, input: &[u8]) -> Self {
        self.absorb(input);
        self
    }

    /// Squeezes `length` fresh bytes and returns them as an owned buffer.
    ///
    /// A `length` of zero returns an empty vector without touching the permutation, matching the
    /// no-op contract of [`DuplexSpongeInterface::squeeze`].
    pub fn squeeze_bytes(&mut self, length: usize) -> Vec<u8> {
        let mut out = vec![0u8; length];
        self.squeeze(&mut out);
        out
    }
}
