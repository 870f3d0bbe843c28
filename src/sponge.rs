//! The sponge construction behind SHA-3 and SHAKE.
//!
//! A [`Sponge`] XORs input into the first `rate` bytes of a [`KeccakState`],
//! permuting whenever that region fills up. It then switches once, and for good,
//! to output: the multi-rate `pad10*1` padding is applied together with a
//! domain-separation suffix, the state is permuted, and bytes are read back out
//! of the rate region, permuting again each time it is exhausted.
//!
//! ```text
//!           absorb*            pad(domain)             squeeze*
//! Absorbing ───────▶ Absorbing ──────────▶ Squeezing ───────▶ Squeezing
//!                        │
//!                        └── finalize ───▶ Finalized
//! ```
//!
//! The permutation is a type parameter and its value is handed over at
//! construction; the sponge never reaches for a global backend.

use core::fmt;
use std::io;

use zeroize::Zeroize;

use crate::errors::{SpongeError, SpongeResult, MAX_OUTPUT_LEN};
use crate::keccak::{DefaultPermutation, KeccakState, Permutation, STATE_BYTES};

/// The byte XORed at the end of the message, before the final `0x80` pad bit.
///
/// It carries the domain-separation bits followed by the first `1` of `pad10*1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Domain {
    /// SHA3-224/256/384/512: suffix `01`.
    Sha3 = 0x06,
    /// SHAKE128/256: suffix `1111`.
    Shake = 0x1F,
    /// cSHAKE128/256 with a non-empty name or customization: suffix `00`.
    CShake = 0x04,
}

impl Domain {
    pub const fn suffix(self) -> u8 {
        self as u8
    }
}

/// Where a [`Sponge`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Accepting input.
    Absorbing,
    /// Padded, producing extendable output.
    Squeezing,
    /// A fixed-length digest has been read; nothing else may happen.
    Finalized,
}

/// A Keccak sponge context.
///
/// The rate is derived from the output length as `200 - 2 * output_len`, so
/// the capacity is twice the output: SHA3-256 and SHAKE256 both use
/// `output_len = 32`, SHAKE128 uses `16`.
///
/// A context is exclusively owned and mutated in place; independent contexts
/// can live on different threads, one context cannot be shared.
#[derive(Clone)]
pub struct Sponge<P: Permutation = DefaultPermutation> {
    state: KeccakState,
    permutation: P,
    rate: usize,
    output_len: usize,
    pos: usize,
    phase: Phase,
}

impl<P: Permutation> Sponge<P> {
    /// A fresh context using the default value of `P`.
    ///
    /// # Panics
    ///
    /// If `output_len` is not in `1..=99`.
    pub fn new(output_len: usize) -> Self {
        Self::with_permutation(P::default(), output_len)
    }

    pub fn try_new(output_len: usize) -> SpongeResult<Self> {
        Self::try_with_permutation(P::default(), output_len)
    }

    /// A fresh context driven by `permutation`.
    ///
    /// # Panics
    ///
    /// If `output_len` is not in `1..=99`.
    pub fn with_permutation(permutation: P, output_len: usize) -> Self {
        match Self::try_with_permutation(permutation, output_len) {
            Ok(sponge) => sponge,
            Err(e) => {
                log::error!("{e}");
                panic!("{e}")
            }
        }
    }

    pub fn try_with_permutation(permutation: P, output_len: usize) -> SpongeResult<Self> {
        if output_len == 0 || output_len > MAX_OUTPUT_LEN {
            return Err(SpongeError::UnsupportedOutputLength(output_len));
        }
        Ok(Self {
            state: KeccakState::new(),
            permutation,
            rate: STATE_BYTES - 2 * output_len,
            output_len,
            pos: 0,
            phase: Phase::Absorbing,
        })
    }

    /// Bytes absorbed or squeezed per permutation call.
    pub fn rate(&self) -> usize {
        self.rate
    }

    pub fn capacity(&self) -> usize {
        STATE_BYTES - self.rate
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Offset of the next byte to absorb or squeeze, in `0..=rate`.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn permutation(&self) -> &P {
        &self.permutation
    }

    /// XOR `input` into the state, permuting each time the rate fills up.
    ///
    /// Calls compose: absorbing `a` then `b` is the same as absorbing `a ‖ b`.
    ///
    /// # Panics
    ///
    /// If the sponge is no longer absorbing.
    pub fn absorb(&mut self, mut input: &[u8]) -> &mut Self {
        self.expect_phase(Phase::Absorbing, "absorb");
        while !input.is_empty() {
            let chunk_len = usize::min(input.len(), self.rate - self.pos);
            let (chunk, rest) = input.split_at(chunk_len);
            self.state.xor_bytes(self.pos, chunk);
            self.pos += chunk_len;
            if self.pos == self.rate {
                self.permutation.permute(&mut self.state);
                self.pos = 0;
            }
            input = rest;
        }
        self
    }

    /// Apply `pad10*1` with the given domain suffix, permute, and start
    /// squeezing from the beginning of the rate.
    ///
    /// The suffix lands at the current position and `0x80` at the last rate
    /// byte, both by XOR, so they combine when only one byte of the block is
    /// left.
    ///
    /// # Panics
    ///
    /// If the sponge is no longer absorbing.
    pub fn pad(&mut self, domain: Domain) -> &mut Self {
        self.expect_phase(Phase::Absorbing, "pad");
        self.state[self.pos] ^= domain.suffix();
        self.state[self.rate - 1] ^= 0x80;
        self.permutation.permute(&mut self.state);
        log::trace!(
            "{}: padded at {}/{} with {:?}, squeezing",
            self.permutation.name(),
            self.pos,
            self.rate,
            domain
        );
        self.pos = 0;
        self.phase = Phase::Squeezing;
        self
    }

    /// Switch to extendable output (SHAKE padding).
    pub fn xof(&mut self) -> &mut Self {
        self.pad(Domain::Shake)
    }

    /// Pad for a SHA-3 digest and write it to `out`.
    ///
    /// # Panics
    ///
    /// If the sponge is no longer absorbing, or `out` is not exactly
    /// [`Sponge::output_len`] bytes.
    pub fn finalize_into(&mut self, out: &mut [u8]) {
        if out.len() != self.output_len {
            log::error!(
                "digest buffer of {} bytes for a {}-byte digest",
                out.len(),
                self.output_len
            );
            panic!(
                "digest buffer of {} bytes for a {}-byte digest",
                out.len(),
                self.output_len
            );
        }
        self.pad(Domain::Sha3);
        out.copy_from_slice(&self.state[..self.output_len]);
        self.phase = Phase::Finalized;
    }

    /// Pad for a SHA-3 digest and return it.
    pub fn finalize(&mut self) -> Vec<u8> {
        let mut out = vec![0u8; self.output_len];
        self.finalize_into(&mut out);
        out
    }

    /// Fill `output` with the next bytes of the output stream.
    ///
    /// Calls compose: squeezing `n` then `m` bytes yields the same bytes as
    /// squeezing `n + m`.
    ///
    /// # Panics
    ///
    /// Unless the sponge was switched to output with [`Sponge::xof`] or
    /// [`Sponge::pad`].
    pub fn squeeze(&mut self, mut output: &mut [u8]) -> &mut Self {
        self.expect_phase(Phase::Squeezing, "squeeze");
        while !output.is_empty() {
            if self.pos == self.rate {
                self.permutation.permute(&mut self.state);
                self.pos = 0;
            }
            let chunk_len = usize::min(output.len(), self.rate - self.pos);
            let (chunk, rest) = core::mem::take(&mut output).split_at_mut(chunk_len);
            chunk.copy_from_slice(&self.state[self.pos..self.pos + chunk_len]);
            self.pos += chunk_len;
            output = rest;
        }
        self
    }

    pub fn squeeze_vec(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.squeeze(&mut out);
        out
    }

    /// Turn a squeezing sponge into an endless output stream.
    ///
    /// # Panics
    ///
    /// Unless the sponge is squeezing.
    pub fn into_stream(self) -> XofStream<P> {
        self.expect_phase(Phase::Squeezing, "into_stream");
        XofStream { sponge: self }
    }

    /// Wipe the state and start absorbing again, keeping rate and backend.
    pub fn reset(&mut self) {
        self.zeroize();
    }

    #[track_caller]
    fn expect_phase(&self, expected: Phase, operation: &str) {
        if self.phase != expected {
            log::error!(
                "{operation} on a sponge in phase {:?}, expected {:?}",
                self.phase,
                expected
            );
            panic!(
                "{operation} on a sponge in phase {:?}, expected {:?}",
                self.phase, expected
            );
        }
    }
}

impl<P: Permutation> Zeroize for Sponge<P> {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.pos = 0;
        self.phase = Phase::Absorbing;
    }
}

impl<P: Permutation> fmt::Debug for Sponge<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The state is left out on purpose.
        f.debug_struct("Sponge")
            .field("permutation", &self.permutation.name())
            .field("rate", &self.rate)
            .field("output_len", &self.output_len)
            .field("position", &self.pos)
            .field("phase", &self.phase)
            .finish()
    }
}

/// The output of a sponge in squeezing phase, as a lazy, endless, forward-only
/// byte stream.
///
/// Bytes can be pulled through [`Iterator`], [`std::io::Read`] or
/// [`digest::XofReader`]; all three advance the same position.
#[derive(Clone, Debug)]
pub struct XofStream<P: Permutation = DefaultPermutation> {
    sponge: Sponge<P>,
}

impl<P: Permutation> XofStream<P> {
    pub fn fill(&mut self, output: &mut [u8]) {
        self.sponge.squeeze(output);
    }
}

impl<P: Permutation> Iterator for XofStream<P> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let mut byte = [0u8];
        self.sponge.squeeze(&mut byte);
        Some(byte[0])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<P: Permutation> io::Read for XofStream<P> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.sponge.squeeze(buf);
        Ok(buf.len())
    }
}

impl<P: Permutation> digest::XofReader for XofStream<P> {
    fn read(&mut self, buffer: &mut [u8]) {
        self.sponge.squeeze(buffer);
    }
}
