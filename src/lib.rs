//!
//! **This crate is work in progress, not suitable for production.**
//!
//! Bitsponge is a Keccak-p\[1600,24\] permutation written over a small set of
//! bit-manipulation primitives (rotate, and-not, generalized reverse and
//! shuffle), with the SHA-3 family built on top of it.
//!
//! # Overview
//!
//! The crate is layered:
//!
//! - [`bits`]: scalar primitives on 32- and 64-bit words, including two ways of
//!   splitting a 64-bit word into its even and odd bits.
//! - [`keccak`]: the 1600-bit state and three interchangeable [`Permutation`]
//!   backends ([`keccak::Reference`], [`keccak::Lane64`], [`keccak::Interleaved32`])
//!   that agree bit for bit.
//! - [`Sponge`]: absorb, pad and squeeze over any backend.
//! - [`sha3`] and [`cshake`]: SHA3-224/256/384/512, SHAKE128/256 and cSHAKE,
//!   both as one-shot functions and as RustCrypto [`digest`] hashers.
//!
//! ```
//! use bitsponge::{Sponge, keccak::Interleaved32};
//!
//! let mut sponge = Sponge::with_permutation(Interleaved32, 32);
//! sponge.absorb(b"ab").absorb(b"c");
//! assert_eq!(sponge.finalize(), bitsponge::sha3_256(b"abc"));
//! ```
//!
//! The backend is a type parameter defaulting to [`DefaultPermutation`], or a
//! [`Backend`] value picked at run time:
//!
//! ```
//! use bitsponge::{Backend, Sponge};
//!
//! let backend: Backend = "interleaved32".parse().unwrap();
//! let mut shake = Sponge::with_permutation(backend, 16);
//! let mut out = [0u8; 64];
//! shake.absorb(b"").xof().squeeze(&mut out);
//! assert_eq!(out[..2], [0x7f, 0x9c]);
//! ```
//!
//! A sponge is a small state machine. Absorbing after the output was read, or
//! squeezing before switching to extendable output, are programming errors and
//! panic; only parameters that arrive at run time (output length, backend name)
//! are reported through [`SpongeError`].
//!
//! # Features
//!
//! - `parallel` (default): [`batch`] spreads independent computations over the
//!   rayon thread pool.

#[cfg(target_endian = "big")]
compile_error!(
    r#"
This crate doesn't support big-endian targets.
"#
);

/// Rotate, and-not, generalized reverse and shuffle.
pub mod bits;
/// Hashing many independent inputs.
pub mod batch;
/// Customizable SHAKE.
pub mod cshake;
/// Run-time parameter errors.
mod errors;
pub mod keccak;
/// SHA-3 and SHAKE.
pub mod sha3;
/// The sponge construction.
pub mod sponge;

pub use crate::sha3::{
    sha3, sha3_224, sha3_256, sha3_384, sha3_512, sha3_with, shake128, shake128_with, shake256,
    shake256_with, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Shake128, Shake256,
};
pub use cshake::{cshake128, cshake256, CShake128, CShake256};
pub use errors::{SpongeError, SpongeResult, MAX_OUTPUT_LEN};
pub use keccak::{Backend, DefaultPermutation, KeccakState, Permutation};
pub use sponge::{Domain, Phase, Sponge, XofStream};
