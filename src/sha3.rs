//! SHA-3 and SHAKE on top of [`Sponge`].
//!
//! One-shot helpers for the common cases, and [`digest`] 0.10 hashers for code
//! written against the RustCrypto traits:
//!
//! ```
//! use bitsponge::{Sha3_256, Shake128};
//! use bitsponge::keccak::Interleaved32;
//! use digest::{Digest, ExtendableOutput, Update, XofReader};
//!
//! let digest = Sha3_256::<Interleaved32>::digest(b"abc");
//! assert_eq!(digest[..4], [0x3a, 0x98, 0x5d, 0xa7]);
//!
//! let mut shake = Shake128::<Interleaved32>::default();
//! shake.update(b"abc");
//! let mut reader = shake.finalize_xof();
//! let mut out = [0u8; 4];
//! reader.read(&mut out);
//! assert_eq!(out, [0x58, 0x81, 0x09, 0x2d]);
//! ```

use core::fmt;

use digest::consts::{U28, U32, U48, U64};
use digest::{
    ExtendableOutput, ExtendableOutputReset, FixedOutput, FixedOutputReset, HashMarker, Output,
    OutputSizeUser, Reset, Update,
};

use crate::keccak::{DefaultPermutation, Permutation};
use crate::sponge::{Sponge, XofStream};

/// SHA-3 with an arbitrary output length in `1..=99` bytes.
///
/// # Panics
///
/// If `output_len` is out of range.
pub fn sha3(output_len: usize, data: &[u8]) -> Vec<u8> {
    sha3_with(DefaultPermutation::default(), output_len, data)
}

/// [`sha3`] driven by an explicit permutation backend.
pub fn sha3_with<P: Permutation>(permutation: P, output_len: usize, data: &[u8]) -> Vec<u8> {
    Sponge::with_permutation(permutation, output_len)
        .absorb(data)
        .finalize()
}

fn sha3_fixed<P: Permutation, const N: usize>(permutation: P, data: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    Sponge::with_permutation(permutation, N)
        .absorb(data)
        .finalize_into(&mut out);
    out
}

pub fn sha3_224(data: &[u8]) -> [u8; 28] {
    sha3_fixed(DefaultPermutation::default(), data)
}

pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    sha3_fixed(DefaultPermutation::default(), data)
}

pub fn sha3_384(data: &[u8]) -> [u8; 48] {
    sha3_fixed(DefaultPermutation::default(), data)
}

pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    sha3_fixed(DefaultPermutation::default(), data)
}

/// Fill `out` with SHAKE128 of `data`.
pub fn shake128(data: &[u8], out: &mut [u8]) {
    shake128_with(DefaultPermutation::default(), data, out)
}

/// Fill `out` with SHAKE256 of `data`.
pub fn shake256(data: &[u8], out: &mut [u8]) {
    shake256_with(DefaultPermutation::default(), data, out)
}

pub fn shake128_with<P: Permutation>(permutation: P, data: &[u8], out: &mut [u8]) {
    Sponge::with_permutation(permutation, 16)
        .absorb(data)
        .xof()
        .squeeze(out);
}

pub fn shake256_with<P: Permutation>(permutation: P, data: &[u8], out: &mut [u8]) {
    Sponge::with_permutation(permutation, 32)
        .absorb(data)
        .xof()
        .squeeze(out);
}

macro_rules! impl_sha3 {
    ($name:ident, $output_size:ty, $output_len:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone)]
        pub struct $name<P: Permutation = DefaultPermutation> {
            sponge: Sponge<P>,
        }

        impl<P: Permutation> $name<P> {
            pub fn with_permutation(permutation: P) -> Self {
                Self {
                    sponge: Sponge::with_permutation(permutation, $output_len),
                }
            }
        }

        impl<P: Permutation> Default for $name<P> {
            fn default() -> Self {
                Self::with_permutation(P::default())
            }
        }

        impl<P: Permutation> fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.sponge).finish()
            }
        }

        impl<P: Permutation> HashMarker for $name<P> {}

        impl<P: Permutation> OutputSizeUser for $name<P> {
            type OutputSize = $output_size;
        }

        impl<P: Permutation> Update for $name<P> {
            fn update(&mut self, data: &[u8]) {
                self.sponge.absorb(data);
            }
        }

        impl<P: Permutation> FixedOutput for $name<P> {
            fn finalize_into(mut self, out: &mut Output<Self>) {
                self.sponge.finalize_into(out.as_mut_slice());
            }
        }

        impl<P: Permutation> Reset for $name<P> {
            fn reset(&mut self) {
                self.sponge.reset();
            }
        }

        impl<P: Permutation> FixedOutputReset for $name<P> {
            fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
                self.sponge.finalize_into(out.as_mut_slice());
                self.sponge.reset();
            }
        }
    };
}

macro_rules! impl_shake {
    ($name:ident, $security:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone)]
        pub struct $name<P: Permutation = DefaultPermutation> {
            sponge: Sponge<P>,
        }

        impl<P: Permutation> $name<P> {
            pub fn with_permutation(permutation: P) -> Self {
                Self {
                    sponge: Sponge::with_permutation(permutation, $security),
                }
            }
        }

        impl<P: Permutation> Default for $name<P> {
            fn default() -> Self {
                Self::with_permutation(P::default())
            }
        }

        impl<P: Permutation> fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.sponge).finish()
            }
        }

        impl<P: Permutation> Update for $name<P> {
            fn update(&mut self, data: &[u8]) {
                self.sponge.absorb(data);
            }
        }

        impl<P: Permutation> ExtendableOutput for $name<P> {
            type Reader = XofStream<P>;

            fn finalize_xof(mut self) -> Self::Reader {
                self.sponge.xof();
                self.sponge.into_stream()
            }
        }

        impl<P: Permutation> Reset for $name<P> {
            fn reset(&mut self) {
                self.sponge.reset();
            }
        }

        impl<P: Permutation> ExtendableOutputReset for $name<P> {
            fn finalize_xof_reset(&mut self) -> Self::Reader {
                let mut sponge = self.sponge.clone();
                self.sponge.reset();
                sponge.xof();
                sponge.into_stream()
            }
        }
    };
}

impl_sha3!(Sha3_224, U28, 28, "SHA3-224 hasher.");
impl_sha3!(Sha3_256, U32, 32, "SHA3-256 hasher.");
impl_sha3!(Sha3_384, U48, 48, "SHA3-384 hasher.");
impl_sha3!(Sha3_512, U64, 64, "SHA3-512 hasher.");

impl_shake!(Shake128, 16, "SHAKE128 extendable-output function.");
impl_shake!(Shake256, 32, "SHAKE256 extendable-output function.");

#[cfg(test)]
mod tests {
    use digest::{Digest, XofReader};

    use super::*;
    use crate::keccak::{Backend, Interleaved32, Lane64, Reference};

    #[test]
    fn test_abc() {
        assert_eq!(
            hex::encode(sha3_256(b"abc")),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
        assert_eq!(
            hex::encode(sha3_384(b"abc")),
            "ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b2\
             98d88cea927ac7f539f1edf228376d25"
        );
        assert_eq!(
            hex::encode(sha3_512(b"abc")),
            "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
             10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
        );
        assert_eq!(
            hex::encode(sha3_224(b"")),
            "6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7"
        );
    }

    #[test]
    fn test_helpers_agree_across_backends() {
        let data: Vec<u8> = (0..=255).collect();
        for backend in Backend::ALL {
            assert_eq!(sha3_with(backend, 32, &data), sha3_256(&data));
            let mut ours = [0u8; 300];
            let mut expected = [0u8; 300];
            shake256_with(backend, &data, &mut ours);
            shake256(&data, &mut expected);
            assert_eq!(ours, expected, "{backend}");
        }
    }

    #[test]
    fn test_digest_against_rustcrypto() {
        for len in [0usize, 1, 71, 72, 73, 135, 136, 137, 500] {
            let data = vec![0x5Au8; len];
            assert_eq!(
                Sha3_224::<Reference>::digest(&data)[..],
                ::sha3::Sha3_224::digest(&data)[..]
            );
            assert_eq!(
                Sha3_256::<Lane64>::digest(&data)[..],
                ::sha3::Sha3_256::digest(&data)[..]
            );
            assert_eq!(
                Sha3_384::<Interleaved32>::digest(&data)[..],
                ::sha3::Sha3_384::digest(&data)[..]
            );
            assert_eq!(
                Sha3_512::<Backend>::digest(&data)[..],
                ::sha3::Sha3_512::digest(&data)[..]
            );
        }
    }

    #[test]
    fn test_xof_against_rustcrypto() {
        let data = b"The quick brown fox jumps over the lazy dog";

        let mut ours = Shake128::<Interleaved32>::default();
        Update::update(&mut ours, data);
        let mut oracle = ::sha3::Shake128::default();
        Update::update(&mut oracle, data);

        let (mut ours, mut oracle) = (ours.finalize_xof(), oracle.finalize_xof());
        for len in [1, 167, 1, 168, 500] {
            let mut a = vec![0u8; len];
            let mut b = vec![0u8; len];
            ours.read(&mut a);
            oracle.read(&mut b);
            assert_eq!(a, b);
        }

        let mut ours = [0u8; 64];
        let mut oracle = [0u8; 64];
        shake256(data, &mut ours);
        let mut hasher = ::sha3::Shake256::default();
        Update::update(&mut hasher, data);
        hasher.finalize_xof().read(&mut oracle);
        assert_eq!(ours, oracle);
    }

    #[test]
    fn test_reset_variants() {
        let mut hasher = Sha3_256::<Lane64>::default();
        Digest::update(&mut hasher, b"abc");
        let first = hasher.finalize_reset();
        Digest::update(&mut hasher, b"abc");
        assert_eq!(hasher.finalize(), first);

        let mut shake = Shake256::<Lane64>::default();
        shake.update(b"abc");
        let mut first = [0u8; 40];
        shake.finalize_xof_reset().read(&mut first);
        shake.update(b"abc");
        let mut second = [0u8; 40];
        shake.finalize_xof().read(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_arbitrary_output_len() {
        let out = sha3(20, b"abc");
        assert_eq!(out.len(), 20);
        assert_eq!(out, sha3_with(Reference, 20, b"abc"));
        assert_ne!(out[..], sha3_256(b"abc")[..20]);
    }
}
