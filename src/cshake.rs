//! cSHAKE, the customizable SHAKE of NIST SP 800-185.
//!
//! The function name `N` and customization string `S` are absorbed ahead of the
//! message as `bytepad(encode_string(N) || encode_string(S), rate)`, and the
//! output is padded with the `00` domain suffix. When both strings are empty
//! cSHAKE is defined to be plain SHAKE, prefix and suffix included.

use core::fmt;

use digest::{ExtendableOutput, Reset, Update};

use crate::keccak::{DefaultPermutation, Permutation};
use crate::sponge::{Domain, Sponge, XofStream};

/// An integer encoded by [`left_encode`] or [`right_encode`]: at most eight
/// big-endian value bytes plus one length byte.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EncodedLen {
    offset: usize,
    buffer: [u8; 9],
}

impl EncodedLen {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[self.offset..]
    }
}

impl AsRef<[u8]> for EncodedLen {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for EncodedLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedLen").field(&self.as_bytes()).finish()
    }
}

/// `left_encode(x)`: the byte count of `x`, then `x` in big-endian with no
/// leading zero bytes (but at least one byte).
pub fn left_encode(x: u64) -> EncodedLen {
    let mut buffer = [0u8; 9];
    buffer[1..].copy_from_slice(&x.to_be_bytes());
    let first = buffer[1..8].iter().position(|&b| b != 0).map_or(8, |i| i + 1);
    buffer[first - 1] = (9 - first) as u8;
    EncodedLen {
        offset: first - 1,
        buffer,
    }
}

/// `right_encode(x)`: as [`left_encode`], with the byte count at the end.
pub fn right_encode(x: u64) -> EncodedLen {
    let mut buffer = [0u8; 9];
    buffer[..8].copy_from_slice(&x.to_be_bytes());
    let first = buffer[..7].iter().position(|&b| b != 0).unwrap_or(7);
    buffer[8] = (8 - first) as u8;
    EncodedLen {
        offset: first,
        buffer,
    }
}

/// `encode_string(s) = left_encode(bit length of s) || s`.
pub fn encode_string(s: &[u8]) -> Vec<u8> {
    let prefix = left_encode(s.len() as u64 * 8);
    let mut out = Vec::with_capacity(prefix.as_bytes().len() + s.len());
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(s);
    out
}

/// `bytepad(x, w) = left_encode(w) || x`, zero-padded to a multiple of `w`.
///
/// # Panics
///
/// If `w` is zero.
pub fn bytepad(x: &[u8], w: usize) -> Vec<u8> {
    assert!(w > 0, "bytepad width must be positive");
    let mut out = left_encode(w as u64).as_bytes().to_vec();
    out.extend_from_slice(x);
    out.resize(out.len().div_ceil(w) * w, 0);
    out
}

macro_rules! impl_cshake {
    ($name:ident, $security:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone)]
        pub struct $name<P: Permutation = DefaultPermutation> {
            sponge: Sponge<P>,
            initial: Sponge<P>,
            domain: Domain,
        }

        impl<P: Permutation> $name<P> {
            /// A context for function name `function_name` and customization
            /// `customization`, using the default value of `P`.
            pub fn new(function_name: &[u8], customization: &[u8]) -> Self {
                Self::with_permutation(P::default(), function_name, customization)
            }

            pub fn with_permutation(
                permutation: P,
                function_name: &[u8],
                customization: &[u8],
            ) -> Self {
                let mut sponge = Sponge::with_permutation(permutation, $security);
                let domain = if function_name.is_empty() && customization.is_empty() {
                    Domain::Shake
                } else {
                    let mut prefix = encode_string(function_name);
                    prefix.extend_from_slice(&encode_string(customization));
                    sponge.absorb(&bytepad(&prefix, sponge.rate()));
                    Domain::CShake
                };
                Self {
                    initial: sponge.clone(),
                    sponge,
                    domain,
                }
            }
        }

        impl<P: Permutation> Default for $name<P> {
            fn default() -> Self {
                Self::new(&[], &[])
            }
        }

        impl<P: Permutation> fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("sponge", &self.sponge)
                    .field("domain", &self.domain)
                    .finish()
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
                self.sponge.pad(self.domain);
                self.sponge.into_stream()
            }
        }

        impl<P: Permutation> Reset for $name<P> {
            /// Back to the state right after the prefix was absorbed.
            fn reset(&mut self) {
                self.sponge = self.initial.clone();
            }
        }
    };
}

impl_cshake!(CShake128, 16, "cSHAKE128 extendable-output function.");
impl_cshake!(CShake256, 32, "cSHAKE256 extendable-output function.");

/// Fill `out` with cSHAKE128 of `data`.
pub fn cshake128(data: &[u8], function_name: &[u8], customization: &[u8], out: &mut [u8]) {
    let mut hasher = CShake128::<DefaultPermutation>::new(function_name, customization);
    hasher.update(data);
    hasher.finalize_xof().fill(out);
}

/// Fill `out` with cSHAKE256 of `data`.
pub fn cshake256(data: &[u8], function_name: &[u8], customization: &[u8], out: &mut [u8]) {
    let mut hasher = CShake256::<DefaultPermutation>::new(function_name, customization);
    hasher.update(data);
    hasher.finalize_xof().fill(out);
}

#[cfg(test)]
mod tests {
    use digest::XofReader;

    use super::*;
    use crate::keccak::{Backend, Interleaved32, Reference};
    use crate::sha3::{shake128, shake256};

    #[test]
    fn test_left_encode() {
        assert_eq!(left_encode(0).as_bytes(), &[1, 0]);
        assert_eq!(left_encode(168).as_bytes(), &[1, 168]);
        assert_eq!(left_encode(4096).as_bytes(), &[2, 16, 0]);
        assert_eq!(left_encode(65536).as_bytes(), &[3, 1, 0, 0]);
        assert_eq!(
            left_encode(u64::MAX).as_bytes(),
            &[8, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_right_encode() {
        assert_eq!(right_encode(0).as_bytes(), &[0, 1]);
        assert_eq!(right_encode(256).as_bytes(), &[1, 0, 2]);
        assert_eq!(right_encode(54321).as_bytes(), &[212, 49, 2]);
        assert_eq!(right_encode(1 << 56).as_bytes(), &[1, 0, 0, 0, 0, 0, 0, 0, 8]);
    }

    #[test]
    fn test_encode_string_and_bytepad() {
        assert_eq!(encode_string(b""), [1, 0]);
        assert_eq!(encode_string(b"ab"), [1, 16, b'a', b'b']);

        let padded = bytepad(&[0xAA; 200], 168);
        assert_eq!(padded.len(), 336);
        assert_eq!(&padded[..3], &[1, 168, 0xAA]);
        assert!(padded[202..].iter().all(|&b| b == 0));
        assert_eq!(bytepad(&[0xAA; 166], 168).len(), 168);
    }

    #[test]
    fn test_nist_samples() {
        let mut out = [0u8; 32];
        cshake128(&[0, 1, 2, 3], b"", b"Email Signature", &mut out);
        assert_eq!(
            hex::encode(out),
            "c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5"
        );

        let data: Vec<u8> = (0..200).map(|i| i as u8).collect();
        cshake128(&data, b"", b"Email Signature", &mut out);
        assert_eq!(
            hex::encode(out),
            "c5221d50e4f822d96a2e8881a961420f294b7b24fe3d2094baed2c6524cc166b"
        );

        let mut out = [0u8; 64];
        cshake256(&[0, 1, 2, 3], b"", b"Email Signature", &mut out);
        assert_eq!(
            hex::encode(out),
            "d008828e2b80ac9d2218ffee1d070c48b8e4c87bff32c9699d5b6896eee0edd1\
             64020e2be0560858d9c00c037e34a96937c561a74c412bb4c746469527281c8c"
        );
    }

    #[test]
    fn test_empty_strings_reduce_to_shake() {
        let mut ours = [0u8; 200];
        let mut expected = [0u8; 200];
        cshake128(b"message", b"", b"", &mut ours);
        shake128(b"message", &mut expected);
        assert_eq!(ours, expected);

        cshake256(b"message", b"", b"", &mut ours);
        shake256(b"message", &mut expected);
        assert_eq!(ours, expected);
    }

    #[test]
    fn test_backends_and_reset() {
        let mut expected = [0u8; 100];
        cshake256(b"data", b"KMAC", b"custom", &mut expected);

        for backend in Backend::ALL {
            let mut hasher = CShake256::with_permutation(backend, b"KMAC", b"custom");
            hasher.update(b"garbage");
            hasher.reset();
            hasher.update(b"data");
            let mut out = [0u8; 100];
            hasher.finalize_xof().read(&mut out);
            assert_eq!(out, expected, "{backend}");
        }

        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        let mut reference = CShake128::<Reference>::new(b"", b"x");
        reference.update(b"data");
        reference.finalize_xof().read(&mut a);
        let mut interleaved = CShake128::<Interleaved32>::new(b"", b"x");
        interleaved.update(b"data");
        interleaved.finalize_xof().read(&mut b);
        assert_eq!(a, b);
    }
}
