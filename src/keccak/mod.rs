//! The Keccak-p\[1600,24\] permutation.
//!
//! The permutation is exposed through the [`Permutation`] trait and comes in three
//! interchangeable backends, all required to agree bit for bit:
//!
//! - [`Reference`]: the textbook 5×5 formulation. Slow, kept as the oracle.
//! - [`Lane64`]: 64-bit words, unrolled Rho/Pi and an in-place Chi.
//! - [`Interleaved32`]: a 32-bit datapath, each lane split into its even and odd
//!   bits so that every 64-bit rotation becomes two 32-bit rotations.
//!
//! [`Backend`] wraps the three of them into a single value that can be picked at
//! run time.

use core::fmt;
use core::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::SpongeError;

mod index;
mod interleaved;
mod lane64;
mod reference;

pub use interleaved::{Interleaved32, INTERLEAVED_ROUND_CONSTANTS};
pub use lane64::Lane64;
pub use reference::Reference;

/// Number of rounds of Keccak-p\[1600,24\].
pub const ROUNDS: usize = 24;
/// Number of 64-bit lanes in the state.
pub const LANES: usize = 25;
/// Size of the state in bytes.
pub const STATE_BYTES: usize = 200;

/// Iota round constants.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation offsets, indexed `[x][y]`.
pub const ROTATION_OFFSETS: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];

/// Order in which the combined Rho/Pi step visits lanes, starting from lane 1.
///
/// The lane held at `PI_LANES[i - 1]` (lane 1 for `i = 0`) moves to
/// `PI_LANES[i]`, rotated left by `RHO_CHAIN[i]`.
pub const PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Rho offsets along [`PI_LANES`].
pub const RHO_CHAIN: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Flat lane index of column `x`, row `y`.
#[inline(always)]
pub const fn lane_index(x: usize, y: usize) -> usize {
    x + 5 * y
}

/// The 1600-bit Keccak state.
///
/// Stored as 25 lanes; the byte view is the little-endian serialization of the
/// lanes, taken without copying.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeccakState([u64; LANES]);

impl KeccakState {
    /// The all-zero state.
    pub const fn new() -> Self {
        Self([0u64; LANES])
    }

    pub const fn from_lanes(lanes: [u64; LANES]) -> Self {
        Self(lanes)
    }

    pub fn from_bytes(bytes: &[u8; STATE_BYTES]) -> Self {
        let mut state = Self::new();
        state.as_bytes_mut().copy_from_slice(bytes);
        state
    }

    pub fn lanes(&self) -> &[u64; LANES] {
        &self.0
    }

    pub fn lanes_mut(&mut self) -> &mut [u64; LANES] {
        &mut self.0
    }

    /// The lane at column `x`, row `y`.
    #[inline(always)]
    pub fn lane(&self, x: usize, y: usize) -> u64 {
        self.0[lane_index(x, y)]
    }

    pub fn as_bytes(&self) -> &[u8; STATE_BYTES] {
        bytemuck::cast_ref(&self.0)
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; STATE_BYTES] {
        bytemuck::cast_mut(&mut self.0)
    }

    /// XOR `data` into the state starting at byte `offset`.
    #[inline]
    pub fn xor_bytes(&mut self, offset: usize, data: &[u8]) {
        self[offset..offset + data.len()]
            .iter_mut()
            .zip(data)
            .for_each(|(s, d)| *s ^= d);
    }
}

index::impl_byte_indexing!(KeccakState);

impl fmt::Debug for KeccakState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // State bytes may be key material; keep them out of logs.
        f.write_str("KeccakState { .. }")
    }
}

/// A Keccak-p\[1600,24\] implementation.
///
/// Implementors hold no state between calls: `permute` is a pure function of the
/// 200 bytes it is handed, so one value can be shared across any number of
/// independent sponges.
pub trait Permutation: Clone + Default {
    /// Apply the 24 rounds in place.
    fn permute(&self, state: &mut KeccakState);

    /// A short name, used in logs.
    fn name(&self) -> &'static str;
}

/// The backend used when none is named.
pub type DefaultPermutation = Lane64;

/// Run-time selection of a permutation backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    Reference,
    #[default]
    Lane64,
    Interleaved32,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Reference, Backend::Lane64, Backend::Interleaved32];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Backend::Reference => "reference",
            Backend::Lane64 => "lane64",
            Backend::Interleaved32 => "interleaved32",
        }
    }
}

impl Permutation for Backend {
    #[inline]
    fn permute(&self, state: &mut KeccakState) {
        match self {
            Backend::Reference => Reference.permute(state),
            Backend::Lane64 => Lane64.permute(state),
            Backend::Interleaved32 => Interleaved32.permute(state),
        }
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = SpongeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::ALL
            .into_iter()
            .find(|backend| backend.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SpongeError::UnknownBackend(s.to_string()))
    }
}
