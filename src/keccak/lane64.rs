//! Keccak-p\[1600,24\] on 64-bit words.
//!
//! Written against the primitives in [`crate::bits`]: left rotations are
//! expressed as `ror64(x, 64 - n)`, and Chi uses `andn`. The state is loaded
//! into a local array once, all 24 rounds run on it, and it is stored back.

use zeroize::Zeroize;

use super::{KeccakState, Permutation, LANES, ROUND_CONSTANTS};
use crate::bits::{andn, ror64};

/// The 64-bit backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lane64;

impl Permutation for Lane64 {
    fn permute(&self, state: &mut KeccakState) {
        let mut a = *state.lanes();
        for &round_constant in ROUND_CONSTANTS.iter() {
            round(&mut a, round_constant);
        }
        *state.lanes_mut() = a;
        a.zeroize();
    }

    fn name(&self) -> &'static str {
        "lane64"
    }
}

#[inline(always)]
fn round(a: &mut [u64; LANES], round_constant: u64) {
    // Theta
    let c0 = a[0] ^ a[5] ^ a[10] ^ a[15] ^ a[20];
    let c1 = a[1] ^ a[6] ^ a[11] ^ a[16] ^ a[21];
    let c2 = a[2] ^ a[7] ^ a[12] ^ a[17] ^ a[22];
    let c3 = a[3] ^ a[8] ^ a[13] ^ a[18] ^ a[23];
    let c4 = a[4] ^ a[9] ^ a[14] ^ a[19] ^ a[24];

    let d = [
        c4 ^ ror64(c1, 63),
        c0 ^ ror64(c2, 63),
        c1 ^ ror64(c3, 63),
        c2 ^ ror64(c4, 63),
        c3 ^ ror64(c0, 63),
    ];
    for row in a.chunks_exact_mut(5) {
        row.iter_mut().zip(d.iter()).for_each(|(lane, d)| *lane ^= d);
    }

    // Rho and Pi: walk the 24-cycle of lanes starting at lane 1.
    let t = ror64(a[1], 63);
    a[1] = ror64(a[6], 20);
    a[6] = ror64(a[9], 44);
    a[9] = ror64(a[22], 3);
    a[22] = ror64(a[14], 25);
    a[14] = ror64(a[20], 46);
    a[20] = ror64(a[2], 2);
    a[2] = ror64(a[12], 21);
    a[12] = ror64(a[13], 39);
    a[13] = ror64(a[19], 56);
    a[19] = ror64(a[23], 8);
    a[23] = ror64(a[15], 23);
    a[15] = ror64(a[4], 37);
    a[4] = ror64(a[24], 50);
    a[24] = ror64(a[21], 62);
    a[21] = ror64(a[8], 9);
    a[8] = ror64(a[16], 19);
    a[16] = ror64(a[5], 28);
    a[5] = ror64(a[3], 36);
    a[3] = ror64(a[18], 43);
    a[18] = ror64(a[17], 49);
    a[17] = ror64(a[11], 54);
    a[11] = ror64(a[7], 58);
    a[7] = ror64(a[10], 61);
    a[10] = t;

    // Chi, in place with one temporary per row. Lanes 4 and 1 are read after
    // being updated; their update is a no-op exactly where the read matters.
    for row in a.chunks_exact_mut(5) {
        let t = andn(row[3], row[4]);
        row[4] ^= andn(row[0], row[1]);
        row[1] ^= andn(row[2], row[3]);
        row[3] ^= andn(row[4], row[0]);
        row[0] ^= andn(row[1], row[2]);
        row[2] ^= t;
    }

    // Iota
    a[0] ^= round_constant;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keccak::Reference;

    #[test]
    fn test_zero_state() {
        let mut ours = KeccakState::new();
        let mut oracle = KeccakState::new();
        Lane64.permute(&mut ours);
        Reference.permute(&mut oracle);
        assert_eq!(ours.as_bytes(), oracle.as_bytes());
        assert_eq!(
            hex::encode(&ours[..16]),
            "e7dde140798f25f18a47c033f9ccd584"
        );
    }

    #[test]
    fn test_single_bit_states() {
        for bit in (0..1600).step_by(37) {
            let mut ours = KeccakState::new();
            ours[bit / 8] = 1 << (bit % 8);
            let mut oracle = ours.clone();
            Lane64.permute(&mut ours);
            Reference.permute(&mut oracle);
            assert_eq!(ours.as_bytes(), oracle.as_bytes(), "bit {bit}");
        }
    }
}
