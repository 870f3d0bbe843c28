//! Bit-interleaved Keccak-p\[1600,24\] for a 32-bit datapath.
//!
//! Every lane is held as two 32-bit words, one with its even-indexed bits and
//! one with its odd-indexed bits. A 64-bit rotation then costs two 32-bit
//! rotations and, for odd amounts, a swap of the two halves, while every other
//! step works on the halves independently.
//!
//! The state is interleaved once before the first round and restored once after
//! the last one.

use zeroize::Zeroize;

use super::{KeccakState, Permutation, LANES, PI_LANES, RHO_CHAIN, ROUNDS};
use crate::bits::{andn, interleave, ror32, rotl_interleaved, uninterleave};

/// Iota constants in interleaved form, `[even, odd]` per round.
pub const INTERLEAVED_ROUND_CONSTANTS: [[u32; 2]; ROUNDS] = [
    [0x0000_0001, 0x0000_0000],
    [0x0000_0000, 0x0000_0089],
    [0x0000_0000, 0x8000_008B],
    [0x0000_0000, 0x8000_8080],
    [0x0000_0001, 0x0000_008B],
    [0x0000_0001, 0x0000_8000],
    [0x0000_0001, 0x8000_8088],
    [0x0000_0001, 0x8000_0082],
    [0x0000_0000, 0x0000_000B],
    [0x0000_0000, 0x0000_000A],
    [0x0000_0001, 0x0000_8082],
    [0x0000_0000, 0x0000_8003],
    [0x0000_0001, 0x0000_808B],
    [0x0000_0001, 0x8000_000B],
    [0x0000_0001, 0x8000_008A],
    [0x0000_0001, 0x8000_0081],
    [0x0000_0000, 0x8000_0081],
    [0x0000_0000, 0x8000_0008],
    [0x0000_0000, 0x0000_0083],
    [0x0000_0000, 0x8000_8003],
    [0x0000_0001, 0x8000_8088],
    [0x0000_0000, 0x8000_0088],
    [0x0000_0001, 0x0000_8000],
    [0x0000_0000, 0x8000_8082],
];

/// The bit-interleaved 32-bit backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interleaved32;

impl Permutation for Interleaved32 {
    fn permute(&self, state: &mut KeccakState) {
        let mut even = [0u32; LANES];
        let mut odd = [0u32; LANES];
        for (i, &lane) in state.lanes().iter().enumerate() {
            (even[i], odd[i]) = interleave(lane);
        }

        for round_constant in INTERLEAVED_ROUND_CONSTANTS.iter() {
            round(&mut even, &mut odd, round_constant);
        }

        for (i, lane) in state.lanes_mut().iter_mut().enumerate() {
            *lane = uninterleave(even[i], odd[i]);
        }
        even.zeroize();
        odd.zeroize();
    }

    fn name(&self) -> &'static str {
        "interleaved32"
    }
}

#[inline(always)]
fn round(even: &mut [u32; LANES], odd: &mut [u32; LANES], round_constant: &[u32; 2]) {
    // Theta. Rotating a column parity left by one moves the odd half into the
    // even half with a 1-bit rotation and leaves the even half as the new odd.
    let mut ce = [0u32; 5];
    let mut co = [0u32; 5];
    for x in 0..5 {
        ce[x] = even[x] ^ even[x + 5] ^ even[x + 10] ^ even[x + 15] ^ even[x + 20];
        co[x] = odd[x] ^ odd[x + 5] ^ odd[x + 10] ^ odd[x + 15] ^ odd[x + 20];
    }
    for x in 0..5 {
        let de = ce[(x + 4) % 5] ^ ror32(co[(x + 1) % 5], 31);
        let dodd = co[(x + 4) % 5] ^ ce[(x + 1) % 5];
        for y in (0..LANES).step_by(5) {
            even[x + y] ^= de;
            odd[x + y] ^= dodd;
        }
    }

    // Rho and Pi
    let (mut te, mut to) = (even[1], odd[1]);
    for (&dst, &rotation) in PI_LANES.iter().zip(RHO_CHAIN.iter()) {
        let (ue, uo) = (even[dst], odd[dst]);
        (even[dst], odd[dst]) = rotl_interleaved(te, to, rotation);
        te = ue;
        to = uo;
    }

    // Chi, identical on both halves.
    for y in (0..LANES).step_by(5) {
        chi_row(&mut even[y..y + 5]);
        chi_row(&mut odd[y..y + 5]);
    }

    // Iota
    even[0] ^= round_constant[0];
    odd[0] ^= round_constant[1];
}

#[inline(always)]
fn chi_row(row: &mut [u32]) {
    let r = [row[0], row[1], row[2], row[3], row[4]];
    for x in 0..5 {
        row[x] = r[x] ^ andn(r[(x + 1) % 5], r[(x + 2) % 5]);
    }
}
