//! Textbook Keccak-p\[1600,24\].
//!
//! Each step is written exactly as FIPS 202 states it over the 5×5 lane matrix,
//! with no fusion between steps. This is the oracle the other backends are
//! tested against; it is not meant to be fast.

use super::{lane_index, KeccakState, Permutation, LANES, ROTATION_OFFSETS, ROUND_CONSTANTS};

const B: usize = 5;

/// The reference backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reference;

impl Permutation for Reference {
    fn permute(&self, state: &mut KeccakState) {
        let lanes = state.lanes_mut();
        for &round_constant in ROUND_CONSTANTS.iter() {
            theta(lanes);
            rho(lanes);
            pi(lanes);
            chi(lanes);
            iota(lanes, round_constant);
        }
    }

    fn name(&self) -> &'static str {
        "reference"
    }
}

fn theta(a: &mut [u64; LANES]) {
    let mut c = [0u64; B];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = (0..B).fold(0, |acc, y| acc ^ a[lane_index(x, y)]);
    }
    for x in 0..B {
        let d = c[(x + B - 1) % B] ^ c[(x + 1) % B].rotate_left(1);
        for y in 0..B {
            a[lane_index(x, y)] ^= d;
        }
    }
}

fn rho(a: &mut [u64; LANES]) {
    for x in 0..B {
        for y in 0..B {
            let lane = &mut a[lane_index(x, y)];
            *lane = lane.rotate_left(ROTATION_OFFSETS[x][y]);
        }
    }
}

fn pi(a: &mut [u64; LANES]) {
    let mut b = [0u64; LANES];
    for x in 0..B {
        for y in 0..B {
            b[lane_index(y, (2 * x + 3 * y) % B)] = a[lane_index(x, y)];
        }
    }
    *a = b;
}

fn chi(a: &mut [u64; LANES]) {
    for y in 0..B {
        let row: [u64; B] = core::array::from_fn(|x| a[lane_index(x, y)]);
        for x in 0..B {
            a[lane_index(x, y)] = row[x] ^ (!row[(x + 1) % B] & row[(x + 2) % B]);
        }
    }
}

#[inline]
fn iota(a: &mut [u64; LANES], round_constant: u64) {
    a[0] ^= round_constant;
}
