//! Bit-manipulation primitives.
//!
//! These are the operations the permutation backends are written in terms of:
//! rotate-right, and-with-complement, generalized reverse, generalized
//! (un)shuffle and the even/odd bit-interleaving of a 64-bit lane.
//! Every function here is total and branch-free on its data, and matches the
//! obvious mask-and-shift definition bit for bit.

use core::ops::{BitAnd, Not};

/// Rotate a 32-bit word right by `n` bits. Only the low 5 bits of `n` are used.
#[inline(always)]
pub const fn ror32(x: u32, n: u32) -> u32 {
    let shamt = n & 31;
    (x >> shamt) | (x << ((32 - shamt) & 31))
}

/// Rotate a 64-bit word right by `n` bits. Only the low 6 bits of `n` are used.
#[inline(always)]
pub const fn ror64(x: u64, n: u32) -> u64 {
    let shamt = n & 63;
    (x >> shamt) | (x << ((64 - shamt) & 63))
}

/// And-with-complement: `!a & b`.
///
/// The complemented operand is the *first* one, which is the order Chi needs:
/// `lane[i] ^= andn(lane[i + 1], lane[i + 2])`.
#[inline(always)]
pub fn andn<T>(a: T, b: T) -> T
where
    T: Not<Output = T> + BitAnd<Output = T>,
{
    !a & b
}

#[inline(always)]
const fn grev_stage32(x: u32, mask: u32, n: u32) -> u32 {
    ((x & mask) << n) | ((x >> n) & mask)
}

#[inline(always)]
const fn grev_stage64(x: u64, mask: u64, n: u32) -> u64 {
    ((x & mask) << n) | ((x >> n) & mask)
}

/// Generalized reverse of a 32-bit word.
///
/// Each set bit of `k` swaps adjacent blocks of that size:
/// `grev32(x, 31)` reverses all bits, `grev32(x, 24)` swaps bytes.
pub const fn grev32(mut x: u32, k: u32) -> u32 {
    if k & 1 != 0 {
        x = grev_stage32(x, 0x5555_5555, 1);
    }
    if k & 2 != 0 {
        x = grev_stage32(x, 0x3333_3333, 2);
    }
    if k & 4 != 0 {
        x = grev_stage32(x, 0x0F0F_0F0F, 4);
    }
    if k & 8 != 0 {
        x = grev_stage32(x, 0x00FF_00FF, 8);
    }
    if k & 16 != 0 {
        x = grev_stage32(x, 0x0000_FFFF, 16);
    }
    x
}

/// Generalized reverse of a 64-bit word. `grev64(x, 63)` reverses all bits.
pub const fn grev64(mut x: u64, k: u32) -> u64 {
    if k & 1 != 0 {
        x = grev_stage64(x, 0x5555_5555_5555_5555, 1);
    }
    if k & 2 != 0 {
        x = grev_stage64(x, 0x3333_3333_3333_3333, 2);
    }
    if k & 4 != 0 {
        x = grev_stage64(x, 0x0F0F_0F0F_0F0F_0F0F, 4);
    }
    if k & 8 != 0 {
        x = grev_stage64(x, 0x00FF_00FF_00FF_00FF, 8);
    }
    if k & 16 != 0 {
        x = grev_stage64(x, 0x0000_FFFF_0000_FFFF, 16);
    }
    if k & 32 != 0 {
        x = grev_stage64(x, 0x0000_0000_FFFF_FFFF, 32);
    }
    x
}

// One butterfly of the shuffle network: bits under `left` and `right`
// trade places across a distance of `n`, everything else stays.
#[inline(always)]
const fn shuffle_stage32(x: u32, left: u32, right: u32, n: u32) -> u32 {
    (x & !(left | right)) | ((x << n) & left) | ((x >> n) & right)
}

#[inline(always)]
const fn shuffle_stage64(x: u64, left: u64, right: u64, n: u32) -> u64 {
    (x & !(left | right)) | ((x << n) & left) | ((x >> n) & right)
}

/// Generalized shuffle of a 32-bit word. `shfl32(x, 15)` is "zip": the low
/// half-word lands on the even bits and the high half-word on the odd bits.
pub const fn shfl32(mut x: u32, k: u32) -> u32 {
    if k & 8 != 0 {
        x = shuffle_stage32(x, 0x00FF_0000, 0x0000_FF00, 8);
    }
    if k & 4 != 0 {
        x = shuffle_stage32(x, 0x0F00_0F00, 0x00F0_00F0, 4);
    }
    if k & 2 != 0 {
        x = shuffle_stage32(x, 0x3030_3030, 0x0C0C_0C0C, 2);
    }
    if k & 1 != 0 {
        x = shuffle_stage32(x, 0x4444_4444, 0x2222_2222, 1);
    }
    x
}

/// Generalized unshuffle of a 32-bit word, the inverse of [`shfl32`].
/// `unshfl32(x, 15)` is "unzip": even bits to the low half-word, odd bits to
/// the high half-word.
pub const fn unshfl32(mut x: u32, k: u32) -> u32 {
    if k & 1 != 0 {
        x = shuffle_stage32(x, 0x4444_4444, 0x2222_2222, 1);
    }
    if k & 2 != 0 {
        x = shuffle_stage32(x, 0x3030_3030, 0x0C0C_0C0C, 2);
    }
    if k & 4 != 0 {
        x = shuffle_stage32(x, 0x0F00_0F00, 0x00F0_00F0, 4);
    }
    if k & 8 != 0 {
        x = shuffle_stage32(x, 0x00FF_0000, 0x0000_FF00, 8);
    }
    x
}

/// Generalized shuffle of a 64-bit word.
pub const fn shfl64(mut x: u64, k: u32) -> u64 {
    if k & 16 != 0 {
        x = shuffle_stage64(x, 0x0000_FFFF_0000_0000, 0x0000_0000_FFFF_0000, 16);
    }
    if k & 8 != 0 {
        x = shuffle_stage64(x, 0x00FF_0000_00FF_0000, 0x0000_FF00_0000_FF00, 8);
    }
    if k & 4 != 0 {
        x = shuffle_stage64(x, 0x0F00_0F00_0F00_0F00, 0x00F0_00F0_00F0_00F0, 4);
    }
    if k & 2 != 0 {
        x = shuffle_stage64(x, 0x3030_3030_3030_3030, 0x0C0C_0C0C_0C0C_0C0C, 2);
    }
    if k & 1 != 0 {
        x = shuffle_stage64(x, 0x4444_4444_4444_4444, 0x2222_2222_2222_2222, 1);
    }
    x
}

/// Generalized unshuffle of a 64-bit word, the inverse of [`shfl64`].
/// `unshfl64(x, 31)` gathers the even bits into the low word and the odd bits
/// into the high word.
pub const fn unshfl64(mut x: u64, k: u32) -> u64 {
    if k & 1 != 0 {
        x = shuffle_stage64(x, 0x4444_4444_4444_4444, 0x2222_2222_2222_2222, 1);
    }
    if k & 2 != 0 {
        x = shuffle_stage64(x, 0x3030_3030_3030_3030, 0x0C0C_0C0C_0C0C_0C0C, 2);
    }
    if k & 4 != 0 {
        x = shuffle_stage64(x, 0x0F00_0F00_0F00_0F00, 0x00F0_00F0_00F0_00F0, 4);
    }
    if k & 8 != 0 {
        x = shuffle_stage64(x, 0x00FF_0000_00FF_0000, 0x0000_FF00_0000_FF00, 8);
    }
    if k & 16 != 0 {
        x = shuffle_stage64(x, 0x0000_FFFF_0000_0000, 0x0000_0000_FFFF_0000, 16);
    }
    x
}

/// Split a lane into its even-indexed and odd-indexed bits.
///
/// Bit `i` of the first word is bit `2i` of `x`, bit `i` of the second word is
/// bit `2i + 1`. Built from two 32-bit unzips and a half-word exchange.
#[inline]
pub const fn interleave(x: u64) -> (u32, u32) {
    let lo = unshfl32(x as u32, 15);
    let hi = unshfl32((x >> 32) as u32, 15);
    let even = (lo & 0x0000_FFFF) | (hi << 16);
    let odd = (hi & 0xFFFF_0000) | (lo >> 16);
    (even, odd)
}

/// Inverse of [`interleave`].
#[inline]
pub const fn uninterleave(even: u32, odd: u32) -> u64 {
    let t0 = shfl32(even, 15);
    let t1 = shfl32(odd, 15);
    let lo = ((t1 & 0x5555_5555) << 1) | (t0 & 0x5555_5555);
    let hi = ((t0 & 0xAAAA_AAAA) >> 1) | (t1 & 0xAAAA_AAAA);
    (lo as u64) | ((hi as u64) << 32)
}

#[inline(always)]
const fn delta_swap(x: u64, mask: u64, shift: u32) -> u64 {
    let t = ((x >> shift) ^ x) & mask;
    x ^ t ^ (t << shift)
}

/// [`interleave`] computed with plain masks and shifts, no shuffle network.
#[inline]
pub const fn interleave_by_shifts(x: u64) -> (u32, u32) {
    let x = delta_swap(x, 0x2222_2222_2222_2222, 1);
    let x = delta_swap(x, 0x0C0C_0C0C_0C0C_0C0C, 2);
    let x = delta_swap(x, 0x00F0_00F0_00F0_00F0, 4);
    let x = delta_swap(x, 0x0000_FF00_0000_FF00, 8);
    let x = delta_swap(x, 0x0000_0000_FFFF_0000, 16);
    (x as u32, (x >> 32) as u32)
}

/// [`uninterleave`] computed with plain masks and shifts.
#[inline]
pub const fn uninterleave_by_shifts(even: u32, odd: u32) -> u64 {
    let x = (even as u64) | ((odd as u64) << 32);
    let x = delta_swap(x, 0x0000_0000_FFFF_0000, 16);
    let x = delta_swap(x, 0x0000_FF00_0000_FF00, 8);
    let x = delta_swap(x, 0x00F0_00F0_00F0_00F0, 4);
    let x = delta_swap(x, 0x0C0C_0C0C_0C0C_0C0C, 2);
    delta_swap(x, 0x2222_2222_2222_2222, 1)
}

/// Rotate an interleaved lane left by `n` bits (mod 64) using only 32-bit
/// rotations.
///
/// An even shift rotates both halves by `n / 2`. An odd shift also moves
/// bits between the halves: the new even half is the old odd half rotated by
/// `(n + 1) / 2`, the new odd half is the old even half rotated by `n / 2`.
#[inline(always)]
pub const fn rotl_interleaved(even: u32, odd: u32, n: u32) -> (u32, u32) {
    let n = n & 63;
    let half = n >> 1;
    if n & 1 == 0 {
        (ror32(even, 32 - half), ror32(odd, 32 - half))
    } else {
        (ror32(odd, 32 - (half + 1)), ror32(even, 32 - half))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn naive_interleave(x: u64) -> (u32, u32) {
        let mut even = 0u32;
        let mut odd = 0u32;
        for i in 0..32 {
            even |= (((x >> (2 * i)) & 1) as u32) << i;
            odd |= (((x >> (2 * i + 1)) & 1) as u32) << i;
        }
        (even, odd)
    }

    #[test]
    fn test_rotations_match_core() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            let x32: u32 = rng.gen();
            let x64: u64 = rng.gen();
            for n in 0..80 {
                assert_eq!(ror32(x32, n), x32.rotate_right(n % 32));
                assert_eq!(ror64(x64, n), x64.rotate_right(n % 64));
            }
        }
        assert_eq!(ror32(0xdead_beef, 0), 0xdead_beef);
        assert_eq!(ror64(0x0123_4567_89ab_cdef, 0), 0x0123_4567_89ab_cdef);
    }

    #[test]
    fn test_andn_operand_order() {
        assert_eq!(andn(0b1100u8, 0b1010u8), 0b0010);
        assert_eq!(andn(0u64, u64::MAX), u64::MAX);
        assert_eq!(andn(u32::MAX, u32::MAX), 0);
        // the swapped order would give 0b0100 here
        assert_ne!(andn(0b1100u8, 0b1010u8), 0b1100 & !0b1010);
    }

    #[test]
    fn test_grev_special_cases() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x: u32 = rng.gen();
            let y: u64 = rng.gen();
            assert_eq!(grev32(x, 31), x.reverse_bits());
            assert_eq!(grev32(x, 24), x.swap_bytes());
            assert_eq!(grev32(x, 0), x);
            assert_eq!(grev64(y, 63), y.reverse_bits());
            assert_eq!(grev64(y, 56), y.swap_bytes());
            for k in 0..64 {
                assert_eq!(grev64(grev64(y, k), k), y);
            }
        }
    }

    #[test]
    fn test_shuffle_inverse() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let x: u32 = rng.gen();
            let y: u64 = rng.gen();
            for k in 0..16 {
                assert_eq!(unshfl32(shfl32(x, k), k), x);
            }
            for k in 0..32 {
                assert_eq!(unshfl64(shfl64(y, k), k), y);
            }
        }
        assert_eq!(shfl32(0x0000_FFFF, 15), 0x5555_5555);
        assert_eq!(unshfl32(0x5555_5555, 15), 0x0000_FFFF);
    }

    #[test]
    fn test_interleave_techniques_agree() {
        let mut rng = StdRng::seed_from_u64(3);
        let fixed = [0, u64::MAX, 1, 1 << 63, 0x5555_5555_5555_5555, 0xAAAA_AAAA_AAAA_AAAA];
        let random = (0..10_000).map(|_| rng.gen::<u64>());
        for x in fixed.into_iter().chain(random) {
            let expected = naive_interleave(x);
            assert_eq!(interleave(x), expected, "shuffle technique, x = {x:#018x}");
            assert_eq!(interleave_by_shifts(x), expected, "shift technique, x = {x:#018x}");
            let (even, odd) = expected;
            assert_eq!(unshfl64(x, 31), (even as u64) | ((odd as u64) << 32));
            assert_eq!(uninterleave(even, odd), x);
            assert_eq!(uninterleave_by_shifts(even, odd), x);
        }
    }

    #[test]
    fn test_interleaved_rotation() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let x: u64 = rng.gen();
            let (even, odd) = interleave(x);
            for n in 0..64 {
                let (e, o) = rotl_interleaved(even, odd, n);
                assert_eq!(uninterleave(e, o), x.rotate_left(n), "n = {n}");
            }
        }
    }
}
