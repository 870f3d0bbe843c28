//! Many independent computations at once.
//!
//! Each state or message gets its own sponge; nothing is shared but the
//! permutation value, which is stateless. With the `parallel` feature the work
//! is spread over the rayon thread pool, otherwise it runs in order on the
//! calling thread. The results are the same either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::keccak::{KeccakState, Permutation};
use crate::sponge::Sponge;

/// Apply `permutation` to every state in `states`.
#[cfg(not(feature = "parallel"))]
pub fn permute_batch<P: Permutation + Sync>(permutation: &P, states: &mut [KeccakState]) {
    log::debug!(
        "{}: permuting {} states sequentially",
        permutation.name(),
        states.len()
    );
    states
        .iter_mut()
        .for_each(|state| permutation.permute(state));
}

/// Apply `permutation` to every state in `states`.
#[cfg(feature = "parallel")]
pub fn permute_batch<P: Permutation + Sync>(permutation: &P, states: &mut [KeccakState]) {
    log::debug!(
        "{}: permuting {} states on {} workers",
        permutation.name(),
        states.len(),
        rayon::current_num_threads()
    );
    states
        .par_iter_mut()
        .for_each(|state| permutation.permute(state));
}

/// SHA-3 digests of `output_len` bytes for each message, in input order.
///
/// # Panics
///
/// If `output_len` is not in `1..=99`.
#[cfg(not(feature = "parallel"))]
pub fn sha3_batch<P: Permutation + Sync + Send>(
    permutation: &P,
    output_len: usize,
    messages: &[&[u8]],
) -> Vec<Vec<u8>> {
    log::debug!(
        "{}: hashing {} messages sequentially",
        permutation.name(),
        messages.len()
    );
    let template = Sponge::with_permutation(permutation.clone(), output_len);
    messages
        .iter()
        .map(|message| template.clone().absorb(message).finalize())
        .collect()
}

/// SHA-3 digests of `output_len` bytes for each message, in input order.
///
/// # Panics
///
/// If `output_len` is not in `1..=99`.
#[cfg(feature = "parallel")]
pub fn sha3_batch<P: Permutation + Sync + Send>(
    permutation: &P,
    output_len: usize,
    messages: &[&[u8]],
) -> Vec<Vec<u8>> {
    log::debug!(
        "{}: hashing {} messages on {} workers",
        permutation.name(),
        messages.len(),
        rayon::current_num_threads()
    );
    let template = Sponge::with_permutation(permutation.clone(), output_len);
    messages
        .par_iter()
        .map(|message| template.clone().absorb(message).finalize())
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::keccak::{Backend, Interleaved32, Lane64, Reference};
    use crate::sha3::sha3_with;

    #[test]
    fn test_permute_batch_matches_single() {
        let mut rng = StdRng::seed_from_u64(0xBA7C);
        let states: Vec<KeccakState> = (0..64)
            .map(|_| KeccakState::from_lanes(rng.gen()))
            .collect();

        let mut batched = states.clone();
        permute_batch(&Interleaved32, &mut batched);
        for (mut single, batched) in states.into_iter().zip(batched.iter()) {
            Reference.permute(&mut single);
            assert_eq!(&single, batched);
        }
    }

    #[test]
    fn test_sha3_batch_order() {
        let messages: Vec<Vec<u8>> = (0..40u8).map(|i| vec![i; i as usize * 7]).collect();
        let refs: Vec<&[u8]> = messages.iter().map(Vec::as_slice).collect();
        let digests = sha3_batch(&Backend::Lane64, 48, &refs);
        assert_eq!(digests.len(), messages.len());
        for (message, digest) in messages.iter().zip(digests.iter()) {
            assert_eq!(digest, &sha3_with(Lane64, 48, message));
        }
    }

    #[test]
    fn test_empty_batches() {
        permute_batch(&Lane64, &mut []);
        assert!(sha3_batch(&Lane64, 32, &[]).is_empty());
    }
}
