use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::iter::{ExactSizeIterator, FusedIterator};

/// An iterator that will generate `num` random keys in `[0, key_space)`.
/// Small key spaces produce plenty of duplicates
pub struct RandomKeys {
    remaining: usize,
    key_space: i64,
    rng: Pcg64,
}

impl RandomKeys {
    pub fn new(num: usize, key_space: i64, seed: u64) -> RandomKeys {
        assert!(key_space > 0);
        RandomKeys {
            remaining: num,
            key_space,
            rng: Pcg64::seed_from_u64(seed),
        }
    }
}

impl Iterator for RandomKeys {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.rng.gen_range(0, self.key_space))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl FusedIterator for RandomKeys {}

impl ExactSizeIterator for RandomKeys {}

/// An iterator over every key in `0..num`, each exactly once, in a seeded random order
pub struct Permutation {
    keys: std::vec::IntoIter<i64>,
}

impl Permutation {
    pub fn new(num: usize, seed: u64) -> Permutation {
        let mut keys: Vec<i64> = (0..num as i64).collect();
        keys.shuffle(&mut Pcg64::seed_from_u64(seed));
        Permutation {
            keys: keys.into_iter(),
        }
    }
}

impl Iterator for Permutation {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl FusedIterator for Permutation {}

impl ExactSizeIterator for Permutation {}
