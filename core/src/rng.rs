use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded random source for mine shuffling and the random-cell power-ups.
///
/// Not suitable for anything that needs unpredictability, a session is fully determined by its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: SmallRng,
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `min..max`, returns `min` for an empty range.
    pub fn int_exclusive(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    /// Uniform integer in `min..=max`, returns `min` when `max < min`.
    pub fn int_inclusive(&mut self, min: usize, max: usize) -> usize {
        if max < min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Fisher-Yates: walk from the last index down to 1, swapping with a uniform index in `0..=i`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int_inclusive(0, i);
            items.swap(i, j);
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.int_exclusive(0, items.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = GameRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = rng.int_exclusive(3, 9);
            assert!((3..9).contains(&x));
            let y = rng.int_inclusive(3, 9);
            assert!((3..=9).contains(&y));
        }
        assert_eq!(rng.int_exclusive(5, 5), 5);
        assert_eq!(rng.int_inclusive(4, 4), 4);
    }

    #[test]
    fn inclusive_range_reaches_upper_bound() {
        let mut rng = GameRng::seed_from_u64(11);
        assert!((0..500).any(|_| rng.int_inclusive(0, 3) == 3));
    }

    #[test]
    fn shuffle_is_a_permutation_and_seed_deterministic() {
        let mut a: Vec<u16> = (0..64).collect();
        let mut b = a.clone();
        GameRng::seed_from_u64(42).shuffle(&mut a);
        GameRng::seed_from_u64(42).shuffle(&mut b);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<u16>>());
    }

    #[test]
    fn pick_from_empty_is_none() {
        let mut rng = GameRng::seed_from_u64(1);
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        assert_eq!(rng.pick(&[9]), Some(&9));
    }
}
