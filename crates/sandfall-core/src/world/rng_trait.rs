//! RNG trait abstraction for world simulation
//!
//! Every random draw of a tick goes through this trait, so a world seeded
//! with the same value replays the same run.

/// Random number generator trait for world simulation
pub trait WorldRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate a uniform index in `0..len`. `len` must be non-zero.
    fn gen_index(&mut self, len: usize) -> usize;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Fisher-Yates shuffle in place
    fn shuffle(&mut self, items: &mut [usize]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_world_rng_gen_bool() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        let mut seen_true = false;
        let mut seen_false = false;

        for _ in 0..100 {
            if rng.gen_bool() {
                seen_true = true;
            } else {
                seen_false = true;
            }
        }

        assert!(seen_true);
        assert!(seen_false);
    }

    #[test]
    fn test_world_rng_gen_f32() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            let val = rng.gen_f32();
            assert!(val >= 0.0);
            assert!(val < 1.0);
        }
    }

    #[test]
    fn test_world_rng_gen_index_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let mut hits = [0u32; 8];

        for _ in 0..8000 {
            hits[rng.gen_index(8)] += 1;
        }

        // Every bucket is reachable
        assert!(hits.iter().all(|&h| h > 0), "{hits:?}");
        assert_eq!(rng.gen_index(1), 0);
    }

    #[test]
    fn test_world_rng_check_probability_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..10_000 {
            assert!(rng.check_probability(1.0));
            assert!(!rng.check_probability(0.0));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut items: Vec<usize> = (0..100).collect();

        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
        assert_ne!(items, sorted);
    }

    #[test]
    fn test_shuffle_short_slices() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut empty: Vec<usize> = Vec::new();
        rng.shuffle(&mut empty);
        let mut one = vec![5];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![5]);
    }

    #[test]
    fn test_world_rng_deterministic() {
        let mut rng1 = Xoshiro256StarStar::seed_from_u64(42);
        let mut rng2 = Xoshiro256StarStar::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_bool(), rng2.gen_bool());
            assert_eq!(rng1.gen_f32(), rng2.gen_f32());
        }

        let mut a: Vec<usize> = (0..32).collect();
        let mut b = a.clone();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);
        assert_eq!(a, b);
    }
}
