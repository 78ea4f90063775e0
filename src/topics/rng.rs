use rand::Rng;

/// Source of the selector's random decisions. Injected so tests can pin
/// every branch with a seed.
pub trait RandomSource: Send {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Thread-local OS-seeded generator used for real runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        rand::rng().random_bool(probability.clamp(0.0, 1.0))
    }
}

/// SplitMix64, reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let len = len as u64;
        usize::try_from(self.next_u64() % len).unwrap_or(0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn chance(&mut self, probability: f64) -> bool {
        // 53 high bits -> uniform f64 in [0, 1).
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        unit < probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRandom::new(1);
        let mut b = SeededRandom::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn next_index_stays_in_bounds() {
        let mut rng = SeededRandom::new(7);
        for len in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_index(len) < len);
            }
        }
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SeededRandom::new(99);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn chance_half_hits_both_branches() {
        let mut rng = SeededRandom::new(3);
        let hits = (0..1_000).filter(|_| rng.chance(0.5)).count();
        assert!((350..=650).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn thread_random_stays_in_bounds() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            assert!(rng.next_index(3) < 3);
        }
    }
}
