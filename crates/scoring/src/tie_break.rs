use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the one deliberately random decision in scoring: a coin flip
/// between contenders that are tied on every measurable criterion.
pub trait TieBreaker {
    /// Pick one of `n` contenders, returning its index in `0..n`.
    fn pick_one(&mut self, n: usize) -> usize;

    fn flip(&mut self) -> bool {
        self.pick_one(2) == 0
    }
}

/// Orders `n` tied contenders by repeated picks: the first pick takes first place,
/// the next pick among the rest takes second, and so on.
pub fn draw_order(tie_breaker: &mut dyn TieBreaker, n: usize) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut order = Vec::with_capacity(n);

    while remaining.len() > 1 {
        let pick = tie_breaker.pick_one(remaining.len()).min(remaining.len() - 1);
        order.push(remaining.remove(pick));
    }
    order.extend(remaining);

    order
}

/// Production tie-breaker backed by a real random number generator.
pub struct RandomTieBreaker<R: Rng = StdRng> {
    rng: R,
}

impl RandomTieBreaker<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomTieBreaker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TieBreaker for RandomTieBreaker<R> {
    fn pick_one(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }
}

/// Replays a fixed sequence of picks, then keeps picking the first contender.
#[derive(Debug, Default, Clone)]
pub struct FixedTieBreaker {
    picks: VecDeque<usize>,
    calls: usize,
}

impl FixedTieBreaker {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            calls: 0,
        }
    }

    pub fn always_first() -> Self {
        Self::default()
    }

    /// Number of times a pick was requested.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl TieBreaker for FixedTieBreaker {
    fn pick_one(&mut self, n: usize) -> usize {
        self.calls += 1;
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(n.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_tie_breaker_is_deterministic() {
        let mut a = RandomTieBreaker::seeded(42);
        let mut b = RandomTieBreaker::seeded(42);
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick_one(5)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick_one(5)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|&p| p < 5));
    }

    #[test]
    fn test_fixed_tie_breaker_replays_then_defaults() {
        let mut fixed = FixedTieBreaker::new([1, 7]);
        assert_eq!(fixed.pick_one(3), 1);
        assert_eq!(fixed.pick_one(3), 2);
        assert_eq!(fixed.pick_one(3), 0);
        assert_eq!(fixed.calls(), 3);
        assert!(!FixedTieBreaker::new([1]).flip());
        assert!(FixedTieBreaker::always_first().flip());
    }

    #[test]
    fn test_draw_order_is_a_permutation() {
        let mut fixed = FixedTieBreaker::new([2, 0]);
        assert_eq!(draw_order(&mut fixed, 3), vec![2, 0, 1]);

        let mut random = RandomTieBreaker::seeded(7);
        let mut order = draw_order(&mut random, 6);
        order.sort();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }
}
