/// Category selection for a single task
///
/// Selection is two pure steps: clamp how many categories to draw, then draw
/// that many distinct ones.

use crate::seed::random::RandomSource;
use std::collections::BTreeSet;

/// Never request more distinct items than exist
pub fn clamp_selection_count(requested: usize, available: usize) -> usize {
    requested.min(available)
}

/// Draws `k` elements uniformly without replacement
///
/// `k` is clamped to the pool size. Uses a partial Fisher-Yates shuffle over
/// indices, consuming exactly `k` random values. The pool is expected to hold
/// distinct values; duplicates in the pool collapse in the returned set.
pub fn sample_without_replacement<T, R>(pool: &[T], k: usize, rng: &mut R) -> BTreeSet<T>
where
    T: Ord + Clone,
    R: RandomSource + ?Sized,
{
    let k = clamp_selection_count(k, pool.len());
    let mut indices: Vec<usize> = (0..pool.len()).collect();

    for i in 0..k {
        let j = rng.next_in_range(i, pool.len() - 1);
        indices.swap(i, j);
    }

    indices[..k].iter().map(|&i| pool[i].clone()).collect()
}

/// Picks the categories for one unassociated task
///
/// Draws a count uniformly from `1..=max_per_task`, clamps it to the pool
/// size, then samples that many distinct ids. An empty pool yields an empty
/// set without consuming randomness.
pub fn choose_categories<R>(pool: &[i64], max_per_task: usize, rng: &mut R) -> BTreeSet<i64>
where
    R: RandomSource + ?Sized,
{
    if pool.is_empty() || max_per_task == 0 {
        return BTreeSet::new();
    }

    let requested = rng.next_in_range(1, max_per_task);
    let k = clamp_selection_count(requested, pool.len());
    sample_without_replacement(pool, k, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::random::{RngSource, ScriptedSource};

    #[test]
    fn test_clamp_selection_count() {
        assert_eq!(clamp_selection_count(3, 4), 3);
        assert_eq!(clamp_selection_count(3, 1), 1);
        assert_eq!(clamp_selection_count(2, 0), 0);
        assert_eq!(clamp_selection_count(0, 5), 0);
    }

    #[test]
    fn test_sample_returns_k_distinct_members() {
        let pool = [10, 20, 30, 40];
        let mut rng = RngSource::seeded(3);

        for k in 0..=4 {
            let drawn = sample_without_replacement(&pool, k, &mut rng);
            assert_eq!(drawn.len(), k);
            assert!(drawn.iter().all(|id| pool.contains(id)));
        }
    }

    #[test]
    fn test_sample_clamps_to_pool() {
        let pool = [1, 2];
        let mut rng = RngSource::seeded(8);
        let drawn = sample_without_replacement(&pool, 10, &mut rng);
        assert_eq!(drawn, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_sample_empty_pool() {
        let pool: [i64; 0] = [];
        let mut rng = ScriptedSource::default();
        assert!(sample_without_replacement(&pool, 3, &mut rng).is_empty());
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn test_sample_follows_scripted_swaps() {
        // i=0 picks index 0 + 2 = 2, i=1 picks index 1 + 0 = 1
        let pool = ['a', 'b', 'c', 'd'];
        let mut rng = ScriptedSource::new(vec![2, 0]);
        let drawn = sample_without_replacement(&pool, 2, &mut rng);
        assert_eq!(drawn, BTreeSet::from(['c', 'b']));
    }

    #[test]
    fn test_sample_is_roughly_uniform() {
        let pool = [0usize, 1, 2, 3];
        let mut hits = [0usize; 4];
        let mut rng = RngSource::seeded(2024);

        for _ in 0..4000 {
            for item in sample_without_replacement(&pool, 1, &mut rng) {
                hits[item] += 1;
            }
        }

        for count in hits {
            assert!((800..1200).contains(&count), "skewed draw: {:?}", hits);
        }
    }

    #[test]
    fn test_choose_categories_bounds() {
        let pool = [1, 2, 3, 4];
        let mut rng = RngSource::seeded(11);

        for _ in 0..500 {
            let chosen = choose_categories(&pool, 3, &mut rng);
            assert!((1..=3).contains(&chosen.len()));
        }
    }

    #[test]
    fn test_choose_single_category_always_that_one() {
        let mut rng = RngSource::seeded(5);
        for _ in 0..50 {
            assert_eq!(choose_categories(&[7], 3, &mut rng), BTreeSet::from([7]));
        }
    }

    #[test]
    fn test_choose_from_empty_pool() {
        let mut rng = ScriptedSource::new(vec![1]);
        assert!(choose_categories(&[], 3, &mut rng).is_empty());
        assert_eq!(rng.calls(), 0);
    }
}
