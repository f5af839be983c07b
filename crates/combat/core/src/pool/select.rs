//! Cumulative-weight selection.

use crate::error::PoolError;
use crate::rng::RandomSource;

/// Sum of all candidate weights.
pub fn total_weight<T>(candidates: &[(T, u64)]) -> u64 {
    candidates
        .iter()
        .fold(0u64, |total, (_, weight)| total.saturating_add(*weight))
}

/// Draws `count` independent identities from `candidates`.
///
/// Each draw samples uniformly in `[0, total)` and binary-searches the prefix
/// sums for the owning entry, so an entry's chance is its share of the total
/// weight. Zero-weight entries are never drawn.
///
/// # Errors
///
/// [`PoolError::Empty`] when there are no candidates or the total weight is 0,
/// even if `count` is 0.
pub fn draw_weighted<T: Clone>(
    candidates: &[(T, u64)],
    count: usize,
    rng: &mut (impl RandomSource + ?Sized),
) -> Result<Vec<T>, PoolError> {
    let mut prefix = Vec::with_capacity(candidates.len());
    let mut total = 0u64;
    for (_, weight) in candidates {
        total = total.saturating_add(*weight);
        prefix.push(total);
    }
    if total == 0 {
        return Err(PoolError::Empty);
    }

    Ok((0..count)
        .map(|_| {
            let sample = rng.below(total);
            let index = prefix.partition_point(|&upper| upper <= sample);
            candidates[index].0.clone()
        })
        .collect())
}
