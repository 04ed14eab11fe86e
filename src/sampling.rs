/*!
 * Weighted sampling without replacement.
 *
 * Each round picks one candidate with probability proportional to its weight
 * among the candidates still in the pool, then removes it from the pool.
 * The loop runs exactly `min(n, weights.len())` rounds.
 */

use rand::Rng;

/// Draw up to `n` distinct indices into `weights`.
///
/// Non-finite and negative weights are treated as zero. When every remaining
/// weight is zero the pick is uniform among the remaining candidates.
pub fn weighted_sample_without_replacement<R: Rng>(
    weights: &[f64],
    n: usize,
    rng: &mut R,
) -> Vec<usize> {
    let target = n.min(weights.len());
    let mut pool: Vec<(usize, f64)> = weights
        .iter()
        .enumerate()
        .map(|(index, &w)| (index, sanitize(w)))
        .collect();
    let mut total: f64 = pool.iter().map(|(_, w)| w).sum();
    let mut positive = pool.iter().filter(|(_, w)| *w > 0.0).count();
    let mut picked = Vec::with_capacity(target);

    while picked.len() < target {
        let position = if positive > 0 && total > 0.0 && total.is_finite() {
            pick_weighted(&pool, total, rng)
        } else {
            rng.random_range(0..pool.len())
        };

        let (index, w) = pool.swap_remove(position);
        picked.push(index);

        if w > 0.0 {
            positive -= 1;
        }
        // The running sum is only an approximation once weights have been subtracted
        total = if positive == 0 { 0.0 } else { total - w };
        if positive > 0 && total <= f64::EPSILON {
            total = pool.iter().map(|(_, w)| w).sum();
        }
    }

    picked
}

/// Position in `pool` selected by a cumulative-weight walk
fn pick_weighted<R: Rng>(pool: &[(usize, f64)], total: f64, rng: &mut R) -> usize {
    let target = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;

    for (position, &(_, w)) in pool.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = position;
        if target < cumulative {
            return position;
        }
    }

    // Rounding left the target just past the final bucket
    last_positive
}

fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}
