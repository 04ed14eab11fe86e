/*!
 * Sampling weight calculation.
 *
 * A word's weight controls how likely it is to be drawn into the next
 * practice batch. Fresh words share the maximum weight of 1.0; every
 * attempt shrinks it, and correct answers shrink it further.
 */

/// Weight assigned to a word that has never been practiced, and after a reset
pub const NEUTRAL_WEIGHT: f64 = 1.0;

/// Fraction of attempts answered correctly, 0.0 when never attempted
pub fn success_rate(successes: u32, attempts: u32) -> f64 {
    if attempts > 0 {
        f64::from(successes) / f64::from(attempts)
    } else {
        0.0
    }
}

/// Sampling weight for a word with the given practice counters.
///
/// `weight = 1 / (success_rate + 1) * 1 / (attempts + 1)`, always in `(0, 1]`.
pub fn weight(successes: u32, attempts: u32) -> f64 {
    let rate = success_rate(successes, attempts);
    1.0 / (rate + 1.0) * (1.0 / (f64::from(attempts) + 1.0))
}
