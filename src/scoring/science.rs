//! Science scoring.
//!
//! A set of symbol counts scores `7 × min + Σ count²`. Wildcards ("jolly"
//! symbols) are each assigned to whichever symbol maximises that formula;
//! the search walks every split of the wildcards into three counts, which
//! is `O(j²)` and exact for any number of wildcards.

/// Score of fixed symbol counts.
///
/// ```
/// use rust_wonders::scoring::science::base_score;
///
/// assert_eq!(base_score([2, 2, 2]), 26);
/// assert_eq!(base_score([3, 0, 0]), 9);
/// ```
#[must_use]
pub fn base_score(counts: [u32; 3]) -> u32 {
    let min = counts.iter().copied().min().unwrap_or(0);
    7 * min + counts.iter().map(|c| c * c).sum::<u32>()
}

/// Best score for fixed `counts` plus `jolly` wildcards.
///
/// With no fixed symbol at all the wildcards are stacked on one symbol and
/// score `jolly²`.
///
/// ```
/// use rust_wonders::scoring::science::best_score;
///
/// assert_eq!(best_score([1, 1, 0], 1), 10);
/// assert_eq!(best_score([0, 0, 0], 3), 9);
/// ```
#[must_use]
pub fn best_score(counts: [u32; 3], jolly: u32) -> u32 {
    if counts.iter().all(|&c| c == 0) {
        return jolly * jolly;
    }

    let mut best = 0;
    for a in 0..=jolly {
        for b in 0..=(jolly - a) {
            let c = jolly - a - b;
            let split = [counts[0] + a, counts[1] + b, counts[2] + c];
            best = best.max(base_score(split));
        }
    }
    best
}
