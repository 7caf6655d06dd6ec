//! Round-robin pairing of registered strategies
//!
//! Every unordered pair of distinct entries is played exactly once. Match
//! indices are dense, so a match can be looked up or seeded on its own
//! without building the whole schedule.

/// Number of unordered pairs among `n` entries: `C(n,2)`
pub fn pair_count(n: u32) -> u64 {
    triangle(u64::from(n)) as u64
}

/// The pair played by match `match_index`, in O(1) memory
///
/// Pairs come in colexicographic order: (0,1), (0,2), (1,2), (0,3), ...
pub fn pair_for_match(n: u32, match_index: u64) -> Option<(u32, u32)> {
    if match_index >= pair_count(n) {
        return None;
    }
    Some(unrank_pair(match_index))
}

/// All pairs in match-index order, each as (a, b) with a < b
pub fn round_robin_pairs(n: u32) -> Vec<(u32, u32)> {
    (0..pair_count(n)).map(unrank_pair).collect()
}

/// `C(b,2)`, widened so it cannot overflow for any `u32` entry count
fn triangle(b: u64) -> u128 {
    let b = u128::from(b);
    b * b.saturating_sub(1) / 2
}

/// Colexicographic combination unranking: rank → (a, b) with a < b.
///
/// rank = C(b,2) + a = b*(b−1)/2 + a
fn unrank_pair(rank: u64) -> (u32, u32) {
    // Estimate b via integer floor(sqrt(1 + 8·rank))
    let val = 1u128 + 8 * u128::from(rank);
    let mut s = val;
    let mut t = (s + 1) / 2;
    while t < s {
        s = t;
        t = (s + val / s) / 2;
    }
    // s = floor(sqrt(val))
    let mut b = ((1 + s) / 2) as u64;

    // Correct estimate
    let rank_wide = u128::from(rank);
    while b > 0 && triangle(b) > rank_wide {
        b -= 1;
    }
    while triangle(b + 1) <= rank_wide {
        b += 1;
    }

    let a = rank_wide - triangle(b);
    (a as u32, b as u32)
}
