//! Expected family-size distribution when molecular states are placed at
//! random over the observed cell locations.

use crate::math::diversity::{DiversityKind, DiversityRec, StateRec, compute_diversity};

/// `ln C(n, k)`; negative infinity when `k > n`.
pub fn ln_binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    (0..k)
        .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
        .sum()
}

/// `p * C(z, k) * p^k * (1 - p)^(z - k)`, evaluated in log space.
fn family_term(p: f64, z: usize, k: usize, ln_c: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return if k == z { p } else { 0.0 };
    }
    let ln_term = ln_c + (k + 1) as f64 * p.ln() + (z - k) as f64 * (1.0 - p).ln();
    ln_term.exp()
}

/// Probability that a cell with `z` neighbors has exactly `k` neighbors in its
/// own state, each neighbor's state drawn independently from `frequencies`.
pub fn family_probability(frequencies: &[f64], z: usize, k: usize) -> f64 {
    if k > z {
        return 0.0;
    }
    let ln_c = ln_binomial(z, k);
    frequencies
        .iter()
        .map(|&p| family_term(p, z, k, ln_c))
        .sum()
}

/// Expected weight of each same-state neighbor count `k` in `0..=max z`,
/// summed over the coordination-number distribution.
///
/// `coordination` is rank-keyed: `rank` is the coordination number and
/// `count` the number of cells having it.
pub fn family_size_probabilities(frequencies: &[f64], coordination: &[StateRec]) -> Vec<StateRec> {
    let max_z = coordination.iter().map(|s| s.rank).max().unwrap_or(0);
    (0..=max_z)
        .map(|k| {
            let weight: f64 = coordination
                .iter()
                .filter(|s| s.count > 0.0)
                .map(|s| s.count * family_probability(frequencies, s.rank, k))
                .sum();
            StateRec::ranked(k, weight)
        })
        .collect()
}

pub fn randomized_family_diversity(frequencies: &[f64], coordination: &[StateRec]) -> DiversityRec {
    let states = family_size_probabilities(frequencies, coordination);
    let max_num_states = states.len().max(1);
    compute_diversity(
        DiversityKind::RandomizeOverLocationsCellFamily,
        &states,
        max_num_states,
    )
}
