use crate::math::diversity::StateRec;

/// Frequency-weighted sum of squared per-marker state differences over every
/// unordered pair of distinct molecular states.
///
/// States are compared character by character; the shorter string bounds the
/// comparison if lengths ever differ.
pub fn molecular_disparity(states: &[StateRec]) -> f64 {
    let mut disparity = 0.0f64;
    for (i, a) in states.iter().enumerate() {
        let a_bytes = a.state_id.as_bytes();
        for b in &states[i + 1..] {
            let sqr_diff: i64 = a_bytes
                .iter()
                .zip(b.state_id.as_bytes())
                .map(|(&x, &y)| {
                    let d = i64::from(y) - i64::from(x);
                    d * d
                })
                .sum();
            disparity += a.frequency * b.frequency * sqr_diff as f64;
        }
    }
    disparity
}
