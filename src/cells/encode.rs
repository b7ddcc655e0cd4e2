use anyhow::{Result, bail};

use crate::config::UNKNOWN_STATE;
use crate::math::threshold::Threshold;

/// Parses a raw measurement; missing, unparsable and non-finite values yield `None`.
pub fn parse_measure(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('"', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Concatenates one state character per threshold, in threshold order.
///
/// `values[i]` is the raw measurement for `thresholds[i]`, `None` when the
/// column is absent from the source file.
pub fn encode_marker_states(values: &[Option<&str>], thresholds: &[Threshold]) -> String {
    thresholds
        .iter()
        .enumerate()
        .map(|(i, threshold)| {
            values
                .get(i)
                .copied()
                .flatten()
                .and_then(parse_measure)
                .map(|v| threshold.model.state_char(v))
                .unwrap_or(UNKNOWN_STATE)
        })
        .collect()
}

pub fn has_unknown_state(states: &str) -> bool {
    states.chars().any(|c| c.eq_ignore_ascii_case(&UNKNOWN_STATE))
}

/// Keeps only the characters at `indices`, in that order.
///
/// Returns `Ok(None)` when the projection contains an unknown state.
pub fn project_states(states: &str, indices: &[usize]) -> Result<Option<String>> {
    let chars: Vec<char> = states.chars().collect();
    let mut projected = String::with_capacity(indices.len());
    for &idx in indices {
        match chars.get(idx) {
            Some(&c) => projected.push(c),
            None => bail!(
                "marker index {} out of range for marker states '{}' ({} markers)",
                idx,
                states,
                chars.len()
            ),
        }
    }
    if has_unknown_state(&projected) {
        return Ok(None);
    }
    Ok(Some(projected))
}
