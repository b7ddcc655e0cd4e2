use std::collections::BTreeMap;

use crate::cells::Cell;
use crate::math::disparity::molecular_disparity;
use crate::math::diversity::{DiversityKind, DiversityRec, StateRec, compute_diversity};

/// Ties keep lexicographic state order, so ranks are reproducible.
pub fn molecular_states(cells: &[Cell]) -> Vec<StateRec> {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for cell in cells {
        *tally.entry(cell.marker_states.as_str()).or_default() += 1;
    }

    let mut states: Vec<StateRec> = tally
        .into_iter()
        .map(|(state, count)| StateRec::named(state, count as f64))
        .collect();
    states.sort_by(|a, b| b.count.total_cmp(&a.count));

    let num_cells = cells.len() as f64;
    for (idx, state) in states.iter_mut().enumerate() {
        state.rank = idx + 1;
        state.frequency = if num_cells > 0.0 {
            state.count / num_cells
        } else {
            0.0
        };
    }
    states
}

/// Molecular diversity plus the disparity record, which carries its value in
/// `avg_state_index`.
pub fn molecular_diversity(
    states: &[StateRec],
    max_num_states: usize,
) -> (DiversityRec, DiversityRec) {
    let diversity = compute_diversity(DiversityKind::Molecular, states, max_num_states);
    let mut disparity = DiversityRec::empty(DiversityKind::MolecularDisparity, max_num_states);
    disparity.avg_state_index = molecular_disparity(states);
    (diversity, disparity)
}
