//! Coordination-number, neighbor-state and family-size distributions.

use std::collections::BTreeMap;

use crate::cells::Cell;
use crate::math::diversity::{DiversityKind, DiversityRec, StateRec, compute_diversity, ranked_states};
use crate::spatial::NeighborLists;

/// Coordination numbers 0..=8 get their own bucket; the last holds 9 or more.
pub const NUM_COORDINATION_BUCKETS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct SpatialDistributions {
    pub coordination: Vec<StateRec>,
    /// Per cell and per distinct neighboring state, how many neighbors carry it.
    pub neighbor: Vec<StateRec>,
    /// Cells per family size (same-state neighbors plus the cell itself).
    pub family: Vec<StateRec>,
    pub max_coordination: usize,
}

impl SpatialDistributions {
    /// Upper bound on distinct coordination numbers, zero included.
    pub fn max_num_states(&self) -> usize {
        self.max_coordination + 1
    }
}

pub fn spatial_distributions(cells: &[Cell], neighbors: &NeighborLists) -> SpatialDistributions {
    let mut coordination: BTreeMap<usize, f64> = BTreeMap::new();
    let mut neighbor: BTreeMap<usize, f64> = BTreeMap::new();
    let mut family: BTreeMap<usize, f64> = BTreeMap::new();
    let mut max_coordination = 0usize;

    for (idx, cell) in cells.iter().enumerate() {
        let adjacent = &neighbors[idx];
        max_coordination = max_coordination.max(adjacent.len());
        *coordination.entry(adjacent.len()).or_default() += 1.0;

        let mut by_state: BTreeMap<&str, usize> = BTreeMap::new();
        for &j in adjacent {
            *by_state.entry(cells[j].marker_states.as_str()).or_default() += 1;
        }
        for &count in by_state.values() {
            *neighbor.entry(count).or_default() += 1.0;
        }

        let same_state = by_state
            .get(cell.marker_states.as_str())
            .copied()
            .unwrap_or(0);
        *family.entry(same_state + 1).or_default() += 1.0;
    }

    SpatialDistributions {
        coordination: ranked_states(&coordination),
        neighbor: ranked_states(&neighbor),
        family: ranked_states(&family),
        max_coordination,
    }
}

pub fn spatial_diversity(dist: &SpatialDistributions) -> [DiversityRec; 3] {
    let max = dist.max_num_states();
    [
        compute_diversity(DiversityKind::CellCoordinationNumber, &dist.coordination, max),
        compute_diversity(DiversityKind::CellNeighbor, &dist.neighbor, max),
        compute_diversity(DiversityKind::CellFamily, &dist.family, max),
    ]
}

pub fn coordination_frequencies(coordination: &[StateRec]) -> Vec<f64> {
    let mut buckets = vec![0.0; NUM_COORDINATION_BUCKETS];
    let mut total = 0.0;
    for state in coordination {
        let bucket = state.rank.min(NUM_COORDINATION_BUCKETS - 1);
        buckets[bucket] += state.count;
        total += state.count;
    }
    if total > 0.0 {
        for value in &mut buckets {
            *value /= total;
        }
    }
    buckets
}
