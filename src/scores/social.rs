//! Cell-social clusters: connected groups of same-state cells that touch.

use std::collections::BTreeMap;

use crate::cells::Cell;
use crate::math::diversity::{DiversityKind, DiversityRec, compute_diversity, ranked_states};
use crate::spatial::NeighborLists;

/// Union-find over `0..len` with path compression and union by size.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Returns false when `a` and `b` were already in one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }

    pub fn set_sizes(&mut self) -> Vec<usize> {
        let len = self.parent.len();
        let roots: Vec<usize> = (0..len).filter(|&i| self.find(i) == i).collect();
        roots.into_iter().map(|root| self.size[root]).collect()
    }
}

pub fn cluster_sizes(members: &[usize], neighbors: &NeighborLists) -> Vec<usize> {
    let local: BTreeMap<usize, usize> = members
        .iter()
        .enumerate()
        .map(|(pos, &idx)| (idx, pos))
        .collect();

    let mut sets = DisjointSet::new(members.len());
    for (pos, &idx) in members.iter().enumerate() {
        for adjacent in &neighbors[idx] {
            if let Some(&other) = local.get(adjacent) {
                sets.union(pos, other);
            }
        }
    }

    let sizes = sets.set_sizes();
    assert_eq!(
        sizes.iter().sum::<usize>(),
        members.len(),
        "social clusters do not partition their cells"
    );
    sizes
}

/// Number of cluster sizes cells can be split into (triangular-number inverse).
pub fn max_social_states(num_cells: usize) -> usize {
    if num_cells <= 1 {
        return 1;
    }
    let n = num_cells as f64;
    (((8.0 * n + 1.0).sqrt() - 1.0) / 2.0).floor() as usize
}

pub fn social_cluster_tally(cells: &[Cell], neighbors: &NeighborLists) -> BTreeMap<usize, f64> {
    let mut by_state: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, cell) in cells.iter().enumerate() {
        by_state
            .entry(cell.marker_states.as_str())
            .or_default()
            .push(idx);
    }

    let mut tally: BTreeMap<usize, f64> = BTreeMap::new();
    for members in by_state.values() {
        for size in cluster_sizes(members, neighbors) {
            *tally.entry(size).or_default() += 1.0;
        }
    }
    tally
}

pub fn cell_social_diversity(cells: &[Cell], neighbors: &NeighborLists) -> DiversityRec {
    let tally = social_cluster_tally(cells, neighbors);
    compute_diversity(
        DiversityKind::CellSocial,
        &ranked_states(&tally),
        max_social_states(cells.len()),
    )
}
