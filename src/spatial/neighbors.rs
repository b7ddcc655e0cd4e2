//! Neighbor relation between cells of the same slide and position.
//!
//! Two cells touch when the distance between their centers, scaled by the sum
//! of their radii, stays within the critical distance factor.

use std::collections::BTreeMap;

use crate::cells::Cell;

/// Indices of each cell's neighbors, aligned with the input slice.
pub type NeighborLists = Vec<Vec<usize>>;

/// `sqr_cdf` is the squared critical distance factor.
///
/// Cells without geometry or with zero combined radius never touch.
pub fn are_neighbors(a: &Cell, b: &Cell, sqr_cdf: f64) -> bool {
    if a.slide_id != b.slide_id || a.position_id != b.position_id {
        return false;
    }
    let (Some(ga), Some(gb)) = (a.geometry, b.geometry) else {
        return false;
    };
    let dr = ga.radius + gb.radius;
    if dr <= 0.0 {
        return false;
    }
    let dx = ga.x - gb.x;
    let dy = ga.y - gb.y;
    (dx * dx + dy * dy) / (dr * dr) <= sqr_cdf
}

/// Symmetric neighbor lists. Cells are only compared within their own
/// (slide, position) group.
pub fn neighbor_lists(cells: &[Cell], sqr_cdf: f64) -> NeighborLists {
    let mut groups: BTreeMap<(&str, &str), Vec<usize>> = BTreeMap::new();
    for (idx, cell) in cells.iter().enumerate() {
        groups
            .entry((cell.slide_id.as_str(), cell.position_id.as_str()))
            .or_default()
            .push(idx);
    }

    let mut lists: NeighborLists = vec![Vec::new(); cells.len()];
    for members in groups.values() {
        for (pos, &i) in members.iter().enumerate() {
            for &j in &members[pos + 1..] {
                if are_neighbors(&cells[i], &cells[j], sqr_cdf) {
                    lists[i].push(j);
                    lists[j].push(i);
                }
            }
        }
    }
    for list in &mut lists {
        list.sort_unstable();
    }
    lists
}
