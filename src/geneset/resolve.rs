use std::collections::BTreeSet;

use crate::geneset::{GenesetCollection, GenesetDef};
use crate::io::marker_index::MarkerIndexEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGeneset {
    pub name: String,
    /// Positions in the marker-state strings, ascending and distinct.
    pub marker_indices: Vec<usize>,
    pub missing: Vec<String>,
    pub total: usize,
}

impl ResolvedGeneset {
    pub fn is_empty(&self) -> bool {
        self.marker_indices.is_empty()
    }
}

pub fn resolve_collection(
    mut collection: GenesetCollection,
    markers: &[MarkerIndexEntry],
) -> GenesetCollection {
    collection.resolved = collection
        .defs
        .iter()
        .map(|def| resolve_def(def, markers))
        .collect();
    collection
}

fn resolve_def(def: &GenesetDef, markers: &[MarkerIndexEntry]) -> ResolvedGeneset {
    let mut indices = BTreeSet::new();
    let mut missing = Vec::new();

    for target in &def.targets {
        let mut found = false;
        for marker in markers {
            if marker.targets.iter().any(|t| t.eq_ignore_ascii_case(target)) {
                indices.insert(marker.index);
                found = true;
            }
        }
        if !found {
            missing.push(target.clone());
        }
    }

    ResolvedGeneset {
        name: def.name.clone(),
        marker_indices: indices.into_iter().collect(),
        missing,
        total: def.targets.len(),
    }
}
