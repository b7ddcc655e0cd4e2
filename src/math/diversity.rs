//! Shannon-Weaver diversity over discrete state distributions.

use std::collections::BTreeMap;

/// Probabilities at or below this contribute nothing to the entropy.
const MIN_PROPORTION: f64 = 1e-30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiversityKind {
    Molecular,
    MolecularDisparity,
    CellFamily,
    CellNeighbor,
    CellSocial,
    RandomizeOverLocationsCellFamily,
    CellCoordinationNumber,
}

impl DiversityKind {
    pub const ALL: [DiversityKind; 7] = [
        DiversityKind::Molecular,
        DiversityKind::MolecularDisparity,
        DiversityKind::CellFamily,
        DiversityKind::CellNeighbor,
        DiversityKind::CellSocial,
        DiversityKind::RandomizeOverLocationsCellFamily,
        DiversityKind::CellCoordinationNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiversityKind::Molecular => "Molecular",
            DiversityKind::MolecularDisparity => "Molecular_Disparity",
            DiversityKind::CellFamily => "CellFamily",
            DiversityKind::CellNeighbor => "CellNeighbor",
            DiversityKind::CellSocial => "CellSocial",
            DiversityKind::RandomizeOverLocationsCellFamily => "RandomizeOverLocations_CellFamily",
            DiversityKind::CellCoordinationNumber => "CellCoordinationNumber",
        }
    }
}

impl std::fmt::Display for DiversityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `count` is fractional for the analytic randomized baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRec {
    pub state_id: String,
    pub rank: usize,
    pub count: f64,
    pub frequency: f64,
}

impl StateRec {
    pub fn named(state_id: impl Into<String>, count: f64) -> Self {
        Self {
            state_id: state_id.into(),
            rank: 0,
            count,
            frequency: 0.0,
        }
    }

    pub fn ranked(rank: usize, count: f64) -> Self {
        Self {
            state_id: String::new(),
            rank,
            count,
            frequency: 0.0,
        }
    }
}

pub fn ranked_states(tally: &BTreeMap<usize, f64>) -> Vec<StateRec> {
    let total: f64 = tally.values().sum();
    tally
        .iter()
        .map(|(&rank, &count)| StateRec {
            state_id: rank.to_string(),
            rank,
            count,
            frequency: if total > 0.0 { count / total } else { 0.0 },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiversityRec {
    pub kind: DiversityKind,
    pub entropy: f64,
    pub num_entities: f64,
    pub num_states: usize,
    pub max_num_states: usize,
    pub heterogeneity: f64,
    pub avg_state_index: f64,
    pub max_state_index: usize,
}

impl DiversityRec {
    pub fn empty(kind: DiversityKind, max_num_states: usize) -> Self {
        Self {
            kind,
            entropy: 0.0,
            num_entities: 0.0,
            num_states: 0,
            max_num_states,
            heterogeneity: 0.0,
            avg_state_index: 0.0,
            max_state_index: 0,
        }
    }
}

/// Entropy `-Σ p ln p` of the positive-count states and its normalisation by
/// `ln(max_num_states)`.
pub fn compute_diversity(
    kind: DiversityKind,
    states: &[StateRec],
    max_num_states: usize,
) -> DiversityRec {
    let mut rec = DiversityRec::empty(kind, max_num_states);
    if states.is_empty() {
        return rec;
    }

    let mut weighted_rank = 0.0;
    for state in states.iter().filter(|s| s.count > 0.0) {
        rec.num_entities += state.count;
        rec.num_states += 1;
        rec.max_state_index = rec.max_state_index.max(state.rank);
        weighted_rank += state.rank as f64 * state.count;
    }
    if rec.num_entities > 0.0 {
        rec.avg_state_index = weighted_rank / rec.num_entities;

        let mut entropy = 0.0;
        for state in states.iter().filter(|s| s.count > 0.0) {
            let p = state.count / rec.num_entities;
            if p > MIN_PROPORTION {
                entropy += p * p.ln();
            }
        }
        rec.entropy = entropy.abs();
    }

    rec.heterogeneity = if max_num_states > 1 {
        rec.entropy / (max_num_states as f64).ln()
    } else {
        0.0
    };
    rec
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiversitySet {
    records: BTreeMap<DiversityKind, DiversityRec>,
}

impl DiversitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rec: DiversityRec) {
        self.records.insert(rec.kind, rec);
    }

    pub fn get(&self, kind: DiversityKind) -> Option<&DiversityRec> {
        self.records.get(&kind)
    }

    pub fn contains(&self, kind: DiversityKind) -> bool {
        self.records.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiversityRec> {
        self.records.values()
    }
}
