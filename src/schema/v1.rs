use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParameters {
    pub command: String,
    pub n_state_model: usize,
    pub critical_distance_factor: f64,
    pub max_num_cell_states: Option<usize>,
    pub max_num_cells: usize,
    pub append: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiversityEntry {
    pub entropy: f64,
    pub heterogeneity: f64,
    pub num_entities: f64,
    pub num_states: usize,
    pub max_num_states: usize,
    pub avg_state_index: f64,
    pub max_state_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResult {
    pub sample_id: String,
    pub context: String,
    pub num_cells: usize,
    pub max_num_states: usize,
    /// Fraction of cells with 0..=8 neighbors, then 9 or more.
    pub coordination_frequencies: Option<Vec<f64>>,
    /// Keyed by diversity kind, e.g. `Molecular`, `CellSocial`.
    pub diversity: BTreeMap<String, DiversityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesetCoverage {
    pub geneset: String,
    pub found: u64,
    pub total: u64,
    pub fraction: f64,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MohaReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub parameters: RunParameters,
    pub results: Vec<SampleResult>,
    pub geneset_coverage: Vec<GenesetCoverage>,
}

impl MohaReportV1 {
    pub fn empty(tool_version: &str, parameters: RunParameters) -> Self {
        Self {
            tool: "kira-moha".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            parameters,
            results: Vec::new(),
            geneset_coverage: Vec::new(),
        }
    }
}
