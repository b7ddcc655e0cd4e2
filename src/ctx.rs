use std::path::{Path, PathBuf};

use crate::cells::{CellTable, EncodedCell};
use crate::config::MohaConfig;
use crate::geneset::GenesetCollection;
use crate::math::threshold::Threshold;
use crate::schema::v1::{MohaReportV1, RunParameters};
use crate::scores::SampleMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Thresholds,
    CellStates,
    Heterogeneity,
    GenesetHeterogeneity,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Thresholds => "thresholds",
            Task::CellStates => "cell-states",
            Task::Heterogeneity => "heterogeneity",
            Task::GenesetHeterogeneity => "geneset-heterogeneity",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputPaths {
    /// Study file or a single cell-measurement file.
    pub measures: Option<PathBuf>,
    pub thresholds: Option<PathBuf>,
    pub cell_states: Option<PathBuf>,
    pub marker_index: Option<PathBuf>,
    pub genesets: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub thresholds: Option<PathBuf>,
    pub cell_states: Option<PathBuf>,
    pub marker_index: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// `<input>.<suffix>` next to the input, with a trailing `.gz` and one of
/// `.txt`, `.csv`, `.tsv` dropped first.
pub fn derived_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.to_string_lossy().to_string();
    if let Some(stripped) = name.strip_suffix(".gz") {
        name = stripped.to_string();
    }
    for ext in [".txt", ".csv", ".tsv"] {
        if let Some(stripped) = name.strip_suffix(ext) {
            name = stripped.to_string();
            break;
        }
    }
    PathBuf::from(format!("{}.{}", name, suffix))
}

/// Marker set under which heterogeneity is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MohaContext {
    pub label: String,
    /// Positions to keep from each marker-state string; `None` keeps all.
    pub marker_indices: Option<Vec<usize>>,
}

#[derive(Debug)]
pub struct Ctx {
    pub task: Task,
    pub config: MohaConfig,
    pub input: InputPaths,
    pub output: OutputPaths,
    pub append: bool,
    pub sample_id: Option<String>,
    pub context_name: Option<String>,
    pub warnings: Vec<String>,
    pub measure_files: Vec<PathBuf>,
    pub measure_headers: Vec<String>,
    pub num_cell_measures: usize,
    pub thresholds: Vec<Threshold>,
    pub encoded_cells: Vec<EncodedCell>,
    pub cell_table: Option<CellTable>,
    pub genesets: Option<GenesetCollection>,
    pub contexts: Vec<MohaContext>,
    pub results: Vec<SampleMetrics>,
    pub rows_written: usize,
    pub report: MohaReportV1,
}

impl Ctx {
    pub fn new(
        task: Task,
        config: MohaConfig,
        input: InputPaths,
        output: OutputPaths,
        append: bool,
        tool_version: &str,
    ) -> Self {
        let parameters = RunParameters {
            command: task.as_str().to_string(),
            n_state_model: config.n_state_model,
            critical_distance_factor: config.critical_distance_factor,
            max_num_cell_states: config.max_num_cell_states,
            max_num_cells: config.max_num_cells,
            append,
        };
        Self {
            task,
            config,
            input,
            output,
            append,
            sample_id: None,
            context_name: None,
            warnings: Vec::new(),
            measure_files: Vec::new(),
            measure_headers: Vec::new(),
            num_cell_measures: 0,
            thresholds: Vec::new(),
            encoded_cells: Vec::new(),
            cell_table: None,
            genesets: None,
            contexts: Vec::new(),
            results: Vec::new(),
            rows_written: 0,
            report: MohaReportV1::empty(tool_version, parameters),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}
