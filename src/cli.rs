use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    ColumnNames, DEFAULT_BIOMARKER_COL_TAG, DEFAULT_CELL_AREA, DEFAULT_CRITICAL_DISTANCE_FACTOR,
    DEFAULT_MAX_NUM_CELLS, DEFAULT_N_STATE_MODEL, MohaConfig,
};

#[derive(Debug, Parser)]
#[command(
    name = "kira-moha",
    version,
    about = "Multi-omics heterogeneity analysis of spatial single-cell biomarker data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive n-state thresholds for every biomarker column.
    Thresholds(ThresholdsArgs),
    /// Encode cells into marker-state strings using a threshold table.
    CellStates(CellStatesArgs),
    /// Compute MOHA metrics for one marker-state file.
    Heterogeneity(HeterogeneityArgs),
    /// Compute MOHA metrics per sample for every gene set.
    GenesetHeterogeneity(GenesetHeterogeneityArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    #[arg(long, default_value_t = DEFAULT_N_STATE_MODEL, help = "Number of marker states (2-10)")]
    pub n_state_model: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_NUM_CELLS, help = "Memory cap on cells per run")]
    pub max_num_cells: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ColumnArgs {
    #[arg(long, default_value = "SAMPLE_ID")]
    pub col_sample_id: String,

    #[arg(long, default_value = "DATA_FILENAME")]
    pub col_data_filename: String,

    #[arg(long, default_value = "Slide_ID")]
    pub col_slide_id: String,

    #[arg(long, default_value = "Position_ID")]
    pub col_position_id: String,

    #[arg(long, default_value = "Cell_ID")]
    pub col_cell_id: String,

    #[arg(long, default_value = "Cell_Center_X")]
    pub col_center_x: String,

    #[arg(long, default_value = "Cell_Center_Y")]
    pub col_center_y: String,

    #[arg(long, default_value = "Cell_Area")]
    pub col_area: String,

    #[arg(long, default_value = "Cell_Radius")]
    pub col_radius: String,

    #[arg(long, default_value = "Marker_States")]
    pub col_marker_states: String,
}

impl ColumnArgs {
    pub fn to_columns(&self) -> ColumnNames {
        ColumnNames {
            sample_id: self.col_sample_id.clone(),
            data_filename: self.col_data_filename.clone(),
            slide_id: self.col_slide_id.clone(),
            position_id: self.col_position_id.clone(),
            cell_id: self.col_cell_id.clone(),
            center_x: self.col_center_x.clone(),
            center_y: self.col_center_y.clone(),
            area: self.col_area.clone(),
            radius: self.col_radius.clone(),
            marker_states: self.col_marker_states.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct MetricArgs {
    #[arg(long = "cdf", default_value_t = DEFAULT_CRITICAL_DISTANCE_FACTOR, help = "Critical distance factor")]
    pub critical_distance_factor: f64,

    #[arg(long, help = "Override n_state_model ^ markers as the molecular state bound")]
    pub max_num_cell_states: Option<usize>,

    #[arg(long, default_value = "moha_output", help = "Metrics report (TSV)")]
    pub out: PathBuf,

    #[arg(long, help = "Directory prepended to --out")]
    pub out_dir: Option<PathBuf>,

    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        help = "Append rows to an existing report (true/false)"
    )]
    pub append: bool,

    #[arg(long, help = "Also write a JSON report to this path")]
    pub json: Option<PathBuf>,
}

impl MetricArgs {
    pub fn report_path(&self) -> PathBuf {
        match &self.out_dir {
            Some(dir) => dir.join(&self.out),
            None => self.out.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ThresholdsArgs {
    #[arg(long, help = "Study file or cell measurement file")]
    pub input: PathBuf,

    #[arg(long, help = "Threshold table (default: <input>.thresholds.txt)")]
    pub out: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_BIOMARKER_COL_TAG, help = "Location and metric tag of biomarker columns")]
    pub biomarker_tag: String,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

#[derive(Debug, Args)]
pub struct CellStatesArgs {
    #[arg(long, help = "Study file or cell measurement file")]
    pub input: PathBuf,

    #[arg(long, help = "Threshold table (default: <input>.thresholds.txt)")]
    pub thresholds: Option<PathBuf>,

    #[arg(long, help = "Marker-state output (default: <input>.MarkerStates.txt)")]
    pub cms: Option<PathBuf>,

    #[arg(long, help = "Marker-index output (default: <input>.MarkerIndex.txt)")]
    pub mi: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_CELL_AREA, help = "Area written when the input has no area column")]
    pub default_cell_area: f64,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

#[derive(Debug, Args)]
pub struct HeterogeneityArgs {
    #[arg(long, help = "Cell marker-state file")]
    pub input: PathBuf,

    #[arg(long, help = "Sample ID for the report (default: file name)")]
    pub sample_id: Option<String>,

    #[arg(long, help = "Context label for the report (default: file name)")]
    pub context: Option<String>,

    #[command(flatten)]
    pub metrics: MetricArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

#[derive(Debug, Args)]
pub struct GenesetHeterogeneityArgs {
    #[arg(long, help = "Gene-set file (markerSetName, markers)")]
    pub genesets: PathBuf,

    #[arg(long, help = "Cell marker-state file")]
    pub cms: PathBuf,

    #[arg(long, help = "Marker-index file")]
    pub mi: PathBuf,

    #[command(flatten)]
    pub metrics: MetricArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Configuration from the shared argument groups.
pub fn build_config(model: &ModelArgs, columns: &ColumnArgs) -> MohaConfig {
    MohaConfig {
        n_state_model: model.n_state_model,
        max_num_cells: model.max_num_cells,
        columns: columns.to_columns(),
        ..MohaConfig::default_v1()
    }
}
