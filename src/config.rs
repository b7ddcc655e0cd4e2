//! Run configuration shared by every stage.
//!
//! Built once from the command line and never mutated afterwards.

use anyhow::{Result, bail};

/// Critical distance factor described in the MOHA publication.
pub const DEFAULT_CRITICAL_DISTANCE_FACTOR: f64 = 1.31;
/// Low / medium / high.
pub const DEFAULT_N_STATE_MODEL: usize = 3;
/// Square pixels; radius ~11.875 px at 20x magnification.
pub const DEFAULT_CELL_AREA: f64 = 443.0;
pub const DEFAULT_MAX_NUM_CELLS: usize = 2_000_000;
pub const DEFAULT_BIOMARKER_COL_TAG: &str = "_Cell_Median";

/// Marker-state character for a missing or unparsable measurement.
pub const UNKNOWN_STATE: char = 'X';

/// Largest model whose states still encode as a single decimal digit.
pub const MAX_N_STATE_MODEL: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub sample_id: String,
    pub data_filename: String,
    pub slide_id: String,
    pub position_id: String,
    pub cell_id: String,
    pub center_x: String,
    pub center_y: String,
    pub area: String,
    pub radius: String,
    pub marker_states: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            sample_id: "SAMPLE_ID".to_string(),
            data_filename: "DATA_FILENAME".to_string(),
            slide_id: "Slide_ID".to_string(),
            position_id: "Position_ID".to_string(),
            cell_id: "Cell_ID".to_string(),
            center_x: "Cell_Center_X".to_string(),
            center_y: "Cell_Center_Y".to_string(),
            area: "Cell_Area".to_string(),
            radius: "Cell_Radius".to_string(),
            marker_states: "Marker_States".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MohaConfig {
    pub n_state_model: usize,
    pub critical_distance_factor: f64,
    pub default_cell_area: f64,
    pub max_num_cells: usize,
    /// Overrides `n_state_model ^ num_markers` when set.
    pub max_num_cell_states: Option<usize>,
    pub biomarker_col_tag: String,
    pub columns: ColumnNames,
}

impl MohaConfig {
    pub fn default_v1() -> Self {
        Self {
            n_state_model: DEFAULT_N_STATE_MODEL,
            critical_distance_factor: DEFAULT_CRITICAL_DISTANCE_FACTOR,
            default_cell_area: DEFAULT_CELL_AREA,
            max_num_cells: DEFAULT_MAX_NUM_CELLS,
            max_num_cell_states: None,
            biomarker_col_tag: DEFAULT_BIOMARKER_COL_TAG.to_string(),
            columns: ColumnNames::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_state_model < 2 || self.n_state_model > MAX_N_STATE_MODEL {
            bail!(
                "n-state model must be between 2 and {} (got {})",
                MAX_N_STATE_MODEL,
                self.n_state_model
            );
        }
        if !self.critical_distance_factor.is_finite() || self.critical_distance_factor <= 0.0 {
            bail!(
                "critical distance factor must be a positive number (got {})",
                self.critical_distance_factor
            );
        }
        if !self.default_cell_area.is_finite() || self.default_cell_area <= 0.0 {
            bail!("default cell area must be positive");
        }
        if self.max_num_cells == 0 {
            bail!("maximum number of cells must be at least 1");
        }
        if self.max_num_cell_states == Some(0) {
            bail!("maximum number of cell states must be at least 1");
        }
        if self.biomarker_col_tag.trim().is_empty() {
            bail!("biomarker column tag is empty");
        }
        Ok(())
    }

    pub fn sqr_critical_distance_factor(&self) -> f64 {
        self.critical_distance_factor * self.critical_distance_factor
    }

    /// Upper bound on distinct molecular states for a marker set of the given size.
    pub fn max_molecular_states(&self, num_markers: usize) -> usize {
        if let Some(max) = self.max_num_cell_states {
            return max;
        }
        let exp = u32::try_from(num_markers).unwrap_or(u32::MAX);
        self.n_state_model.saturating_pow(exp)
    }
}

impl Default for MohaConfig {
    fn default() -> Self {
        Self::default_v1()
    }
}
