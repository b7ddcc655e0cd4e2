pub mod columns;
pub mod encode;

pub use columns::{BiomarkerColumn, discover_biomarker_columns};
pub use encode::{encode_marker_states, has_unknown_state, project_states};

/// Center and radius of a segmented cell, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl CellGeometry {
    pub fn from_area(x: f64, y: f64, area: f64) -> Self {
        Self {
            x,
            y,
            radius: (area / std::f64::consts::PI).sqrt(),
        }
    }
}

/// One observed cell with its combined molecular state.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub sample_id: String,
    pub slide_id: String,
    pub position_id: String,
    pub cell_id: String,
    pub marker_states: String,
    /// `None` when the source carries no spatial columns.
    pub geometry: Option<CellGeometry>,
}

impl Cell {
    /// Same cell with its marker states replaced, e.g. after projecting onto
    /// a marker set.
    pub fn with_states(&self, marker_states: String) -> Self {
        Self {
            marker_states,
            ..self.clone()
        }
    }
}

/// Cells loaded from one marker-state file.
#[derive(Debug, Clone, Default)]
pub struct CellTable {
    pub cells: Vec<Cell>,
    pub has_spatial: bool,
}

impl CellTable {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distinct sample IDs, sorted.
    pub fn sample_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.cells.iter().map(|c| c.sample_id.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn marker_count(&self) -> usize {
        self.cells
            .first()
            .map(|c| c.marker_states.chars().count())
            .unwrap_or(0)
    }
}

/// One row of the marker-state output file, fields passed through verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCell {
    pub slide_id: String,
    pub position_id: String,
    pub cell_id: String,
    pub center_x: String,
    pub center_y: String,
    pub area: String,
    pub marker_states: String,
}
