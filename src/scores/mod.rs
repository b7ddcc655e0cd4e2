//! MOHA metrics for one (sample, context) cell population.

pub mod molecular;
pub mod randomized;
pub mod social;
pub mod spatial;

use anyhow::{Result, bail};
use tracing::debug;

use crate::cells::Cell;
use crate::config::MohaConfig;
use crate::math::diversity::DiversitySet;
use crate::spatial::neighbor_lists;

#[derive(Debug, Clone)]
pub struct MohaMetrics {
    pub num_cells: usize,
    /// Bound used to normalise molecular diversity: `min(max states, cells)`.
    pub max_molecular_states: usize,
    pub diversity: DiversitySet,
    /// Present only when the cells carry geometry.
    pub coordination_frequencies: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct SampleMetrics {
    pub sample_id: String,
    pub context: String,
    pub metrics: MohaMetrics,
}

/// Molecular metrics always; spatial metrics when every cell has geometry.
///
/// `max_num_states` bounds distinct molecular states for the marker set in
/// use; it is further capped by the number of cells.
pub fn compute_moha_metrics(
    cells: &[Cell],
    max_num_states: usize,
    config: &MohaConfig,
) -> Result<MohaMetrics> {
    if cells.is_empty() {
        bail!("no cells in cell state data");
    }
    let num_cells = cells.len();

    let states = molecular::molecular_states(cells);
    let max_molecular_states = max_num_states.min(num_cells);
    let (molecular, disparity) = molecular::molecular_diversity(&states, max_molecular_states);

    let mut diversity = DiversitySet::new();
    diversity.insert(molecular);
    diversity.insert(disparity);

    let mut coordination_frequencies = None;
    if cells.iter().all(|c| c.geometry.is_some()) {
        let neighbors = neighbor_lists(cells, config.sqr_critical_distance_factor());
        let dist = spatial::spatial_distributions(cells, &neighbors);
        debug!(
            cells = num_cells,
            max_coordination = dist.max_coordination,
            "neighbor lists built"
        );

        for rec in spatial::spatial_diversity(&dist) {
            diversity.insert(rec);
        }

        let frequencies: Vec<f64> = states.iter().map(|s| s.frequency).collect();
        diversity.insert(randomized::randomized_family_diversity(
            &frequencies,
            &dist.coordination,
        ));
        diversity.insert(social::cell_social_diversity(cells, &neighbors));
        coordination_frequencies = Some(spatial::coordination_frequencies(&dist.coordination));
    }

    Ok(MohaMetrics {
        num_cells,
        max_molecular_states,
        diversity,
        coordination_frequencies,
    })
}
