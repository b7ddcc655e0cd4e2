use anyhow::{Context, Result};
use tracing::info;

use crate::cells::has_unknown_state;
use crate::ctx::Ctx;
use crate::io::cell_states::{encode_measure_files, write_cell_states};
use crate::io::marker_index::{MarkerIndexEntry, write_marker_index};
use crate::pipeline::Stage;

pub struct Stage3CellStates;

impl Stage3CellStates {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3CellStates {
    fn name(&self) -> &'static str {
        "stage3_cell_states"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let encoded = encode_measure_files(&ctx.measure_files, &ctx.thresholds, &ctx.config)?;
        let with_unknown = encoded
            .iter()
            .filter(|c| has_unknown_state(&c.marker_states))
            .count();

        let cms_path = ctx
            .output
            .cell_states
            .clone()
            .context("marker state output path missing")?;
        write_cell_states(&cms_path, &ctx.config.columns, &encoded)?;

        let mi_path = ctx
            .output
            .marker_index
            .clone()
            .context("marker index output path missing")?;
        let entries: Vec<MarkerIndexEntry> = ctx
            .thresholds
            .iter()
            .enumerate()
            .map(|(i, t)| MarkerIndexEntry::from_threshold(i, t))
            .collect();
        write_marker_index(&mi_path, &entries)?;

        info!(
            cells = encoded.len(),
            with_unknown,
            markers = entries.len(),
            cms = %cms_path.display(),
            mi = %mi_path.display(),
            "cell states written"
        );
        ctx.encoded_cells = encoded;
        Ok(())
    }
}
