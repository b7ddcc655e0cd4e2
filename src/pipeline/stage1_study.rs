use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::study::{check_cell_cap, resolve_measure_files, union_headers};
use crate::pipeline::Stage;

pub struct Stage1Study;

impl Stage1Study {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Study {
    fn name(&self) -> &'static str {
        "stage1_study"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let input = ctx
            .input
            .measures
            .clone()
            .context("study or cell measurement file not provided")?;
        let resolved = resolve_measure_files(&input, &ctx.config.columns)?;
        let total = check_cell_cap(&resolved.files, ctx.config.max_num_cells)?;

        ctx.measure_headers = union_headers(&resolved.files)?;
        ctx.measure_files = resolved.files;
        ctx.num_cell_measures = total;

        info!(
            files = ctx.measure_files.len(),
            study = resolved.from_study,
            cells = total,
            "cell measurement files ready"
        );
        Ok(())
    }
}
