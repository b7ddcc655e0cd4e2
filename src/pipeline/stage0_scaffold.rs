use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage0Scaffold;

impl Stage0Scaffold {
    pub fn new() -> Self {
        Self
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

impl Stage for Stage0Scaffold {
    fn name(&self) -> &'static str {
        "stage0_scaffold"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        ctx.config.validate()?;

        let outputs = [
            &ctx.output.thresholds,
            &ctx.output.cell_states,
            &ctx.output.marker_index,
            &ctx.output.report,
            &ctx.output.json,
        ];
        for path in outputs.into_iter().flatten() {
            ensure_parent(path)?;
        }

        debug!(
            n_state_model = ctx.config.n_state_model,
            critical_distance_factor = ctx.config.critical_distance_factor,
            default_cell_area = ctx.config.default_cell_area,
            max_num_cells = ctx.config.max_num_cells,
            max_num_cell_states = ?ctx.config.max_num_cell_states,
            biomarker_col_tag = %ctx.config.biomarker_col_tag,
            append = ctx.append,
            "run parameters"
        );
        info!(command = ctx.task.as_str(), "output paths ready");
        Ok(())
    }
}
