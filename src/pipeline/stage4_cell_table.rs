use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::cell_states::read_cell_states;
use crate::pipeline::Stage;

pub struct Stage4CellTable;

impl Stage4CellTable {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4CellTable {
    fn name(&self) -> &'static str {
        "stage4_cell_table"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let path = ctx
            .input
            .cell_states
            .clone()
            .context("cell marker state file not provided")?;
        let table = read_cell_states(&path, &ctx.config)?;
        info!(
            path = %path.display(),
            cells = table.len(),
            markers = table.marker_count(),
            spatial = table.has_spatial,
            "cell states loaded"
        );
        if !table.has_spatial {
            ctx.warn(format!(
                "{} has no spatial columns; only molecular metrics are computed",
                path.display()
            ));
        }
        ctx.cell_table = Some(table);
        Ok(())
    }
}
