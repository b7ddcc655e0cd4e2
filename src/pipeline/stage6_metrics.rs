use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cells::{Cell, CellTable, has_unknown_state, project_states};
use crate::ctx::{Ctx, MohaContext, Task};
use crate::pipeline::Stage;
use crate::scores::{SampleMetrics, compute_moha_metrics};

pub struct Stage6Metrics;

impl Stage6Metrics {
    pub fn new() -> Self {
        Self
    }
}

/// Cells of `sample` (all cells when `None`) under `context`, dropping any
/// whose projected state carries an unknown marker.
pub fn context_cells(
    table: &CellTable,
    sample: Option<&str>,
    context: &MohaContext,
) -> Result<Vec<Cell>> {
    let mut cells = Vec::new();
    for (row, cell) in table.cells.iter().enumerate() {
        if sample.is_some_and(|s| s != cell.sample_id) {
            continue;
        }
        match &context.marker_indices {
            Some(indices) => {
                let projected = project_states(&cell.marker_states, indices)
                    .with_context(|| format!("cell state data row {}", row + 1))?;
                if let Some(states) = projected {
                    cells.push(cell.with_states(states));
                }
            }
            None => {
                if !has_unknown_state(&cell.marker_states) {
                    cells.push(cell.clone());
                }
            }
        }
    }
    Ok(cells)
}

fn file_label(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "sample".to_string())
}

impl Stage for Stage6Metrics {
    fn name(&self) -> &'static str {
        "stage6_metrics"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let table = ctx.cell_table.take().context("cell states not loaded")?;
        let contexts = ctx.contexts.clone();
        let mut results = Vec::new();

        if ctx.task == Task::GenesetHeterogeneity {
            let samples = table.sample_ids();
            for context in &contexts {
                let num_markers = context.marker_indices.as_ref().map_or(0, |m| m.len());
                let max_states = ctx.config.max_molecular_states(num_markers);
                for sample in &samples {
                    let cells = context_cells(&table, Some(sample), context)?;
                    if cells.is_empty() {
                        ctx.warn(format!(
                            "sample '{}' has no cells with known states for '{}'; skipped",
                            sample, context.label
                        ));
                        continue;
                    }
                    info!(
                        sample = %sample,
                        context = %context.label,
                        cells = cells.len(),
                        markers = num_markers,
                        "computing metrics"
                    );
                    let metrics = compute_moha_metrics(&cells, max_states, &ctx.config)?;
                    results.push(SampleMetrics {
                        sample_id: sample.clone(),
                        context: context.label.clone(),
                        metrics,
                    });
                }
            }
        } else {
            let sample_id = ctx
                .sample_id
                .clone()
                .unwrap_or_else(|| file_label(ctx.input.cell_states.as_deref()));
            let max_states = ctx.config.max_molecular_states(table.marker_count());
            for context in &contexts {
                let cells = context_cells(&table, None, context)?;
                let dropped = table.len() - cells.len();
                if dropped > 0 {
                    ctx.warn(format!(
                        "{} cells with unknown marker states excluded",
                        dropped
                    ));
                }
                if cells.is_empty() {
                    bail!("no cells with known marker states for '{}'", context.label);
                }
                info!(
                    sample = %sample_id,
                    context = %context.label,
                    cells = cells.len(),
                    "computing metrics"
                );
                let metrics = compute_moha_metrics(&cells, max_states, &ctx.config)?;
                results.push(SampleMetrics {
                    sample_id: sample_id.clone(),
                    context: context.label.clone(),
                    metrics,
                });
            }
        }

        ctx.cell_table = Some(table);
        ctx.results = results;
        Ok(())
    }
}
