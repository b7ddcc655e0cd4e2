use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cells::discover_biomarker_columns;
use crate::ctx::{Ctx, Task};
use crate::io::study::collect_measures;
use crate::io::threshold_table::{read_thresholds, write_thresholds};
use crate::math::threshold::{Threshold, ThresholdModel};
use crate::pipeline::Stage;

/// Derives thresholds for the `thresholds` command, loads them otherwise.
pub struct Stage2Thresholds;

impl Stage2Thresholds {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Thresholds {
    fn name(&self) -> &'static str {
        "stage2_thresholds"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let n_states = ctx.config.n_state_model;
        if ctx.task != Task::Thresholds {
            let path = ctx
                .input
                .thresholds
                .clone()
                .context("threshold file not provided")?;
            ctx.thresholds = read_thresholds(&path, n_states)?;
            info!(
                path = %path.display(),
                biomarkers = ctx.thresholds.len(),
                "thresholds loaded"
            );
            return Ok(());
        }

        let biomarkers = discover_biomarker_columns(&ctx.measure_headers, &ctx.config.biomarker_col_tag);
        if biomarkers.is_empty() {
            bail!(
                "no biomarker columns match tag '{}'",
                ctx.config.biomarker_col_tag
            );
        }
        let names: Vec<String> = biomarkers.iter().map(|b| b.column.clone()).collect();
        let values = collect_measures(&ctx.measure_files, &names, ctx.config.max_num_cells)?;

        let mut thresholds = Vec::with_capacity(biomarkers.len());
        for (biomarker, column_values) in biomarkers.into_iter().zip(values) {
            let model = ThresholdModel::from_values(column_values, n_states)
                .with_context(|| format!("biomarker column '{}'", biomarker.column))?;
            info!(
                column = %biomarker.column,
                min = model.min_value,
                max = model.max_value,
                cuts = ?model.cut_points,
                "threshold derived"
            );
            thresholds.push(Threshold {
                column: biomarker.column,
                biomarker: biomarker.biomarker,
                location: biomarker.location,
                metric: biomarker.metric,
                model,
            });
        }

        let out = ctx
            .output
            .thresholds
            .clone()
            .context("threshold output path missing")?;
        write_thresholds(&out, n_states, &thresholds)?;
        info!(path = %out.display(), biomarkers = thresholds.len(), "thresholds written");
        ctx.thresholds = thresholds;
        Ok(())
    }
}
