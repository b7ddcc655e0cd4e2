use std::collections::BTreeSet;

use crate::ctx::{Ctx, Task};

pub fn format_summary(ctx: &Ctx) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();
    out.push_str(&format!("kira-moha v{}\n", version));
    out.push_str(&format!("Command: {}\n", ctx.task.as_str()));

    match ctx.task {
        Task::Thresholds => {
            out.push_str(&format!(
                "Input: {} files, {} cells\n",
                ctx.measure_files.len(),
                ctx.num_cell_measures
            ));
            out.push_str(&format!(
                "Thresholds: {} biomarkers, {}-state model\n",
                ctx.thresholds.len(),
                ctx.config.n_state_model
            ));
        }
        Task::CellStates => {
            out.push_str(&format!(
                "Input: {} files, {} cells\n",
                ctx.measure_files.len(),
                ctx.num_cell_measures
            ));
            out.push_str(&format!(
                "Cell states: {} cells, {} markers\n",
                ctx.encoded_cells.len(),
                ctx.thresholds.len()
            ));
        }
        Task::Heterogeneity | Task::GenesetHeterogeneity => {
            let samples: BTreeSet<&str> = ctx.results.iter().map(|r| r.sample_id.as_str()).collect();
            out.push_str(&format!(
                "Samples: {}, contexts: {}\n",
                samples.len(),
                ctx.contexts.len()
            ));
            out.push_str(&format!("Rows written: {}\n", ctx.rows_written));
        }
    }
    out
}
