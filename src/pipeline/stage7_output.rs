use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::json_writer::write_json;
use crate::io::report_tsv::write_report;
use crate::pipeline::Stage;

pub struct Stage7Output;

impl Stage7Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Output {
    fn name(&self) -> &'static str {
        "stage7_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let report = ctx
            .output
            .report
            .clone()
            .context("report output path missing")?;
        write_report(&report, &ctx.results, ctx.append)?;
        ctx.rows_written = ctx.results.len();
        info!(
            path = %report.display(),
            rows = ctx.rows_written,
            append = ctx.append,
            "report written"
        );

        if let Some(json) = ctx.output.json.clone() {
            write_json(&json, ctx)?;
            info!(path = %json.display(), "json report written");
        }
        Ok(())
    }
}
