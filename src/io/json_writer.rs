use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::math::diversity::DiversityRec;
use crate::schema::v1::{DiversityEntry, GenesetCoverage, MohaReportV1, SampleResult};
use crate::scores::SampleMetrics;

fn diversity_entry(rec: &DiversityRec) -> DiversityEntry {
    DiversityEntry {
        entropy: rec.entropy,
        heterogeneity: rec.heterogeneity,
        num_entities: rec.num_entities,
        num_states: rec.num_states,
        max_num_states: rec.max_num_states,
        avg_state_index: rec.avg_state_index,
        max_state_index: rec.max_state_index,
    }
}

pub fn sample_result(row: &SampleMetrics) -> SampleResult {
    let diversity: BTreeMap<String, DiversityEntry> = row
        .metrics
        .diversity
        .iter()
        .map(|rec| (rec.kind.as_str().to_string(), diversity_entry(rec)))
        .collect();
    SampleResult {
        sample_id: row.sample_id.clone(),
        context: row.context.clone(),
        num_cells: row.metrics.num_cells,
        max_num_states: row.metrics.max_molecular_states,
        coordination_frequencies: row.metrics.coordination_frequencies.clone(),
        diversity,
    }
}

pub fn build_report(ctx: &Ctx) -> MohaReportV1 {
    let mut report = ctx.report.clone();
    report.results = ctx.results.iter().map(sample_result).collect();
    report.geneset_coverage = match &ctx.genesets {
        Some(gs) => gs
            .resolved
            .iter()
            .map(|g| GenesetCoverage {
                geneset: g.name.clone(),
                found: (g.total - g.missing.len()) as u64,
                total: g.total as u64,
                fraction: if g.total == 0 {
                    0.0
                } else {
                    (g.total - g.missing.len()) as f64 / g.total as f64
                },
                missing: g.missing.clone(),
            })
            .collect(),
        None => Vec::new(),
    };
    report
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx);
    crate::io::write_json(path, &report)
        .with_context(|| format!("failed to write {}", path.display()))
}
