//! Metrics report: one tab-separated row per (sample, context).

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::math::diversity::{DiversityKind, DiversityRec};
use crate::scores::SampleMetrics;

pub const REPORT_COLUMNS: [&str; 20] = [
    "SAMPLE_ID",
    "MOHA_CONTEXT",
    "NumCells",
    "AvgCellCoordinationNumber",
    "MaxCellCoordinationNumber",
    "CellCoordinationNumber_Entropy",
    "CellCoordinationNumber_Heterogeneity",
    "MaxNumStates",
    "NumObsStates",
    "Molecular_Disparity",
    "Molecular_Entropy",
    "Molecular_Heterogeneity",
    "CellFamily_Entropy",
    "CellFamily_Heterogeneity",
    "CellNeighbor_Entropy",
    "CellNeighbor_Heterogeneity",
    "CellSocial_Entropy",
    "CellSocial_Heterogeneity",
    "RandomizeOverLocations_CellFamily_Entropy",
    "RandomizeOverLocations_CellFamily_Heterogeneity",
];

const NA: &str = "NA";

fn f4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn header_line() -> String {
    REPORT_COLUMNS.join("\t")
}

fn entropy_pair(rec: Option<&DiversityRec>) -> [String; 2] {
    match rec {
        Some(r) => [f4(r.entropy), f4(r.heterogeneity)],
        None => [NA.to_string(), NA.to_string()],
    }
}

pub fn format_row(row: &SampleMetrics) -> String {
    let m = &row.metrics;
    let d = &m.diversity;
    let mut fields: Vec<String> = vec![
        row.sample_id.clone(),
        row.context.clone(),
        m.num_cells.to_string(),
    ];

    match d.get(DiversityKind::CellCoordinationNumber) {
        Some(c) => fields.extend([
            f4(c.avg_state_index),
            c.max_state_index.to_string(),
            f4(c.entropy),
            f4(c.heterogeneity),
        ]),
        None => fields.extend(std::iter::repeat_n(NA.to_string(), 4)),
    }

    let molecular = d.get(DiversityKind::Molecular);
    fields.push(m.max_molecular_states.to_string());
    fields.push(
        molecular
            .map(|r| r.num_states.to_string())
            .unwrap_or_else(|| NA.to_string()),
    );
    fields.push(
        d.get(DiversityKind::MolecularDisparity)
            .map(|r| f4(r.avg_state_index))
            .unwrap_or_else(|| NA.to_string()),
    );
    fields.extend(entropy_pair(molecular));
    fields.extend(entropy_pair(d.get(DiversityKind::CellFamily)));
    fields.extend(entropy_pair(d.get(DiversityKind::CellNeighbor)));
    fields.extend(entropy_pair(d.get(DiversityKind::CellSocial)));
    fields.extend(entropy_pair(d.get(DiversityKind::RandomizeOverLocationsCellFamily)));
    fields.join("\t")
}

/// Writes `rows` in one open: truncating unless `append`, and with a header
/// whenever the file is new or truncated.
pub fn write_report(path: &Path, rows: &[SampleMetrics], append: bool) -> Result<()> {
    let write_header = !append || !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("failed to open report {}", path.display()))?;
    let mut w = BufWriter::new(file);
    if write_header {
        writeln!(w, "{}", header_line())?;
    }
    for row in rows {
        writeln!(w, "{}", format_row(row))?;
    }
    w.flush()?;
    Ok(())
}
