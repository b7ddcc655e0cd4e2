use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::table::DelimitedTable;
use crate::math::threshold::Threshold;

pub const COL_INDEX: &str = "MarkerIndx";
pub const COL_NAME: &str = "MarkerName";
pub const COL_LOCATION: &str = "LocationName";
pub const COL_TARGETS: &str = "MarkerTargets";

/// Separator between targets in `MarkerTargets` and gene-set marker lists.
pub const TARGET_DELIMITER: char = ':';

/// Position of one marker inside the marker-state strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIndexEntry {
    pub index: usize,
    pub name: String,
    pub location: String,
    pub targets: Vec<String>,
}

impl MarkerIndexEntry {
    pub fn from_threshold(index: usize, threshold: &Threshold) -> Self {
        Self {
            index,
            name: threshold.biomarker.clone(),
            location: threshold.location.clone(),
            targets: vec![format!("{} {}", threshold.biomarker, threshold.location)],
        }
    }
}

pub fn split_targets(raw: &str) -> Vec<String> {
    raw.split(TARGET_DELIMITER)
        .map(|t| t.replace('"', "").trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn write_marker_index(path: &Path, entries: &[MarkerIndexEntry]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "{}\t{}\t{}\t{}", COL_INDEX, COL_NAME, COL_LOCATION, COL_TARGETS)?;
    for e in entries {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            e.index,
            e.name,
            e.location,
            e.targets.join(&TARGET_DELIMITER.to_string())
        )?;
    }
    w.flush()?;
    Ok(())
}

/// `MarkerName` and `MarkerTargets` are required; without `MarkerIndx` the
/// row order gives the index.
pub fn read_marker_index(path: &Path) -> Result<Vec<MarkerIndexEntry>> {
    if !path.exists() {
        bail!("marker index file does not exist: {}", path.display());
    }
    let table = DelimitedTable::read(path)?;
    if table.is_empty() {
        bail!("no markers (rows) in marker index file: {}", path.display());
    }
    let name_col = table.require_column(COL_NAME)?;
    let targets_col = table.require_column(COL_TARGETS)?;
    let index_col = table.column(COL_INDEX);
    let location_col = table.column(COL_LOCATION);

    let mut entries = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let index = match index_col {
            Some(c) => {
                let raw = table.value(row, c);
                raw.parse::<usize>().with_context(|| {
                    format!(
                        "invalid {} '{}' in row {} of {}",
                        COL_INDEX,
                        raw,
                        row + 1,
                        path.display()
                    )
                })?
            }
            None => row,
        };
        entries.push(MarkerIndexEntry {
            index,
            name: table.value(row, name_col).to_string(),
            location: location_col
                .map(|c| table.value(row, c).to_string())
                .unwrap_or_default(),
            targets: split_targets(table.value(row, targets_col)),
        });
    }
    Ok(entries)
}
