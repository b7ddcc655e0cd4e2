//! Study file indirection: a table of `SAMPLE_ID` and `DATA_FILENAME`
//! pointing at cell-measurement files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::info;

use crate::config::ColumnNames;
use crate::cells::encode::parse_measure;
use crate::io::table::{DelimitedTable, count_data_rows, find_column, read_header};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureFiles {
    pub files: Vec<PathBuf>,
    /// False when the input itself is the only cell-measurement file.
    pub from_study: bool,
}

/// Cell-measurement files named by `input`.
///
/// Relative data file names that do not exist as given are looked up next to
/// the study file.
pub fn resolve_measure_files(input: &Path, columns: &ColumnNames) -> Result<MeasureFiles> {
    if !input.exists() {
        bail!("study or measurement file does not exist: {}", input.display());
    }

    let (headers, _) = read_header(input)?;
    let is_study = find_column(&headers, &columns.sample_id).is_some()
        && find_column(&headers, &columns.data_filename).is_some();
    if !is_study {
        info!(path = %input.display(), "input is a cell measurement file");
        return Ok(MeasureFiles {
            files: vec![input.to_path_buf()],
            from_study: false,
        });
    }

    let table = DelimitedTable::read(input)?;
    if table.is_empty() {
        bail!("no entries in study file: {}", input.display());
    }
    let col = table.require_column(&columns.data_filename)?;

    let base = input.parent().unwrap_or_else(|| Path::new(""));
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();
    for row in 0..table.len() {
        let name = table.value(row, col);
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }
        let direct = PathBuf::from(name);
        let path = if direct.exists() {
            direct
        } else if direct.is_relative() && base.join(&direct).exists() {
            base.join(&direct)
        } else {
            bail!("cell measurement file listed in study does not exist: {}", name);
        };
        files.push(path);
    }
    if files.is_empty() {
        bail!("no data files listed in study file: {}", input.display());
    }

    info!(path = %input.display(), files = files.len(), "study file resolved");
    Ok(MeasureFiles {
        files,
        from_study: true,
    })
}

/// Total data rows over every file, failing once it exceeds `max_num_cells`.
pub fn check_cell_cap(files: &[PathBuf], max_num_cells: usize) -> Result<usize> {
    let mut total = 0usize;
    for file in files {
        total += count_data_rows(file)?;
    }
    if total > max_num_cells {
        bail!(
            "number of cell measures for the entire study is {} and exceeds the current memory limit of {}",
            total,
            max_num_cells
        );
    }
    Ok(total)
}

/// Union of the header fields of every file, first occurrence order.
pub fn union_headers(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut headers = Vec::new();
    for file in files {
        let (fields, _) = read_header(file)?;
        for field in fields {
            if seen.insert(field.clone()) {
                headers.push(field);
            }
        }
    }
    Ok(headers)
}

/// Parsed values of each named column over every file, capped at `cap` per
/// column. Unparsable and non-finite values are skipped; every file must
/// carry every column.
pub fn collect_measures(files: &[PathBuf], columns: &[String], cap: usize) -> Result<Vec<Vec<f64>>> {
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for file in files {
        let table = DelimitedTable::read(file)?;
        for (slot, name) in columns.iter().enumerate() {
            let Some(col) = table.column(name) else {
                bail!(
                    "required column '{}' was not found in {}",
                    name,
                    file.display()
                );
            };
            let out = &mut values[slot];
            for row in 0..table.len() {
                if out.len() >= cap {
                    break;
                }
                if let Some(v) = parse_measure(table.value(row, col)) {
                    out.push(v);
                }
            }
        }
    }
    Ok(values)
}
