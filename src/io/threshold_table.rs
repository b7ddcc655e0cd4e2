//! Threshold table: one labelled row per attribute, one column per biomarker.

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::table::DelimitedTable;
use crate::math::threshold::{Threshold, ThresholdModel};

pub const ROW_COLUMN_NAME: &str = "BiomarkerColumnName";
pub const ROW_NAME: &str = "BiomarkerName";
pub const ROW_LOCATION: &str = "BiomarkerLocation";
pub const ROW_METRIC: &str = "BiomarkerMetric";
pub const ROW_MIN: &str = "minValue";
pub const ROW_MAX: &str = "maxValue";

/// `threshold_<i>_of_<n-1>`, `i` counted from 1.
pub fn cut_row_label(i: usize, n_states: usize) -> String {
    format!("threshold_{}_of_{}", i, n_states - 1)
}

pub fn write_thresholds(path: &Path, n_states: usize, thresholds: &[Threshold]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let row = |label: &str, values: Vec<String>| -> String {
        let mut line = label.to_string();
        for v in values {
            line.push('\t');
            line.push_str(&v);
        }
        line
    };

    writeln!(w, "{}", row(ROW_COLUMN_NAME, thresholds.iter().map(|t| t.column.clone()).collect()))?;
    writeln!(w, "{}", row(ROW_NAME, thresholds.iter().map(|t| t.biomarker.clone()).collect()))?;
    writeln!(w, "{}", row(ROW_LOCATION, thresholds.iter().map(|t| t.location.clone()).collect()))?;
    writeln!(w, "{}", row(ROW_METRIC, thresholds.iter().map(|t| t.metric.clone()).collect()))?;
    writeln!(w, "{}", row(ROW_MIN, thresholds.iter().map(|t| t.model.min_value.to_string()).collect()))?;
    for i in 0..n_states - 1 {
        let values = thresholds
            .iter()
            .map(|t| {
                t.model
                    .cut_points
                    .get(i)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "NA".to_string())
            })
            .collect();
        writeln!(w, "{}", row(&cut_row_label(i + 1, n_states), values))?;
    }
    writeln!(w, "{}", row(ROW_MAX, thresholds.iter().map(|t| t.model.max_value.to_string()).collect()))?;
    w.flush()?;
    Ok(())
}

fn expect_label(table: &DelimitedTable, row: usize, label: &str) -> Result<()> {
    let found = table.rows.get(row).and_then(|r| r.first()).map(String::as_str);
    match found {
        Some(found) if found.eq_ignore_ascii_case(label) => Ok(()),
        _ => bail!(
            "problem with threshold file {}: row {} column 1 does not equal {}",
            table.path.display(),
            row + 2,
            label
        ),
    }
}

fn parse_number(table: &DelimitedTable, row: usize, col: usize) -> Result<f64> {
    let raw = table.value(row, col);
    raw.parse::<f64>().with_context(|| {
        format!(
            "problem with threshold file {}: invalid number '{}' in row {} column {}",
            table.path.display(),
            raw,
            row + 2,
            col + 1
        )
    })
}

/// Reads a table written for an `n_states` model; every row label is checked.
pub fn read_thresholds(path: &Path, n_states: usize) -> Result<Vec<Threshold>> {
    if !path.exists() {
        bail!("threshold file does not exist: {}", path.display());
    }
    let table = DelimitedTable::read(path)?;
    if table.is_empty() {
        bail!("no entries in threshold file: {}", path.display());
    }
    let header_label = table.headers.first().map(String::as_str).unwrap_or("");
    if !header_label.eq_ignore_ascii_case(ROW_COLUMN_NAME) {
        bail!(
            "problem with threshold file {}: row 1 column 1 does not equal {}",
            path.display(),
            ROW_COLUMN_NAME
        );
    }
    expect_label(&table, 0, ROW_NAME)?;
    expect_label(&table, 1, ROW_LOCATION)?;
    expect_label(&table, 2, ROW_METRIC)?;
    expect_label(&table, 3, ROW_MIN)?;
    for i in 0..n_states - 1 {
        expect_label(&table, 4 + i, &cut_row_label(i + 1, n_states))?;
    }
    let max_row = 3 + n_states;
    expect_label(&table, max_row, ROW_MAX)?;

    let mut thresholds = Vec::with_capacity(table.headers.len().saturating_sub(1));
    for col in 1..table.headers.len() {
        let cut_points = (0..n_states - 1)
            .map(|i| parse_number(&table, 4 + i, col))
            .collect::<Result<Vec<_>>>()?;
        thresholds.push(Threshold {
            column: table.headers[col].clone(),
            biomarker: table.value(0, col).to_string(),
            location: table.value(1, col).to_string(),
            metric: table.value(2, col).to_string(),
            model: ThresholdModel {
                min_value: parse_number(&table, 3, col)?,
                max_value: parse_number(&table, max_row, col)?,
                cut_points,
            },
        });
    }
    Ok(thresholds)
}
