//! Marker-state file: one row per cell with its encoded molecular state.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cells::{Cell, CellGeometry, CellTable, EncodedCell, encode_marker_states};
use crate::config::{ColumnNames, MohaConfig};
use crate::io::table::DelimitedTable;
use crate::math::threshold::Threshold;

const MISSING: &str = "NA";

/// Encodes every row of every measurement file with `thresholds`.
pub fn encode_measure_files(
    files: &[PathBuf],
    thresholds: &[Threshold],
    config: &MohaConfig,
) -> Result<Vec<EncodedCell>> {
    let columns = &config.columns;
    let default_area = format_area(config.default_cell_area);
    let mut encoded = Vec::new();

    for file in files {
        let table = DelimitedTable::read(file)?;
        let marker_cols: Vec<Option<usize>> = thresholds.iter().map(|t| table.column(&t.column)).collect();
        let missing = marker_cols.iter().filter(|c| c.is_none()).count();
        if missing > 0 {
            info!(path = %file.display(), missing, "biomarker columns absent, encoded as unknown");
        }

        let slide = table.column(&columns.slide_id);
        let position = table.column(&columns.position_id);
        let cell_id = table.column(&columns.cell_id);
        let x = table.column(&columns.center_x);
        let y = table.column(&columns.center_y);
        let area = table.column(&columns.area);

        for row in 0..table.len() {
            let field = |col: Option<usize>| -> String {
                col.map(|c| table.value(row, c).to_string())
                    .unwrap_or_else(|| MISSING.to_string())
            };
            let values: Vec<Option<&str>> = marker_cols
                .iter()
                .map(|c| c.map(|c| table.value(row, c)))
                .collect();
            encoded.push(EncodedCell {
                slide_id: field(slide),
                position_id: field(position),
                cell_id: field(cell_id),
                center_x: field(x),
                center_y: field(y),
                area: area
                    .map(|c| table.value(row, c).to_string())
                    .unwrap_or_else(|| default_area.clone()),
                marker_states: encode_marker_states(&values, thresholds),
            });
        }
    }
    Ok(encoded)
}

fn format_area(area: f64) -> String {
    if area.fract() == 0.0 {
        format!("{}", area as i64)
    } else {
        area.to_string()
    }
}

pub fn write_cell_states(path: &Path, columns: &ColumnNames, cells: &[EncodedCell]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(
        w,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        columns.slide_id,
        columns.position_id,
        columns.cell_id,
        columns.center_x,
        columns.center_y,
        columns.area,
        columns.marker_states
    )?;
    for c in cells {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            c.slide_id, c.position_id, c.cell_id, c.center_x, c.center_y, c.area, c.marker_states
        )?;
    }
    w.flush()?;
    Ok(())
}

fn all_missing(table: &DelimitedTable, col: usize) -> bool {
    (0..table.len()).all(|row| {
        let v = table.value(row, col);
        v.is_empty() || v.eq_ignore_ascii_case(MISSING)
    })
}

#[derive(Debug, Clone, Copy)]
enum SizeColumn {
    Radius(usize),
    Area(usize),
}

fn parse_spatial(table: &DelimitedTable, row: usize, col: usize, what: &str) -> Result<f64> {
    let raw = table.value(row, col);
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => bail!(
            "problem parsing {} '{}' in row {} of {}",
            what,
            raw,
            row + 1,
            table.path.display()
        ),
    }
}

/// Loads a marker-state file.
///
/// Geometry is read only when center X, center Y and either radius or area
/// are present; the radius column wins over area.
pub fn read_cell_states(path: &Path, config: &MohaConfig) -> Result<CellTable> {
    if !path.exists() {
        bail!("cell marker state file does not exist: {}", path.display());
    }
    let columns = &config.columns;
    let table = DelimitedTable::read(path)?;
    if table.is_empty() {
        bail!("no cells (rows) in cell marker state file: {}", path.display());
    }
    if table.len() > config.max_num_cells {
        bail!(
            "number of cells in {} is {} and exceeds the current memory limit of {}",
            path.display(),
            table.len(),
            config.max_num_cells
        );
    }

    let states_col = table.require_column(&columns.marker_states)?;
    let sample = table.column(&columns.sample_id);
    let slide = table.column(&columns.slide_id);
    let position = table.column(&columns.position_id);
    let cell_id = table.column(&columns.cell_id);
    let spatial = match (
        table.column(&columns.center_x),
        table.column(&columns.center_y),
        table.column(&columns.radius),
        table.column(&columns.area),
    ) {
        (Some(x), Some(y), Some(r), _) => Some((x, y, SizeColumn::Radius(r))),
        (Some(x), Some(y), None, Some(a)) => Some((x, y, SizeColumn::Area(a))),
        _ => None,
    };
    // Coordinates written as NA by the encoder mean the source had none.
    let spatial = spatial.filter(|&(x, y, _)| !(all_missing(&table, x) && all_missing(&table, y)));

    let mut cells = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let text = |col: Option<usize>| col.map(|c| table.value(row, c).to_string()).unwrap_or_default();
        let slide_id = text(slide);
        let position_id = text(position);
        let sample_id = match sample {
            Some(c) => table.value(row, c).to_string(),
            None => format!("{}_{}", slide_id, position_id),
        };

        let geometry = match spatial {
            Some((xc, yc, size)) => {
                let x = parse_spatial(&table, row, xc, "cell center X")?;
                let y = parse_spatial(&table, row, yc, "cell center Y")?;
                Some(match size {
                    SizeColumn::Radius(c) => CellGeometry {
                        x,
                        y,
                        radius: parse_spatial(&table, row, c, "cell radius")?,
                    },
                    SizeColumn::Area(c) => {
                        CellGeometry::from_area(x, y, parse_spatial(&table, row, c, "cell area")?)
                    }
                })
            }
            None => None,
        };

        cells.push(Cell {
            sample_id,
            slide_id,
            position_id,
            cell_id: text(cell_id),
            marker_states: table.value(row, states_col).to_string(),
            geometry,
        });
    }

    validate_state_lengths(&cells, path)?;
    Ok(CellTable {
        cells,
        has_spatial: spatial.is_some(),
    })
}

/// Marker-state strings must have one length within each sample.
fn validate_state_lengths(cells: &[Cell], path: &Path) -> Result<()> {
    let mut lengths: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for (row, cell) in cells.iter().enumerate() {
        let len = cell.marker_states.chars().count();
        if len == 0 {
            bail!("empty marker states in row {} of {}", row + 1, path.display());
        }
        let expected = *lengths.entry(cell.sample_id.as_str()).or_insert(len);
        if expected != len {
            bail!(
                "marker states in row {} of {} have {} markers, expected {} for sample '{}'",
                row + 1,
                path.display(),
                len,
                expected,
                cell.sample_id
            );
        }
    }
    Ok(())
}
