use std::path::Path;

use anyhow::{Result, bail};

use crate::geneset::GenesetDef;
use crate::io::marker_index::split_targets;
use crate::io::table::DelimitedTable;

pub const COL_SET_NAME: &str = "markerSetName";
pub const COL_MARKERS: &str = "markers";

/// Location assumed for a target that names none.
pub const DEFAULT_TARGET_LOCATION: &str = "cell";

/// `AKT` becomes `AKT cell`; `AKT nuclear` is kept.
pub fn qualify_target(target: &str) -> String {
    if target.contains(' ') {
        target.to_string()
    } else {
        format!("{} {}", target, DEFAULT_TARGET_LOCATION)
    }
}

pub fn load_geneset_file(path: &Path) -> Result<Vec<GenesetDef>> {
    if !path.exists() {
        bail!("gene set file does not exist: {}", path.display());
    }
    let table = DelimitedTable::read(path)?;
    if table.is_empty() {
        bail!("no gene sets (rows) in gene set file: {}", path.display());
    }
    let name_col = table.require_column(COL_SET_NAME)?;
    let markers_col = table.require_column(COL_MARKERS)?;

    let mut defs = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let name = table.value(row, name_col);
        if name.is_empty() {
            bail!("{}:{} empty {}", path.display(), row + 2, COL_SET_NAME);
        }
        let targets = split_targets(table.value(row, markers_col))
            .iter()
            .map(|t| qualify_target(t))
            .collect();
        defs.push(GenesetDef {
            name: name.to_string(),
            targets,
        });
    }
    Ok(defs)
}
