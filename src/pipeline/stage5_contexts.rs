use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::ctx::{Ctx, MohaContext, Task};
use crate::geneset::{GenesetCollection, load_geneset_file, resolve_collection};
use crate::io::marker_index::read_marker_index;
use crate::pipeline::Stage;

/// Marker sets to analyse: the whole marker-state string, or one per gene set.
pub struct Stage5Contexts;

impl Stage5Contexts {
    pub fn new() -> Self {
        Self
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl Stage for Stage5Contexts {
    fn name(&self) -> &'static str {
        "stage5_contexts"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.task != Task::GenesetHeterogeneity {
            let cms = ctx
                .input
                .cell_states
                .as_deref()
                .context("cell marker state file not provided")?;
            let label = ctx.context_name.clone().unwrap_or_else(|| file_label(cms));
            ctx.contexts = vec![MohaContext {
                label,
                marker_indices: None,
            }];
            return Ok(());
        }

        let gs_path = ctx
            .input
            .genesets
            .clone()
            .context("gene set file not provided")?;
        let mi_path = ctx
            .input
            .marker_index
            .clone()
            .context("marker index file not provided")?;
        let markers = read_marker_index(&mi_path)?;
        let defs = load_geneset_file(&gs_path)?;
        let collection = resolve_collection(GenesetCollection::new(defs), &markers);

        let num_markers = ctx
            .cell_table
            .as_ref()
            .map(|t| t.marker_count())
            .unwrap_or(0);
        let mut contexts = Vec::new();
        let mut skipped = Vec::new();
        for gs in &collection.resolved {
            if gs.is_empty() {
                skipped.push(gs.name.clone());
                continue;
            }
            if let Some(&idx) = gs.marker_indices.iter().find(|&&i| i >= num_markers) {
                bail!(
                    "gene set '{}' resolves to marker index {} but marker states have {} markers",
                    gs.name,
                    idx,
                    num_markers
                );
            }
            info!(
                geneset = %gs.name,
                markers = gs.marker_indices.len(),
                missing = gs.missing.len(),
                "gene set resolved"
            );
            contexts.push(MohaContext {
                label: gs.name.clone(),
                marker_indices: Some(gs.marker_indices.clone()),
            });
        }
        for name in skipped {
            ctx.warn(format!("gene set '{}' matches no markers; skipped", name));
        }
        if contexts.is_empty() {
            bail!("no gene set in {} matches any marker", gs_path.display());
        }

        ctx.contexts = contexts;
        ctx.genesets = Some(collection);
        Ok(())
    }
}
