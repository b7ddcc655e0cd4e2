mod loader;
mod resolve;

pub use loader::{DEFAULT_TARGET_LOCATION, load_geneset_file, qualify_target};
pub use resolve::{ResolvedGeneset, resolve_collection};

/// One marker set as listed in the gene-set file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesetDef {
    pub name: String,
    /// `"<marker> <location>"` targets, location already defaulted.
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GenesetCollection {
    pub defs: Vec<GenesetDef>,
    pub resolved: Vec<ResolvedGeneset>,
}

impl GenesetCollection {
    pub fn new(defs: Vec<GenesetDef>) -> Self {
        Self {
            defs,
            resolved: Vec::new(),
        }
    }
}
