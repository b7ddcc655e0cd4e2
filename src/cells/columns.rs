//! Biomarker measurement column discovery.
//!
//! A column tag such as `_Cell_Median` names one location and one metric.
//! Columns carrying the same metric at any known location are biomarker
//! columns, e.g. `AKT_Nuclear_Median` and `EGFR_Membrane_Median`.

/// Known location tokens with their canonical name. Longer tokens come first
/// so that `cytosol` is not taken for `cyt`.
const LOCATION_TOKENS: [(&str, &str); 11] = [
    ("extracellular_space", "extracellular"),
    ("extracellular", "extracellular"),
    ("plasma_membrane", "membrane"),
    ("membrane", "membrane"),
    ("memb", "membrane"),
    ("cytoplasm", "cytosol"),
    ("cytosol", "cytosol"),
    ("cyt", "cytosol"),
    ("nuclear", "nuclear"),
    ("nuc", "nuclear"),
    ("cell", "cell"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomarkerColumn {
    /// Column header as found in the measurement file.
    pub column: String,
    pub biomarker: String,
    pub location: String,
    pub metric: String,
}

/// Metric named by a tag: `median`, `mean`, or the tag itself.
pub fn tag_metric(tag: &str) -> String {
    let lower = tag.to_ascii_lowercase();
    if lower.contains("median") {
        "median".to_string()
    } else if lower.contains("mean") {
        "mean".to_string()
    } else {
        tag.to_string()
    }
}

/// Byte range of the location token inside `lower`.
fn find_location(lower: &str) -> Option<(usize, usize)> {
    LOCATION_TOKENS
        .iter()
        .find_map(|(token, _)| lower.find(token).map(|start| (start, start + token.len())))
}

/// Lower-cased search tags, one per known location, in token order.
fn location_variants(tag: &str) -> Vec<(String, &'static str)> {
    let lower = tag.to_ascii_lowercase();
    match find_location(&lower) {
        Some((start, end)) => LOCATION_TOKENS
            .iter()
            .map(|(token, canonical)| {
                (
                    format!("{}{}{}", &lower[..start], token, &lower[end..]),
                    *canonical,
                )
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Biomarker columns among `headers`, in header order.
pub fn discover_biomarker_columns(headers: &[String], tag: &str) -> Vec<BiomarkerColumn> {
    let metric = tag_metric(tag);
    let variants = location_variants(tag);
    let mut columns = Vec::new();

    for header in headers {
        let lower = header.to_ascii_lowercase();
        let matched = if variants.is_empty() {
            let needle = tag.to_ascii_lowercase();
            lower
                .rfind(&needle)
                .map(|start| (start, start + needle.len(), tag.to_string()))
        } else {
            variants.iter().find_map(|(needle, canonical)| {
                lower
                    .rfind(needle.as_str())
                    .map(|start| (start, start + needle.len(), canonical.to_string()))
            })
        };

        if let Some((start, end, location)) = matched {
            let biomarker = format!("{}{}", &header[..start], &header[end..]);
            if biomarker.trim().is_empty() {
                continue;
            }
            columns.push(BiomarkerColumn {
                column: header.clone(),
                biomarker,
                location,
                metric: metric.clone(),
            });
        }
    }
    columns
}
