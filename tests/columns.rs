use kira_moha::cells::columns::tag_metric;
use kira_moha::cells::discover_biomarker_columns;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn columns_at_every_location_are_found() {
    let found = discover_biomarker_columns(
        &headers(&[
            "Cell_ID",
            "AKT_Cell_Median",
            "EGFR_Membrane_Median",
            "pS6_Nuc_Median",
            "ERK_Cytoplasm_Median",
            "AKT_Cell_Mean",
        ]),
        "_Cell_Median",
    );
    let summary: Vec<(&str, &str, &str)> = found
        .iter()
        .map(|c| (c.column.as_str(), c.biomarker.as_str(), c.location.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("AKT_Cell_Median", "AKT", "cell"),
            ("EGFR_Membrane_Median", "EGFR", "membrane"),
            ("pS6_Nuc_Median", "pS6", "nuclear"),
            ("ERK_Cytoplasm_Median", "ERK", "cytosol"),
        ]
    );
    assert!(found.iter().all(|c| c.metric == "median"));
}

#[test]
fn tag_without_location_matches_directly() {
    let found = discover_biomarker_columns(&headers(&["CD3_intensity", "Cell_ID"]), "_intensity");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].biomarker, "CD3");
    assert_eq!(found[0].location, "_intensity");
}

#[test]
fn bare_tag_column_is_skipped() {
    let found = discover_biomarker_columns(&headers(&["_Cell_Median"]), "_Cell_Median");
    assert!(found.is_empty());
}

#[test]
fn metric_follows_tag() {
    assert_eq!(tag_metric("_Cell_Median"), "median");
    assert_eq!(tag_metric("_Nuc_Mean"), "mean");
    assert_eq!(tag_metric("_total"), "_total");
}
