use std::fs;

use kira_moha::geneset::{GenesetCollection, GenesetDef, load_geneset_file, qualify_target, resolve_collection};
use kira_moha::io::marker_index::{MarkerIndexEntry, read_marker_index, split_targets, write_marker_index};
use tempfile::TempDir;

fn marker(index: usize, name: &str, location: &str) -> MarkerIndexEntry {
    MarkerIndexEntry {
        index,
        name: name.to_string(),
        location: location.to_string(),
        targets: vec![format!("{} {}", name, location)],
    }
}

#[test]
fn targets_default_to_cell_location() {
    assert_eq!(qualify_target("AKT"), "AKT cell");
    assert_eq!(qualify_target("AKT nuclear"), "AKT nuclear");
    assert_eq!(split_targets("AKT: \"EGFR\" ::ERK"), vec!["AKT", "EGFR", "ERK"]);
}

#[test]
fn geneset_file_parse_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("genesets.txt");
    fs::write(
        &path,
        "markerSetName\tmarkers\nsignaling\tAKT:ERK nuclear\nreceptors\tEGFR\n",
    )
    .unwrap();

    let defs = load_geneset_file(&path).unwrap();
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].name, "signaling");
    assert_eq!(defs[0].targets, vec!["AKT cell", "ERK nuclear"]);
    assert_eq!(defs[1].targets, vec!["EGFR cell"]);
}

#[test]
fn geneset_file_requires_columns() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("genesets.txt");
    fs::write(&path, "name\tgenes\nsignaling\tAKT\n").unwrap();
    assert!(load_geneset_file(&path).is_err());
}

#[test]
fn geneset_resolution() {
    let markers = vec![
        marker(0, "EGFR", "cell"),
        marker(1, "AKT", "cell"),
        marker(2, "ERK", "nuclear"),
    ];
    let collection = GenesetCollection::new(vec![
        GenesetDef {
            name: "signaling".to_string(),
            targets: vec![
                "ERK nuclear".to_string(),
                "akt CELL".to_string(),
                "MTOR cell".to_string(),
            ],
        },
        GenesetDef {
            name: "absent".to_string(),
            targets: vec!["CD3 cell".to_string()],
        },
    ]);

    let resolved = resolve_collection(collection, &markers);
    let gs = &resolved.resolved[0];
    assert_eq!(gs.marker_indices, vec![1, 2]);
    assert_eq!(gs.missing, vec!["MTOR cell".to_string()]);
    assert_eq!(gs.total, 3);
    assert!(resolved.resolved[1].is_empty());
}

#[test]
fn marker_index_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("markers.MarkerIndex.txt");
    let mut entries = vec![marker(0, "AKT", "cell"), marker(1, "ERK", "nuclear")];
    entries[1].targets.push("MAPK1 nuclear".to_string());
    write_marker_index(&path, &entries).unwrap();
    assert_eq!(read_marker_index(&path).unwrap(), entries);
}

#[test]
fn marker_index_without_index_column_uses_row_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("markers.txt");
    fs::write(&path, "MarkerName\tMarkerTargets\nAKT\tAKT cell\nERK\tERK cell:MAPK1 cell\n").unwrap();
    let entries = read_marker_index(&path).unwrap();
    assert_eq!(entries[1].index, 1);
    assert_eq!(entries[1].targets, vec!["ERK cell", "MAPK1 cell"]);
    assert_eq!(entries[1].location, "");
}
