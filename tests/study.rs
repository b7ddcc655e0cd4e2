use std::fs;
use std::path::{Path, PathBuf};

use kira_moha::config::ColumnNames;
use kira_moha::io::study::{check_cell_cap, collect_measures, resolve_measure_files, union_headers};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn unparsable_values_are_left_out_of_measures() {
    let tmp = TempDir::new().unwrap();
    let file = write(
        tmp.path(),
        "cells.txt",
        "Cell_ID\tAKT_Cell_Median\tEGFR_Cell_Median\n1\t4\t1.5\n2\tNA\t2.5\n3\t\"6\"\tinf\n",
    );
    let columns = vec!["AKT_Cell_Median".to_string(), "EGFR_Cell_Median".to_string()];
    let values = collect_measures(&[file], &columns, 100).unwrap();
    assert_eq!(values[0], vec![4.0, 6.0]);
    assert_eq!(values[1], vec![1.5, 2.5]);
}

#[test]
fn measures_stop_at_cap() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "cells.txt", "AKT_Cell_Median\n1\n2\n3\n4\n");
    let values = collect_measures(&[file], &["AKT_Cell_Median".to_string()], 2).unwrap();
    assert_eq!(values[0], vec![1.0, 2.0]);
}

#[test]
fn biomarker_missing_from_one_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.txt", "AKT_Cell_Median\tEGFR_Cell_Median\n1\t2\n");
    let b = write(tmp.path(), "b.txt", "AKT_Cell_Median\n3\n");
    let columns = vec!["AKT_Cell_Median".to_string(), "EGFR_Cell_Median".to_string()];
    let err = collect_measures(&[a, b], &columns, 100).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("EGFR_Cell_Median"));
    assert!(message.contains("b.txt"));
}

#[test]
fn study_files_resolve_next_to_the_study() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.txt", "AKT_Cell_Median\n1\n2\n");
    write(tmp.path(), "b.txt", "AKT_Cell_Median\tERK_Cell_Median\n3\t4\n");
    let study = write(
        tmp.path(),
        "study.txt",
        "SAMPLE_ID\tDATA_FILENAME\nS1\ta.txt\nS2\tb.txt\nS3\ta.txt\n",
    );
    let resolved = resolve_measure_files(&study, &ColumnNames::default()).unwrap();
    assert!(resolved.from_study);
    assert_eq!(resolved.files.len(), 2);
    assert_eq!(
        union_headers(&resolved.files).unwrap(),
        vec!["AKT_Cell_Median", "ERK_Cell_Median"]
    );
}

#[test]
fn study_cell_cap_counts_every_file() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.txt", "AKT_Cell_Median\n1\n2\n\n");
    let b = write(tmp.path(), "b.txt", "AKT_Cell_Median\n3\n4\n5\n");
    let files = vec![a, b];
    assert_eq!(check_cell_cap(&files, 5).unwrap(), 5);
    let err = check_cell_cap(&files, 4).unwrap_err();
    assert!(err.to_string().contains("memory limit"));
}

#[test]
fn missing_study_entry_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let study = write(tmp.path(), "study.txt", "SAMPLE_ID\tDATA_FILENAME\nS1\tabsent.txt\n");
    assert!(resolve_measure_files(&study, &ColumnNames::default()).is_err());
}
