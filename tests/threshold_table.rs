use std::fs;

use kira_moha::io::threshold_table::{cut_row_label, read_thresholds, write_thresholds};
use kira_moha::math::threshold::{Threshold, ThresholdModel};
use tempfile::TempDir;

fn threshold(column: &str, biomarker: &str, cuts: Vec<f64>) -> Threshold {
    Threshold {
        column: column.to_string(),
        biomarker: biomarker.to_string(),
        location: "cell".to_string(),
        metric: "median".to_string(),
        model: ThresholdModel {
            min_value: 0.25,
            max_value: 812.5,
            cut_points: cuts,
        },
    }
}

#[test]
fn cut_labels_count_from_one() {
    assert_eq!(cut_row_label(1, 3), "threshold_1_of_2");
    assert_eq!(cut_row_label(2, 3), "threshold_2_of_2");
}

#[test]
fn written_table_reads_back() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("thresholds.txt");
    let thresholds = vec![
        threshold("AKT_Cell_Median", "AKT", vec![10.5, 120.125]),
        threshold("EGFR_Cell_Median", "EGFR", vec![0.1, 0.7]),
    ];
    write_thresholds(&path, 3, &thresholds).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let labels: Vec<&str> = text.lines().map(|l| l.split('\t').next().unwrap()).collect();
    assert_eq!(
        labels,
        vec![
            "BiomarkerColumnName",
            "BiomarkerName",
            "BiomarkerLocation",
            "BiomarkerMetric",
            "minValue",
            "threshold_1_of_2",
            "threshold_2_of_2",
            "maxValue",
        ]
    );

    let read = read_thresholds(&path, 3).unwrap();
    assert_eq!(read, thresholds);
}

#[test]
fn labels_are_case_insensitive() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("thresholds.txt");
    let content = "biomarkercolumnname\tAKT_Cell_Median\n\
biomarkername\tAKT\n\
biomarkerlocation\tcell\n\
biomarkermetric\tmedian\n\
MINVALUE\t1\n\
Threshold_1_of_1\t5\n\
MAXVALUE\t9\n";
    fs::write(&path, content).unwrap();
    let read = read_thresholds(&path, 2).unwrap();
    assert_eq!(read.len(), 1);
    assert_eq!(read[0].model.cut_points, vec![5.0]);
}

#[test]
fn mismatched_state_count_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("thresholds.txt");
    write_thresholds(&path, 3, &[threshold("AKT_Cell_Median", "AKT", vec![1.0, 2.0])]).unwrap();
    let err = read_thresholds(&path, 4).unwrap_err();
    assert!(err.to_string().contains("does not equal"));
}

#[test]
fn wrong_first_label_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("thresholds.txt");
    fs::write(&path, "Column\tA\nBiomarkerName\tA\n").unwrap();
    let err = read_thresholds(&path, 2).unwrap_err();
    assert!(err.to_string().contains("BiomarkerColumnName"));
}

#[test]
fn unparsable_cut_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("thresholds.txt");
    let content = "BiomarkerColumnName\tAKT_Cell_Median\n\
BiomarkerName\tAKT\n\
BiomarkerLocation\tcell\n\
BiomarkerMetric\tmedian\n\
minValue\t1\n\
threshold_1_of_1\tNA\n\
maxValue\t9\n";
    fs::write(&path, content).unwrap();
    let err = read_thresholds(&path, 2).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid number"));
}

#[test]
fn missing_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    assert!(read_thresholds(&tmp.path().join("absent.txt"), 3).is_err());
}
