use std::fs;
use std::path::PathBuf;

use kira_moha::cells::{encode_marker_states, has_unknown_state, project_states};
use kira_moha::config::MohaConfig;
use kira_moha::io::cell_states::{encode_measure_files, read_cell_states, write_cell_states};
use kira_moha::math::threshold::{Threshold, ThresholdModel};
use tempfile::TempDir;

fn threshold(column: &str, cuts: Vec<f64>) -> Threshold {
    Threshold {
        column: column.to_string(),
        biomarker: column.split('_').next().unwrap().to_string(),
        location: "cell".to_string(),
        metric: "median".to_string(),
        model: ThresholdModel {
            min_value: 0.0,
            max_value: 100.0,
            cut_points: cuts,
        },
    }
}

#[test]
fn unparsable_values_encode_as_unknown() {
    let thresholds = vec![
        threshold("AKT_Cell_Median", vec![10.0, 20.0]),
        threshold("EGFR_Cell_Median", vec![10.0, 20.0]),
        threshold("ERK_Cell_Median", vec![10.0, 20.0]),
    ];
    let states = encode_marker_states(&[Some("NA"), Some("\"15\""), None], &thresholds);
    assert_eq!(states, "X1X");
    assert!(has_unknown_state(&states));
    assert!(has_unknown_state("0x1"));
    assert!(!has_unknown_state("012"));
}

#[test]
fn projection_drops_unknown_markers() {
    assert_eq!(project_states("0X21", &[0, 2]).unwrap(), Some("02".to_string()));
    assert_eq!(project_states("0X21", &[1, 3]).unwrap(), None);
    assert!(project_states("01", &[2]).is_err());
}

#[test]
fn encoded_rows_keep_identity_and_default_area() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("measures.txt");
    fs::write(
        &input,
        "Slide_ID\tPosition_ID\tCell_ID\tCell_Center_X\tCell_Center_Y\tAKT_Cell_Median\n\
S1\tP1\t1\t10\t20\t5\n\
S1\tP1\t2\t30\t20\tNA\n\
S1\tP1\t3\t50\t20\t25\n",
    )
    .unwrap();

    let config = MohaConfig::default_v1();
    let thresholds = vec![threshold("AKT_Cell_Median", vec![10.0, 20.0])];
    let cells = encode_measure_files(&[input], &thresholds, &config).unwrap();
    assert_eq!(cells.len(), 3);
    let states: Vec<&str> = cells.iter().map(|c| c.marker_states.as_str()).collect();
    assert_eq!(states, vec!["0", "X", "2"]);
    assert_eq!(cells[1].cell_id, "2");
    assert!(cells.iter().all(|c| c.area == "443"));
}

#[test]
fn written_states_load_with_geometry() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("measures.txt");
    fs::write(
        &input,
        "Slide_ID\tPosition_ID\tCell_ID\tCell_Center_X\tCell_Center_Y\tCell_Area\tAKT_Cell_Median\n\
S1\tP1\t1\t10\t20\t78.5\t5\n\
S1\tP1\t2\t30\t20\t78.5\t15\n",
    )
    .unwrap();
    let config = MohaConfig::default_v1();
    let thresholds = vec![threshold("AKT_Cell_Median", vec![10.0, 20.0])];
    let encoded = encode_measure_files(&[input], &thresholds, &config).unwrap();

    let cms = tmp.path().join("measures.MarkerStates.txt");
    write_cell_states(&cms, &config.columns, &encoded).unwrap();
    let table = read_cell_states(&cms, &config).unwrap();
    assert!(table.has_spatial);
    assert_eq!(table.len(), 2);
    assert_eq!(table.cells[0].sample_id, "S1_P1");
    assert_eq!(table.cells[1].marker_states, "1");
    let radius = table.cells[0].geometry.unwrap().radius;
    assert!((radius - (78.5 / std::f64::consts::PI).sqrt()).abs() < 1e-12);
}

fn write_states(tmp: &TempDir, content: &str) -> PathBuf {
    let path = tmp.path().join("states.txt");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_coordinates_load_without_geometry() {
    let tmp = TempDir::new().unwrap();
    let path = write_states(
        &tmp,
        "Slide_ID\tPosition_ID\tCell_ID\tCell_Center_X\tCell_Center_Y\tCell_Area\tMarker_States\n\
S1\tP1\t1\tNA\tNA\t443\t01\n\
S1\tP1\t2\tNA\tNA\t443\t11\n",
    );
    let table = read_cell_states(&path, &MohaConfig::default_v1()).unwrap();
    assert!(!table.has_spatial);
    assert!(table.cells.iter().all(|c| c.geometry.is_none()));
}

#[test]
fn radius_column_wins_over_area() {
    let tmp = TempDir::new().unwrap();
    let path = write_states(
        &tmp,
        "SAMPLE_ID,Cell_Center_X,Cell_Center_Y,Cell_Area,Cell_Radius,Marker_States\n\
A,1,2,1000,3,0\n",
    );
    let table = read_cell_states(&path, &MohaConfig::default_v1()).unwrap();
    assert_eq!(table.cells[0].sample_id, "A");
    assert_eq!(table.cells[0].geometry.unwrap().radius, 3.0);
}

#[test]
fn bad_coordinate_names_the_row() {
    let tmp = TempDir::new().unwrap();
    let path = write_states(
        &tmp,
        "Cell_Center_X\tCell_Center_Y\tCell_Radius\tMarker_States\n\
1\t2\t3\t0\n\
abc\t2\t3\t1\n",
    );
    let err = read_cell_states(&path, &MohaConfig::default_v1()).unwrap_err();
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn marker_states_column_is_required() {
    let tmp = TempDir::new().unwrap();
    let path = write_states(&tmp, "Slide_ID\tPosition_ID\nS1\tP1\n");
    assert!(read_cell_states(&path, &MohaConfig::default_v1()).is_err());
}

#[test]
fn state_length_must_match_within_sample() {
    let tmp = TempDir::new().unwrap();
    let path = write_states(&tmp, "SAMPLE_ID\tMarker_States\nA\t01\nA\t012\nB\t0\n");
    let err = read_cell_states(&path, &MohaConfig::default_v1()).unwrap_err();
    assert!(err.to_string().contains("expected 2"));
}

#[test]
fn cell_cap_applies_to_state_files() {
    let tmp = TempDir::new().unwrap();
    let path = write_states(&tmp, "Marker_States\n0\n1\n2\n");
    let config = MohaConfig {
        max_num_cells: 2,
        ..MohaConfig::default_v1()
    };
    let err = read_cell_states(&path, &config).unwrap_err();
    assert!(err.to_string().contains("memory limit"));
}
