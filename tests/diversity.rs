use std::collections::BTreeMap;

use kira_moha::cells::Cell;
use kira_moha::math::disparity::molecular_disparity;
use kira_moha::math::diversity::{DiversityKind, StateRec, compute_diversity, ranked_states};
use kira_moha::scores::molecular::{molecular_diversity, molecular_states};

fn cell(states: &str) -> Cell {
    Cell {
        sample_id: "s1".to_string(),
        slide_id: "1".to_string(),
        position_id: "1".to_string(),
        cell_id: String::new(),
        marker_states: states.to_string(),
        geometry: None,
    }
}

#[test]
fn molecular_entropy_of_three_states() {
    let cells: Vec<Cell> = ["00", "00", "01", "11"].iter().map(|s| cell(s)).collect();
    let states = molecular_states(&cells);
    let (rec, _) = molecular_diversity(&states, 4);
    assert_eq!(rec.kind, DiversityKind::Molecular);
    assert_eq!(rec.num_states, 3);
    assert_eq!(rec.num_entities, 4.0);
    assert!((rec.entropy - 1.0397).abs() < 1e-4);
    assert!((rec.heterogeneity - rec.entropy / 4f64.ln()).abs() < 1e-12);
}

#[test]
fn molecular_ranks_break_ties_lexicographically() {
    let cells: Vec<Cell> = ["11", "01", "00", "00", "10"].iter().map(|s| cell(s)).collect();
    let states = molecular_states(&cells);
    let ids: Vec<&str> = states.iter().map(|s| s.state_id.as_str()).collect();
    assert_eq!(ids, vec!["00", "01", "10", "11"]);
    let ranks: Vec<usize> = states.iter().map(|s| s.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    assert!((states[0].frequency - 0.4).abs() < 1e-12);
}

#[test]
fn single_state_has_zero_entropy() {
    let states = vec![StateRec::named("012", 7.0)];
    let rec = compute_diversity(DiversityKind::Molecular, &states, 27);
    assert_eq!(rec.num_states, 1);
    assert_eq!(rec.entropy, 0.0);
    assert_eq!(rec.heterogeneity, 0.0);
}

#[test]
fn uniform_distribution_reaches_full_heterogeneity() {
    let mut tally = BTreeMap::new();
    for rank in 0..5 {
        tally.insert(rank, 3.0);
    }
    let rec = compute_diversity(DiversityKind::CellFamily, &ranked_states(&tally), 5);
    assert!((rec.entropy - 5f64.ln()).abs() < 1e-12);
    assert!((rec.heterogeneity - 1.0).abs() < 1e-12);
    assert_eq!(rec.max_state_index, 4);
    assert!((rec.avg_state_index - 2.0).abs() < 1e-12);
}

#[test]
fn zero_counts_are_ignored() {
    let states = vec![
        StateRec::ranked(1, 2.0),
        StateRec::ranked(2, 0.0),
        StateRec::ranked(3, 2.0),
    ];
    let rec = compute_diversity(DiversityKind::CellNeighbor, &states, 4);
    assert_eq!(rec.num_states, 2);
    assert!((rec.entropy - 2f64.ln()).abs() < 1e-12);
    assert!(rec.heterogeneity >= 0.0 && rec.heterogeneity <= 1.0);
}

#[test]
fn max_of_one_state_gives_zero_heterogeneity() {
    let states = vec![StateRec::ranked(1, 1.0), StateRec::ranked(2, 1.0)];
    let rec = compute_diversity(DiversityKind::CellSocial, &states, 1);
    assert!(rec.entropy > 0.0);
    assert_eq!(rec.heterogeneity, 0.0);
}

#[test]
fn empty_distribution_is_all_zero() {
    let rec = compute_diversity(DiversityKind::Molecular, &[], 9);
    assert_eq!(rec.num_states, 0);
    assert_eq!(rec.entropy, 0.0);
    assert_eq!(rec.max_num_states, 9);
}

#[test]
fn disparity_sums_squared_differences() {
    let cells: Vec<Cell> = ["00", "00", "01", "11"].iter().map(|s| cell(s)).collect();
    let states = molecular_states(&cells);
    let (_, disparity) = molecular_diversity(&states, 4);
    assert_eq!(disparity.kind, DiversityKind::MolecularDisparity);
    assert!((disparity.avg_state_index - 0.4375).abs() < 1e-12);
}

#[test]
fn disparity_is_symmetric() {
    let mut a = StateRec::named("021", 1.0);
    a.frequency = 0.3;
    let mut b = StateRec::named("120", 1.0);
    b.frequency = 0.7;
    let forward = molecular_disparity(&[a.clone(), b.clone()]);
    let backward = molecular_disparity(&[b, a]);
    assert!((forward - backward).abs() < 1e-12);
    assert!((forward - 0.3 * 0.7 * 2.0).abs() < 1e-12);
}

#[test]
fn disparity_of_one_state_is_zero() {
    let mut a = StateRec::named("012", 4.0);
    a.frequency = 1.0;
    assert_eq!(molecular_disparity(&[a]), 0.0);
}
