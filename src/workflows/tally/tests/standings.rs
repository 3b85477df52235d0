use std::collections::HashMap;

use super::common::{active_session, scores_map, session, session_in};
use crate::workflows::tally::domain::{AgeGroup, Category, ClassGroup};
use crate::workflows::tally::standings::{rank_standings, StandingsFilter};

#[test]
fn tied_totals_share_a_rank_with_a_gap() {
    let sessions = vec![
        session("s-1", "Sukamaju", ClassGroup::Putra),
        session("s-2", "Wanasari", ClassGroup::Putra),
        session("s-3", "Cikembar", ClassGroup::Putra),
    ];
    let scores = scores_map(&[("s-1", &[100]), ("s-2", &[100]), ("s-3", &[90])]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    let ranks: Vec<u32> = standings.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 1, 3]);
}

#[test]
fn ranks_resume_after_a_shared_second_place() {
    let sessions = vec![
        session("s-1", "Sukamaju", ClassGroup::Putra),
        session("s-2", "Wanasari", ClassGroup::Putra),
        session("s-3", "Cikembar", ClassGroup::Putra),
        session("s-4", "Mekarjaya", ClassGroup::Putra),
    ];
    let scores = scores_map(&[
        ("s-1", &[100]),
        ("s-2", &[90]),
        ("s-3", &[90]),
        ("s-4", &[80]),
    ]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    let ranks: Vec<u32> = standings.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 2, 2, 4]);
}

#[test]
fn multi_session_totals_aggregate_with_trimming() {
    let sessions = vec![
        session("s-1", "Sukamaju", ClassGroup::Putra),
        session("s-2", "Sukamaju", ClassGroup::Putra),
        session("s-3", "Wanasari", ClassGroup::Putra),
    ];
    // s-1 trims to 45+200+250, s-2 sums all three, s-3 sums all three.
    let scores = scores_map(&[
        ("s-1", &[19, 45, 200, 250, 300]),
        ("s-2", &[100, 100, 100]),
        ("s-3", &[91, 91, 91]),
    ]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].village.0, "Sukamaju");
    assert_eq!(standings[0].total_score, 795);
    assert_eq!(standings[0].completed_sessions, 2);
    assert_eq!(standings[0].rank, 1);
    assert_eq!(standings[1].village.0, "Wanasari");
    assert_eq!(standings[1].total_score, 273);
    assert_eq!(standings[1].rank, 2);
}

#[test]
fn active_sessions_never_count() {
    let sessions = vec![
        session("s-1", "Sukamaju", ClassGroup::Putra),
        active_session("s-2", "Sukamaju", ClassGroup::Putra),
    ];
    let scores = scores_map(&[("s-1", &[60]), ("s-2", &[500])]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].total_score, 60);
    assert_eq!(standings[0].completed_sessions, 1);
}

#[test]
fn villages_without_completed_sessions_are_absent() {
    let sessions = vec![
        session("s-1", "Sukamaju", ClassGroup::Putra),
        active_session("s-2", "Wanasari", ClassGroup::Putra),
    ];
    let scores = scores_map(&[("s-1", &[60]), ("s-2", &[70])]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    assert_eq!(standings.len(), 1);
    assert!(standings
        .iter()
        .all(|entry| entry.village.0 != "Wanasari"));
}

#[test]
fn duplicate_session_records_count_once() {
    let sessions = vec![
        session("s-1", "Sukamaju", ClassGroup::Putra),
        session("s-1", "Sukamaju", ClassGroup::Putra),
    ];
    let scores = scores_map(&[("s-1", &[40, 50])]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].total_score, 90);
    assert_eq!(standings[0].completed_sessions, 1);
}

#[test]
fn missing_panel_counts_as_a_scoreless_session() {
    let sessions = vec![
        session("s-1", "Sukamaju", ClassGroup::Putra),
        session("s-2", "Sukamaju", ClassGroup::Putra),
    ];
    let scores = scores_map(&[("s-1", &[60])]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].total_score, 60);
    assert_eq!(standings[0].completed_sessions, 2);
}

#[test]
fn filters_restrict_by_classification() {
    let sessions = vec![
        session_in("s-1", "Sukamaju", ClassGroup::Putra, "Remaja", "Tunggal"),
        session_in("s-2", "Sukamaju", ClassGroup::Putra, "Dewasa", "Tunggal"),
        session_in("s-3", "Sukamaju", ClassGroup::Putri, "Remaja", "Tunggal"),
        session_in("s-4", "Wanasari", ClassGroup::Putra, "Remaja", "Ganda"),
    ];
    let scores = scores_map(&[
        ("s-1", &[10]),
        ("s-2", &[20]),
        ("s-3", &[30]),
        ("s-4", &[40]),
    ]);

    let all = rank_standings(&sessions, &scores, &StandingsFilter::default());
    assert_eq!(all.len(), 3);

    let putra_only = rank_standings(
        &sessions,
        &scores,
        &StandingsFilter::for_class_group(ClassGroup::Putra),
    );
    assert_eq!(putra_only.len(), 2);
    assert!(putra_only
        .iter()
        .all(|entry| entry.class_group == ClassGroup::Putra));

    let remaja_tunggal = rank_standings(
        &sessions,
        &scores,
        &StandingsFilter {
            class_group: Some(ClassGroup::Putra),
            age_group: Some(AgeGroup("Remaja".to_string())),
            category: Some(Category("Tunggal".to_string())),
        },
    );
    assert_eq!(remaja_tunggal.len(), 1);
    assert_eq!(remaja_tunggal[0].total_score, 10);
}

#[test]
fn equal_totals_list_villages_alphabetically() {
    let sessions = vec![
        session("s-1", "Wanasari", ClassGroup::Putra),
        session("s-2", "Cikembar", ClassGroup::Putra),
        session("s-3", "Sukamaju", ClassGroup::Putra),
    ];
    let scores = scores_map(&[("s-1", &[50]), ("s-2", &[50]), ("s-3", &[50])]);

    let standings = rank_standings(&sessions, &scores, &StandingsFilter::default());

    let villages: Vec<&str> = standings
        .iter()
        .map(|entry| entry.village.0.as_str())
        .collect();
    assert_eq!(villages, vec!["Cikembar", "Sukamaju", "Wanasari"]);
    assert!(standings.iter().all(|entry| entry.rank == 1));
}

#[test]
fn no_sessions_yield_an_empty_board() {
    let standings = rank_standings(&[], &HashMap::new(), &StandingsFilter::default());
    assert!(standings.is_empty());
}
