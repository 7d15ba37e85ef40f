//! Integration tests for the go-ratings crate
//!
//! These tests validate the pieces working together:
//! - History export parsing through chart series and summaries
//! - Glicko-2 rating periods and the manual calculator
//! - Cross-checking the Glicko-2 update against skillratings
//! - Configuration feeding the engines

mod fixtures;

use chrono::{TimeZone, Utc};
use go_ratings::config::AppConfig;
use go_ratings::history::{
    aggregate_index_range, aggregate_time_range, chronological, group_by_day, group_by_month,
    has_games, max_games_in_a_month, parse_history_tsv, WinLossSummary,
};
use go_ratings::ranks::HandicapAwareClassifier;
use go_ratings::rating::{glicko2_update, preview_match, Glicko2Entry, RatingPeriod};
use skillratings::glicko2::{glicko2_rating_period, Glicko2Config, Glicko2Rating};
use skillratings::Outcomes;

use fixtures::{glickman_snapshot, history_tsv};

#[test]
fn test_history_export_to_monthly_chart() {
    let rows = parse_history_tsv(&history_tsv()).unwrap();
    assert_eq!(rows.len(), 6);

    let entries = chronological(&rows, &HandicapAwareClassifier);
    assert!(has_games(&entries));
    assert!(entries[0].is_seed());
    assert_eq!(entries[5].game_id, 506);

    let months = group_by_month(&entries);
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].count, 4);
    assert_eq!(months[0].starting_rating, 1500.0);
    assert_eq!(months[0].rating, 1541.0);
    assert!(!months[0].increase);
    assert_eq!(months[1].count, 1);
    assert!(months[1].increase);
    assert_eq!(max_games_in_a_month(&months), 4);
}

#[test]
fn test_history_export_to_daily_chart() {
    let rows = parse_history_tsv(&history_tsv()).unwrap();
    let days = group_by_day(&chronological(&rows, &HandicapAwareClassifier));

    assert_eq!(days.len(), 4);
    assert_eq!(days[0].count, 1);
    assert!(days[1].increase);

    let busy = &days[2];
    assert_eq!(busy.count, 3);
    assert_eq!(busy.starting_rating, 1540.0);
    assert_eq!(busy.rating, 1541.0);
    assert!(!busy.increase);

    assert!(days[3].increase);
}

#[test]
fn test_win_loss_split_honours_handicap() {
    let rows = parse_history_tsv(&history_tsv()).unwrap();
    let entries = chronological(&rows, &HandicapAwareClassifier);

    let summary = WinLossSummary::from(aggregate_index_range(&entries, 0, entries.len()).as_ref());
    assert_eq!(summary.games(), 5);
    // Nine stones do not close a 2400 gap, so game 504 is still a strong win
    assert_eq!(summary.strong_wins, 2);
    assert_eq!(summary.weak_wins, 1);
    assert_eq!(summary.strong_losses, 1);
    assert_eq!(summary.weak_losses, 1);

    let january = aggregate_time_range(
        &entries,
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
    );
    let january = WinLossSummary::from(january.as_ref());
    assert_eq!(january.games(), 4);
    assert_eq!(january.wins(), 2);
}

#[test]
fn test_rating_period_matches_reference_example() {
    let mut period = RatingPeriod::default();
    period.record(1, 2, 1.0);
    period.record(3, 1, 1.0);
    period.record(1, 4, 0.0);

    let snapshot = glickman_snapshot();
    let resolved = period.resolve(&snapshot);

    let player = resolved[&1];
    assert!((player.rating - 1464.06).abs() < 0.1);
    assert!((player.deviation - 151.52).abs() < 0.1);
    assert!((player.volatility - 0.05999).abs() < 1e-4);

    // Player 5 sat the period out
    assert_eq!(resolved[&5].rating, 1820.0);
    assert!(resolved[&5].deviation > 60.0);
    // Snapshot is untouched
    assert_eq!(snapshot[&1], Glicko2Entry::new(1500.0, 200.0, 0.06));
}

#[test]
fn test_glicko2_agrees_with_skillratings() {
    let player = Glicko2Entry::new(1500.0, 200.0, 0.06);
    let opponents = [
        (Glicko2Entry::new(1400.0, 30.0, 0.06), 1.0, Outcomes::WIN),
        (Glicko2Entry::new(1550.0, 100.0, 0.06), 0.0, Outcomes::LOSS),
        (Glicko2Entry::new(1700.0, 300.0, 0.06), 0.0, Outcomes::LOSS),
    ];

    let ours = glicko2_update(
        &player,
        &opponents
            .iter()
            .map(|(entry, score, _)| (*entry, *score))
            .collect::<Vec<_>>(),
    );

    let results: Vec<(Glicko2Rating, Outcomes)> = opponents
        .iter()
        .map(|(entry, _, outcome)| ((*entry).into(), *outcome))
        .collect();
    let theirs: Glicko2Entry = glicko2_rating_period(
        &player.into(),
        &results,
        &Glicko2Config {
            tau: 0.5,
            ..Default::default()
        },
    )
    .into();

    assert!((ours.rating - theirs.rating).abs() < 0.01);
    assert!((ours.deviation - theirs.deviation).abs() < 0.01);
    assert!((ours.volatility - theirs.volatility).abs() < 1e-5);
}

#[test]
fn test_calculator_is_consistent_with_period() {
    let black = Glicko2Entry::new(1500.0, 200.0, 0.06);
    let white = Glicko2Entry::new(1400.0, 30.0, 0.06);
    let preview = preview_match(&black, &white, 0);

    let mut period = RatingPeriod::default();
    period.record(1, 2, 1.0);
    let resolved = period.resolve(&std::collections::HashMap::from([(1, black), (2, white)]));

    assert_eq!(resolved[&1], preview.black_win);
    assert_eq!(resolved[&2], preview.white_loss);
}

#[test]
fn test_configured_bounds_flow_into_updates() {
    let config = AppConfig::from_toml(
        r#"
        [service]
        name = "ratings-test"
        log_level = "warn"

        [rating.glicko2]
        tao = 0.5
        min_rd = 120.0
        max_rd = 300.0
        "#,
    )
    .unwrap();

    let player = Glicko2Entry::new(1500.0, 150.0, 0.06).configure(config.rating.glicko2);
    let opponent = Glicko2Entry::new(1500.0, 150.0, 0.06).configure(config.rating.glicko2);

    // Many games would normally shrink the deviation far below the floor
    let games: Vec<(Glicko2Entry, f64)> = (0..40).map(|i| (opponent, (i % 2) as f64)).collect();
    let updated = glicko2_update(&player, &games);
    assert_eq!(updated.deviation, 120.0);

    let idle = Glicko2Entry::new(1500.0, 290.0, 0.06)
        .configure(config.rating.glicko2)
        .expand_deviation_because_no_games_played(500);
    assert!((idle.deviation - 300.0).abs() < 1e-9);
}
