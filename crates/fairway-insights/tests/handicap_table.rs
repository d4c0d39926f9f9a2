use chrono::{Duration, NaiveDate};
use fairway_insights::analytics::handicap::lowest_count_and_adjustment;
use fairway_insights::analytics::{
    calculate_handicap, handicap_for_records, HandicapRound, RoundId, RoundRecord,
    StrokesGainedBreakdown,
};

/// Neutral-course round whose differential equals `differential`.
fn round_with_differential(differential: f64) -> HandicapRound {
    HandicapRound {
        score: 72.0 + differential,
        course_rating: Some(72.0),
        slope_rating: Some(113.0),
        par: Some(72.0),
    }
}

fn expected_index(differentials: &[f64], count: usize, adjustment: f64) -> f64 {
    let mut sorted = differentials.to_vec();
    sorted.sort_by(f64::total_cmp);
    let average = sorted[..count].iter().sum::<f64>() / count as f64;
    ((average + adjustment) * 10.0).round() / 10.0
}

#[test]
fn lowest_count_table_is_exact() {
    let table = [
        (3, 1, -2.0),
        (4, 1, -1.0),
        (5, 1, 0.0),
        (6, 2, -1.0),
        (7, 2, 0.0),
        (8, 2, 0.0),
        (9, 3, 0.0),
        (10, 3, 0.0),
        (11, 3, 0.0),
        (12, 4, 0.0),
        (13, 4, 0.0),
        (14, 4, 0.0),
        (15, 5, 0.0),
        (16, 5, 0.0),
        (17, 6, 0.0),
        (18, 6, 0.0),
        (19, 7, 0.0),
        (20, 8, 0.0),
    ];
    for (rounds, count, adjustment) in table {
        assert_eq!(
            lowest_count_and_adjustment(rounds),
            Some((count, adjustment)),
            "{rounds} rounds"
        );
    }
    assert_eq!(lowest_count_and_adjustment(2), None);
}

#[test]
fn every_round_count_from_three_to_nineteen_matches_the_table() {
    for rounds in 3..=19usize {
        let inputs: Vec<HandicapRound> = (0..rounds)
            .map(|idx| round_with_differential(6.0 + ((idx * 7) % 11) as f64 * 1.3))
            .collect();
        let differentials: Vec<f64> = inputs.iter().map(HandicapRound::differential).collect();
        let (count, adjustment) = lowest_count_and_adjustment(rounds).expect("row exists");

        let index = calculate_handicap(&inputs).expect("index for 3+ rounds");
        let expected = expected_index(&differentials, count, adjustment);
        assert!(
            (index - expected).abs() < 1e-9,
            "{rounds} rounds: expected {expected}, got {index}"
        );
    }
}

#[test]
fn only_the_most_recent_twenty_rounds_count() {
    let recent: Vec<HandicapRound> = (0..20)
        .map(|idx| round_with_differential(10.0 + idx as f64 * 0.5))
        .collect();
    let baseline = calculate_handicap(&recent).expect("index");

    let mut with_history: Vec<HandicapRound> =
        (0..15).map(|_| round_with_differential(-5.0)).collect();
    with_history.extend(recent.iter().copied());

    assert_eq!(calculate_handicap(&with_history), Some(baseline));
    assert_eq!(baseline, 11.8);
}

#[test]
fn stored_rounds_are_ordered_by_date_before_windowing() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 4).expect("valid date");
    let record = |offset: i64, score: u32| RoundRecord {
        id: RoundId(format!("r-{offset}")),
        played_on: start + Duration::days(offset),
        hole_count: 18,
        non_par3_holes: None,
        score,
        to_par: None,
        fairways_hit: None,
        fairways_possible: None,
        greens_hit: None,
        putts: None,
        penalties: None,
        course_rating: Some(72.0),
        slope_rating: Some(113.0),
        par: Some(72),
        handicap_at_round: None,
        strokes_gained: StrokesGainedBreakdown::default(),
    };

    // 21 rounds delivered newest first; the oldest one is a 70 that must drop out.
    let mut rounds: Vec<RoundRecord> = (1..=20).rev().map(|day| record(day, 90)).collect();
    rounds.push(record(0, 70));

    assert_eq!(handicap_for_records(&rounds), Some(18.0));
}

#[test]
fn slope_and_rating_shape_the_differential() {
    let hard = HandicapRound {
        score: 90.0,
        course_rating: Some(74.2),
        slope_rating: Some(136.0),
        par: Some(72.0),
    };
    let expected = (90.0 - 74.2) * 113.0 / 136.0;
    assert!((hard.differential() - expected).abs() < 1e-9);

    let rounds = [hard, hard, hard];
    let index = calculate_handicap(&rounds).expect("index");
    assert_eq!(index, ((expected - 2.0) * 10.0).round() / 10.0);
}
