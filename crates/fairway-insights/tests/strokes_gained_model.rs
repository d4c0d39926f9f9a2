use chrono::NaiveDate;
use fairway_insights::analytics::{
    BaselineTable, ConfidenceTier, RoundId, RoundRecord, StrokesGainedBreakdown,
    StrokesGainedCalculator, StrokesGainedError, TeeContext,
};

fn reference_round() -> RoundRecord {
    RoundRecord {
        id: RoundId("round-90".to_string()),
        played_on: NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date"),
        hole_count: 18,
        non_par3_holes: Some(14),
        score: 90,
        to_par: Some(18),
        fairways_hit: Some(7),
        fairways_possible: Some(14),
        greens_hit: Some(8),
        putts: Some(34),
        penalties: Some(2),
        course_rating: Some(72.0),
        slope_rating: Some(113.0),
        par: Some(72),
        handicap_at_round: Some(10.0),
        strokes_gained: StrokesGainedBreakdown::default(),
    }
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value present");
    assert!(
        (actual - expected).abs() < 0.011,
        "expected {expected}, got {actual}"
    );
}

fn parts_sum(result: &StrokesGainedBreakdown) -> f64 {
    [
        result.off_tee,
        result.approach,
        result.putting,
        result.penalties,
        result.residual,
    ]
    .iter()
    .flatten()
    .sum()
}

#[test]
fn reference_round_attribution() {
    let table = BaselineTable::standard();
    let calculator = StrokesGainedCalculator::new(&table);
    let round = reference_round();

    let result = calculator
        .compute(&round, &TeeContext::from_round(&round))
        .expect("strokes gained computes");

    assert_close(result.total, -5.4);
    assert_close(result.off_tee, 0.14);
    assert_close(result.approach, 0.73);
    assert_close(result.putting, 1.0);
    assert_close(result.penalties, 0.0);
    assert_close(result.residual, -7.27);
    assert_eq!(result.confidence, Some(ConfidenceTier::Low));
    assert!(!result.partial_analysis);
}

#[test]
fn components_always_sum_to_the_total() {
    let table = BaselineTable::standard();
    let calculator = StrokesGainedCalculator::new(&table);

    for handicap in [-4.0, 0.0, 7.5, 10.0, 22.3, 36.0, 54.0] {
        for score in [68u32, 84, 99, 121] {
            for (holes, rating, slope) in [(18u8, 72.0, 113.0), (18, 74.8, 141.0), (9, 35.1, 121.0)]
            {
                let mut round = reference_round();
                round.hole_count = holes;
                round.score = if holes == 9 { score / 2 } else { score };
                round.course_rating = Some(rating);
                round.slope_rating = Some(slope);
                round.par = Some(if holes == 9 { 36 } else { 72 });
                round.non_par3_holes = Some(if holes == 9 { 7 } else { 14 });
                round.fairways_possible = round.non_par3_holes.map(u32::from);
                round.handicap_at_round = Some(handicap);
                if score > 100 {
                    round.putts = None;
                }

                let result = calculator
                    .compute(&round, &TeeContext::from_round(&round))
                    .expect("computes");
                let total = result.total.expect("total present");
                assert!(
                    (parts_sum(&result) - total).abs() < 0.01,
                    "handicap {handicap} score {score} holes {holes}: {result:?}"
                );
            }
        }
    }
}

#[test]
fn missing_handicap_clears_every_value() {
    let table = BaselineTable::standard();
    let calculator = StrokesGainedCalculator::new(&table);
    let mut round = reference_round();
    round.handicap_at_round = None;

    let result = calculator
        .compute(&round, &TeeContext::from_round(&round))
        .expect("missing handicap is not an error");

    assert_eq!(result.total, None);
    assert_eq!(result.off_tee, None);
    assert_eq!(result.approach, None);
    assert_eq!(result.putting, None);
    assert_eq!(result.penalties, None);
    assert_eq!(result.residual, None);
    assert_eq!(result.confidence, None);
    assert!(result.partial_analysis);
}

#[test]
fn empty_baseline_table_is_raised() {
    let table = BaselineTable::from_rows(Vec::new());
    let calculator = StrokesGainedCalculator::new(&table);
    let round = reference_round();

    match calculator.compute(&round, &TeeContext::from_round(&round)) {
        Err(StrokesGainedError::EmptyBaselineTable) => {}
        other => panic!("expected empty baseline table error, got {other:?}"),
    }
}

#[test]
fn recomputing_a_round_is_idempotent() {
    let table = BaselineTable::standard();
    let calculator = StrokesGainedCalculator::new(&table);
    let mut round = reference_round();
    let tee = TeeContext::from_round(&round);

    calculator.apply(&mut round, &tee).expect("first pass");
    let first = round.strokes_gained.clone();
    calculator.apply(&mut round, &tee).expect("second pass");

    assert_eq!(round.strokes_gained, first);
    assert_eq!(
        calculator.compute(&round, &tee).expect("third pass"),
        first
    );
}

#[test]
fn untracked_stats_stay_null_and_fold_into_the_residual() {
    let table = BaselineTable::standard();
    let calculator = StrokesGainedCalculator::new(&table);
    let mut round = reference_round();
    round.fairways_hit = None;
    round.greens_hit = None;

    let result = calculator
        .compute(&round, &TeeContext::from_round(&round))
        .expect("computes");

    assert_eq!(result.off_tee, None);
    assert_eq!(result.approach, None);
    assert!(result.partial_analysis);
    assert_eq!(result.confidence, Some(ConfidenceTier::Low));
    assert_close(result.residual, -6.4);
}
