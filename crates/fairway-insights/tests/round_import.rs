use fairway_insights::analytics::{
    normalize_rounds, BaselineTable, RoundHistoryImporter, ScoringMode, StrokesGainedCalculator,
    TeeContext,
};
use fairway_insights::narrative::{NarrativeEngine, Outcome};

const EXPORT: &str = "\
id,played_on,hole_count,score,to_par,fairways_hit,fairways_possible,greens_hit,putts,penalties,course_rating,slope_rating,par,non_par3_holes,handicap
front-9,2025-05-03,9,44,,4,7,4,17,1,35.8,118,36,7,12.0
full-1,2025-05-10,18,88,,7,14,8,33,1,72.0,113,72,14,12.0
full-2,2025-05-17,18,91,,6,14,6,35,2,72.0,113,72,14,12.0
back-9,2025-05-24,9,46,,3,7,3,18,0,36.1,121,36,7,12.0
";

#[test]
fn combined_mode_doubles_nine_hole_counts() {
    let rounds = RoundHistoryImporter::from_reader(EXPORT.as_bytes()).expect("export parses");
    let combined = normalize_rounds(&rounds, ScoringMode::Combined);

    assert_eq!(combined.len(), 4);
    let front = &combined[0];
    assert_eq!(front.hole_count, 18);
    assert_eq!(front.score, 88);
    assert_eq!(front.fairways_hit, Some(8));
    assert_eq!(front.fairways_possible, Some(14));
    assert_eq!(front.greens_hit, Some(8));
    assert_eq!(front.putts, Some(34));
    assert_eq!(front.penalties, Some(2));
    assert_eq!(front.slope_rating, Some(118.0));
    assert_eq!(front.handicap_at_round, Some(12.0));

    assert_eq!(combined[1], rounds[1]);
}

#[test]
fn single_length_modes_filter_by_hole_count() {
    let rounds = RoundHistoryImporter::from_reader(EXPORT.as_bytes()).expect("export parses");

    let nine = normalize_rounds(&rounds, ScoringMode::Nine);
    let ids: Vec<&str> = nine.iter().map(|round| round.id.0.as_str()).collect();
    assert_eq!(ids, vec!["front-9", "back-9"]);
    assert_eq!(nine[0].score, 44);

    let eighteen = normalize_rounds(&rounds, ScoringMode::Eighteen);
    assert!(eighteen.iter().all(|round| round.hole_count == 18));
    assert_eq!(eighteen.len(), 2);
    assert_eq!(eighteen[0].score, 88);
}

#[test]
fn imported_rounds_flow_into_a_recap() {
    let mut rounds = RoundHistoryImporter::from_reader(EXPORT.as_bytes()).expect("export parses");
    let table = BaselineTable::standard();
    let calculator = StrokesGainedCalculator::new(&table);

    for round in &mut rounds {
        let tee = TeeContext::from_round(round);
        calculator.apply(round, &tee).expect("strokes gained computes");
        let sg = &round.strokes_gained;
        assert!(sg.total.is_some(), "{}: {sg:?}", round.id.0);
        assert!(!sg.partial_analysis, "{}", round.id.0);
    }

    let cards = NarrativeEngine::new()
        .round_recap(&rounds[2], "player-42", 0)
        .expect("recap renders");
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].outcome.slot().key(), "round_result");
    assert!(matches!(
        cards[2].outcome,
        Outcome::Drill | Outcome::Tracking
    ));
}
