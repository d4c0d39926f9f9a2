use crate::infra::{modes_or_all, parse_mode, InsightsService, ModeInsights};
use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use fairway_insights::analytics::overall::{ConsistencyLabel, ProjectionView};
use fairway_insights::analytics::{
    RoundHistoryImporter, RoundId, RoundRecord, ScoringMode, StrokesGainedBreakdown,
};
use fairway_insights::config::AppConfig;
use fairway_insights::error::AppError;
use fairway_insights::narrative::NarrativeCard;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct InsightsArgs {
    /// Round history CSV export
    #[arg(long)]
    pub(crate) rounds: PathBuf,
    /// Scoring mode (nine, eighteen, combined). Defaults to every mode.
    #[arg(long, value_parser = parse_mode)]
    pub(crate) mode: Option<ScoringMode>,
    /// Compute premium insights (full-history baseline, projections)
    #[arg(long)]
    pub(crate) premium: bool,
    /// Stable player identifier used to pick card wording
    #[arg(long, default_value = "cli-player")]
    pub(crate) seed: String,
    /// Rotate to alternate card wording
    #[arg(long, default_value_t = 0)]
    pub(crate) offset: u64,
    /// Print the payload as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Compute premium insights for the synthetic player
    #[arg(long)]
    pub(crate) premium: bool,
    /// Stable player identifier used to pick card wording
    #[arg(long)]
    pub(crate) seed: Option<String>,
    /// Rotate to alternate card wording
    #[arg(long, default_value_t = 0)]
    pub(crate) offset: u64,
}

pub(crate) fn run_insights(args: InsightsArgs) -> Result<(), AppError> {
    let InsightsArgs {
        rounds,
        mode,
        premium,
        seed,
        offset,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = InsightsService::from_config(&config.insights)?;
    let mut history = RoundHistoryImporter::from_path(&rounds)?;
    service.attach_strokes_gained(&mut history)?;

    let modes = modes_or_all(mode.map(|mode| vec![mode]));
    let payload = service.mode_insights(&history, &modes, premium, &seed, offset, Utc::now())?;

    if json {
        let rendered = serde_json::to_string_pretty(&payload).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "Round history: {} ({} rounds)",
        rounds.display(),
        history.len()
    );
    for entry in &payload {
        render_mode(entry);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        premium,
        seed,
        offset,
    } = args;
    let seed = seed.unwrap_or_else(|| "demo-player".to_string());

    let config = AppConfig::load()?;
    let service = InsightsService::from_config(&config.insights)?;
    let today = Utc::now().date_naive();
    let mut history = synthetic_history(today);
    service.attach_strokes_gained(&mut history)?;

    println!("Fairway insights demo");
    println!(
        "- {} weekly rounds | {} premium",
        history.len(),
        if premium { "with" } else { "without" }
    );

    let payload = service.mode_insights(
        &history,
        &ScoringMode::ordered(),
        premium,
        &seed,
        offset,
        Utc::now(),
    )?;
    for entry in &payload {
        render_mode(entry);
    }

    if let Some(latest) = history.iter().max_by_key(|round| round.played_on) {
        let cards = service.narrative().round_recap(latest, &seed, offset)?;
        println!(
            "\nPost-round recap for {} ({} holes, score {})",
            latest.played_on, latest.hole_count, latest.score
        );
        print_strokes_gained(&latest.strokes_gained);
        print_cards(&cards);
    }

    Ok(())
}

fn render_mode(entry: &ModeInsights) {
    let summary = &entry.summary;
    println!(
        "\n{} mode: {} rounds ({} recent, {} baseline) | confidence {}",
        summary.mode.label(),
        summary.total_rounds,
        summary.recent_rounds,
        summary.baseline_rounds,
        summary.confidence.label()
    );

    if let Some(index) = summary.handicap_index {
        println!("- Handicap index {index:.1}");
    }
    match (summary.score.recent_average, summary.score.delta) {
        (Some(recent), Some(delta)) => println!(
            "- Recent average {recent:.1} ({delta:+.1} vs baseline, {})",
            summary
                .score
                .trajectory
                .map(|trajectory| trajectory.label())
                .unwrap_or("no trend")
        ),
        (Some(recent), None) => println!("- Recent average {recent:.1}"),
        _ => println!("- No scores recorded"),
    }
    if summary.consistency.label != ConsistencyLabel::Insufficient {
        println!("- Consistency {}", summary.consistency.label.label());
    }
    match &summary.projection {
        ProjectionView::Available {
            horizon_rounds,
            score,
            ..
        } => println!(
            "- Projected score in {horizon_rounds} rounds: {:.1} ({:.1} to {:.1})",
            score.point, score.low, score.high
        ),
        ProjectionView::Gated { rounds_needed } => {
            println!("- Projection unlocks after {rounds_needed} more rounds")
        }
        ProjectionView::Locked { upgrade_prompt } => println!("- {upgrade_prompt}"),
    }
    if summary.flags.combined_mode_gated {
        println!("- Combined view needs more nine-hole rounds");
    }

    print_cards(&entry.cards);
}

fn print_strokes_gained(sg: &StrokesGainedBreakdown) {
    let Some(total) = sg.total else {
        let reason = sg.messages.first().map(String::as_str).unwrap_or("no handicap");
        println!("- Strokes gained unavailable: {reason}");
        return;
    };
    let part = |value: Option<f64>| {
        value
            .map(|value| format!("{value:+.2}"))
            .unwrap_or_else(|| "n/a".to_string())
    };
    println!(
        "- Strokes gained {total:+.2}: off tee {} | approach {} | putting {} | penalties {} | residual {}",
        part(sg.off_tee),
        part(sg.approach),
        part(sg.putting),
        part(sg.penalties),
        part(sg.residual)
    );
}

fn print_cards(cards: &[NarrativeCard]) {
    for card in cards {
        println!("  {}", card.text);
    }
}

/// Sixteen weekly rounds ending at `today`: an 18-hole player improving
/// from the low 90s who mixes in a nine-hole round every fourth week.
fn synthetic_history(today: NaiveDate) -> Vec<RoundRecord> {
    (0..16i64)
        .map(|week| {
            let played_on = today - Duration::weeks(15 - week);
            let drift = (week / 3) as u32;
            if week % 4 == 3 {
                RoundRecord {
                    id: RoundId(format!("demo-{week:02}")),
                    played_on,
                    hole_count: 9,
                    non_par3_holes: Some(7),
                    score: 46 - drift / 2,
                    to_par: None,
                    fairways_hit: Some(3),
                    fairways_possible: Some(7),
                    greens_hit: Some(3),
                    putts: Some(17),
                    penalties: Some(1),
                    course_rating: Some(35.6),
                    slope_rating: Some(121.0),
                    par: Some(36),
                    handicap_at_round: Some(16.8),
                    strokes_gained: StrokesGainedBreakdown::default(),
                }
            } else {
                RoundRecord {
                    id: RoundId(format!("demo-{week:02}")),
                    played_on,
                    hole_count: 18,
                    non_par3_holes: Some(14),
                    score: 93 - drift,
                    to_par: None,
                    fairways_hit: Some(6 + (week % 3) as u32),
                    fairways_possible: Some(14),
                    greens_hit: Some(5 + drift),
                    putts: Some(35 - (week % 2) as u32),
                    penalties: Some(if week < 8 { 3 } else { 1 }),
                    course_rating: Some(71.4),
                    slope_rating: Some(128.0),
                    par: Some(72),
                    handicap_at_round: Some(18.2 - week as f64 * 0.2),
                    strokes_gained: StrokesGainedBreakdown::default(),
                }
            }
        })
        .collect()
}
