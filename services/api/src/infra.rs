use chrono::{DateTime, Utc};
use fairway_insights::analytics::{
    BaselineImporter, BaselineTable, OverallInsightsEngine, OverallInsightsSummary, RoundRecord,
    ScoringMode, StrokesGainedCalculator, TeeContext,
};
use fairway_insights::config::InsightsConfig;
use fairway_insights::error::AppError;
use fairway_insights::narrative::{NarrativeCard, NarrativeEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) insights: Arc<InsightsService>,
}

/// Summary plus rendered cards for one scoring mode.
#[derive(Debug, Serialize)]
pub(crate) struct ModeInsights {
    pub(crate) summary: OverallInsightsSummary,
    pub(crate) cards: Vec<NarrativeCard>,
}

/// Baseline table and engines shared by the HTTP routes and the CLI.
#[derive(Debug)]
pub(crate) struct InsightsService {
    baselines: BaselineTable,
    engine: OverallInsightsEngine,
    narrative: NarrativeEngine,
}

impl InsightsService {
    pub(crate) fn new(baselines: BaselineTable, engine: OverallInsightsEngine) -> Self {
        Self {
            baselines,
            engine,
            narrative: NarrativeEngine::new(),
        }
    }

    pub(crate) fn from_config(config: &InsightsConfig) -> Result<Self, AppError> {
        let baselines = match &config.baseline_csv {
            Some(path) => BaselineImporter::from_path(path)?,
            None => {
                info!("using standard handicap baseline table");
                BaselineTable::standard()
            }
        };
        Ok(Self::new(
            baselines,
            OverallInsightsEngine::new(config.policy.clone()),
        ))
    }

    pub(crate) fn baselines(&self) -> &BaselineTable {
        &self.baselines
    }

    pub(crate) fn narrative(&self) -> &NarrativeEngine {
        &self.narrative
    }

    /// Recompute stored strokes gained for every round against its own course fields.
    pub(crate) fn attach_strokes_gained(&self, rounds: &mut [RoundRecord]) -> Result<(), AppError> {
        let calculator = StrokesGainedCalculator::new(&self.baselines);
        for round in rounds.iter_mut() {
            let tee = TeeContext::from_round(round);
            calculator.apply(round, &tee)?;
        }
        Ok(())
    }

    pub(crate) fn mode_insights(
        &self,
        rounds: &[RoundRecord],
        modes: &[ScoringMode],
        premium: bool,
        seed: &str,
        offset: u64,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<ModeInsights>, AppError> {
        modes
            .iter()
            .map(|mode| {
                let summary = self.engine.summarize(rounds, *mode, premium, generated_at);
                let cards = self.narrative.summary_cards(&summary, seed, offset)?;
                Ok(ModeInsights { summary, cards })
            })
            .collect()
    }
}

pub(crate) fn parse_mode(raw: &str) -> Result<ScoringMode, String> {
    ScoringMode::parse(raw)
        .ok_or_else(|| format!("unknown scoring mode '{raw}' (expected nine, eighteen, or combined)"))
}

/// Requested modes, or every mode when none were named.
pub(crate) fn modes_or_all(modes: Option<Vec<ScoringMode>>) -> Vec<ScoringMode> {
    match modes {
        Some(modes) if !modes.is_empty() => modes,
        _ => ScoringMode::ordered().to_vec(),
    }
}
