use crate::infra::{modes_or_all, AppState, ModeInsights};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use fairway_insights::analytics::handicap::RECENT_WINDOW;
use fairway_insights::analytics::{
    calculate_handicap, content_hash, should_refresh, HandicapRound, RoundRecord, RoundSegment,
    ScoringMode, StrokesGainedBreakdown, StrokesGainedCalculator, TeeContext, TeeSet,
};
use fairway_insights::error::AppError;
use fairway_insights::narrative::NarrativeCard;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct InsightsRequest {
    pub(crate) rounds: Vec<RoundRecord>,
    #[serde(default)]
    pub(crate) modes: Option<Vec<ScoringMode>>,
    #[serde(default)]
    pub(crate) premium: bool,
    pub(crate) seed: String,
    #[serde(default)]
    pub(crate) offset: u64,
    /// Recompute strokes gained from the course fields before aggregating.
    #[serde(default = "default_true")]
    pub(crate) recompute_strokes_gained: bool,
    #[serde(default)]
    pub(crate) generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InsightsResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) modes: Vec<ModeInsights>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HandicapRequest {
    /// Oldest first.
    pub(crate) rounds: Vec<HandicapRound>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HandicapResponse {
    pub(crate) handicap_index: Option<f64>,
    pub(crate) rounds_considered: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StrokesGainedRequest {
    pub(crate) round: RoundRecord,
    /// Published tee data; the round's own course fields are used when absent.
    #[serde(default)]
    pub(crate) tee: Option<TeeSet>,
    #[serde(default)]
    pub(crate) segment: Option<RoundSegment>,
    pub(crate) seed: String,
    #[serde(default)]
    pub(crate) offset: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct StrokesGainedResponse {
    pub(crate) strokes_gained: StrokesGainedBreakdown,
    pub(crate) cards: Vec<NarrativeCard>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefreshRequest {
    pub(crate) rounds: Vec<RoundRecord>,
    #[serde(default)]
    pub(crate) premium: bool,
    #[serde(default)]
    pub(crate) last_generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) previous_hash: Option<String>,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshResponse {
    pub(crate) content_hash: String,
    pub(crate) refresh: bool,
}

fn default_true() -> bool {
    true
}

pub(crate) fn insights_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/insights", post(insights_endpoint))
        .route("/api/v1/handicap", post(handicap_endpoint))
        .route("/api/v1/strokes-gained", post(strokes_gained_endpoint))
        .route("/api/v1/refresh", post(refresh_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn insights_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<InsightsRequest>,
) -> Result<Json<InsightsResponse>, AppError> {
    let InsightsRequest {
        mut rounds,
        modes,
        premium,
        seed,
        offset,
        recompute_strokes_gained,
        generated_at,
    } = payload;

    if recompute_strokes_gained {
        state.insights.attach_strokes_gained(&mut rounds)?;
    }

    let generated_at = generated_at.unwrap_or_else(Utc::now);
    let modes = state.insights.mode_insights(
        &rounds,
        &modes_or_all(modes),
        premium,
        &seed,
        offset,
        generated_at,
    )?;

    Ok(Json(InsightsResponse {
        generated_at,
        modes,
    }))
}

pub(crate) async fn handicap_endpoint(
    Json(payload): Json<HandicapRequest>,
) -> Json<HandicapResponse> {
    let handicap_index = calculate_handicap(&payload.rounds);
    Json(HandicapResponse {
        handicap_index,
        rounds_considered: payload.rounds.len().min(RECENT_WINDOW),
    })
}

pub(crate) async fn strokes_gained_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<StrokesGainedRequest>,
) -> Result<Json<StrokesGainedResponse>, AppError> {
    let StrokesGainedRequest {
        mut round,
        tee,
        segment,
        seed,
        offset,
    } = payload;

    let context = match tee {
        Some(tee) => TeeContext::resolve(&tee, segment.unwrap_or(RoundSegment::Full))?,
        None => TeeContext::from_round(&round),
    };
    StrokesGainedCalculator::new(state.insights.baselines()).apply(&mut round, &context)?;
    let cards = state.insights.narrative().round_recap(&round, &seed, offset)?;

    Ok(Json(StrokesGainedResponse {
        strokes_gained: round.strokes_gained,
        cards,
    }))
}

pub(crate) async fn refresh_endpoint(Json(payload): Json<RefreshRequest>) -> Json<RefreshResponse> {
    let hash = content_hash(&payload.rounds, payload.premium);
    let refresh = should_refresh(
        payload.last_generated_at,
        payload.previous_hash.as_deref(),
        &hash,
        payload.now.unwrap_or_else(Utc::now),
    );
    Json(RefreshResponse {
        content_hash: hash,
        refresh,
    })
}
