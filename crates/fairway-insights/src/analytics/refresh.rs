//! Refresh gating for stored insight snapshots.
//!
//! A snapshot is regenerated when it has never been generated, or when the
//! underlying rounds changed and the last generation happened in an earlier
//! ISO week (UTC). The content hash never feeds narrative variant selection.

use super::domain::RoundRecord;
use chrono::{DateTime, Datelike, Utc};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Stable hex digest over every round field that influences computed facts.
pub fn content_hash(rounds: &[RoundRecord], premium: bool) -> String {
    let mut ordered: Vec<&RoundRecord> = rounds.iter().collect();
    ordered.sort_by(|a, b| {
        a.played_on
            .cmp(&b.played_on)
            .then_with(|| a.id.0.cmp(&b.id.0))
    });

    let mut hasher = Sha256::new();
    hasher.update(if premium { b"premium\n" as &[u8] } else { b"free\n" });
    for round in ordered {
        hasher.update(fingerprint(round).as_bytes());
    }

    hasher
        .finalize()
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

fn fingerprint(round: &RoundRecord) -> String {
    let sg = &round.strokes_gained;
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}\n",
        round.id.0,
        round.played_on.format("%Y-%m-%d"),
        round.hole_count,
        round.score,
        opt(round.to_par),
        opt(round.fairways_hit),
        opt(round.greens_hit),
        opt(round.putts),
        opt(round.penalties),
        opt_f64(round.handicap_at_round),
        opt_f64(sg.total),
        opt_f64(sg.off_tee),
        opt_f64(sg.approach),
        opt_f64(sg.putting),
        opt_f64(sg.penalties),
        opt_f64(sg.residual),
    )
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

fn opt_f64(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}

/// At most one content-driven refresh per ISO week.
pub fn should_refresh(
    last_generated_at: Option<DateTime<Utc>>,
    previous_hash: Option<&str>,
    new_hash: &str,
    now: DateTime<Utc>,
) -> bool {
    let Some(last) = last_generated_at else {
        return true;
    };
    let changed = previous_hash != Some(new_hash);
    changed && iso_week(last) != iso_week(now)
}

fn iso_week(at: DateTime<Utc>) -> (i32, u32) {
    let week = at.iso_week();
    (week.year(), week.week())
}
