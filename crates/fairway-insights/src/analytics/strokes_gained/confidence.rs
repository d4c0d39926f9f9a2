use crate::analytics::domain::ConfidenceTier;

/// Residual magnitude per 18 holes for the high and medium bands.
pub const RESIDUAL_HIGH_PER_18: f64 = 3.0;
pub const RESIDUAL_MEDIUM_PER_18: f64 = 5.0;
/// Missed greens as a share of played holes.
pub const SHORT_GAME_HIGH_SHARE: f64 = 0.50;
pub const SHORT_GAME_MEDIUM_SHARE: f64 = 0.72;
/// Putting attribution as a share of its cap.
pub const PUTTING_HIGH_SHARE: f64 = 0.50;
pub const PUTTING_MEDIUM_SHARE: f64 = 0.80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Band {
    Fail,
    Medium,
    High,
}

fn band(value: f64, high: f64, medium: f64) -> Band {
    if value <= high {
        Band::High
    } else if value <= medium {
        Band::Medium
    } else {
        Band::Fail
    }
}

/// Full-precision values the tiering inspects.
pub(crate) struct ConfidenceSignals {
    pub played_holes: f64,
    pub residual: f64,
    pub putting: f64,
    pub putting_cap: f64,
    pub greens_hit: f64,
}

/// Tier a fully-tracked round and explain anything that held it back.
pub(crate) fn assess(signals: &ConfidenceSignals) -> (ConfidenceTier, Vec<String>) {
    let scale = signals.played_holes / 18.0;
    let opportunities = (signals.played_holes - signals.greens_hit).max(0.0);
    let opportunity_share = if signals.played_holes > 0.0 {
        opportunities / signals.played_holes
    } else {
        1.0
    };
    let putting_share = if signals.putting_cap > 0.0 {
        signals.putting.abs() / signals.putting_cap
    } else {
        0.0
    };

    let residual = band(
        signals.residual.abs(),
        RESIDUAL_HIGH_PER_18 * scale,
        RESIDUAL_MEDIUM_PER_18 * scale,
    );
    let short_game = band(
        opportunity_share,
        SHORT_GAME_HIGH_SHARE,
        SHORT_GAME_MEDIUM_SHARE,
    );
    let putting = band(putting_share, PUTTING_HIGH_SHARE, PUTTING_MEDIUM_SHARE);

    if residual == Band::High && short_game == Band::High && putting == Band::High {
        return (ConfidenceTier::High, Vec::new());
    }

    let medium = residual == Band::High
        || (residual == Band::Medium && short_game >= Band::Medium && putting >= Band::Medium);

    if medium {
        let mut messages = Vec::new();
        if residual != Band::High {
            messages.push(format!(
                "Unexplained strokes of {:.2} sit outside the high-confidence band",
                signals.residual
            ));
        }
        if short_game != Band::High {
            messages.push(format!(
                "{:.0} short-game opportunities widen the range of likely outcomes",
                opportunities
            ));
        }
        if putting != Band::High {
            let direction = if signals.putting >= 0.0 {
                "positive"
            } else {
                "negative"
            };
            messages.push(format!(
                "Putting estimate of {:+.2} is skewed {direction} relative to expectation",
                signals.putting
            ));
        }
        return (ConfidenceTier::Medium, messages);
    }

    (
        ConfidenceTier::Low,
        vec![format!(
            "Residual of {:.2} strokes with putting at {:+.2} and {:.0} short-game opportunities leaves too much unexplained",
            signals.residual, signals.putting, opportunities
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(residual: f64, putting: f64, greens_hit: f64) -> ConfidenceSignals {
        ConfidenceSignals {
            played_holes: 18.0,
            residual,
            putting,
            putting_cap: 4.0,
            greens_hit,
        }
    }

    #[test]
    fn all_checks_in_high_band_are_high() {
        let (tier, messages) = assess(&signals(1.2, 0.8, 10.0));
        assert_eq!(tier, ConfidenceTier::High);
        assert!(messages.is_empty());
    }

    #[test]
    fn residual_pass_with_degraded_putting_is_medium() {
        let (tier, messages) = assess(&signals(-2.0, -3.5, 10.0));
        assert_eq!(tier, ConfidenceTier::Medium);
        assert!(messages.iter().any(|message| message.contains("negative")));
    }

    #[test]
    fn medium_residual_needs_other_checks_at_medium() {
        let (tier, _) = assess(&signals(4.0, 1.0, 7.0));
        assert_eq!(tier, ConfidenceTier::Medium);

        let (tier, _) = assess(&signals(4.0, 1.0, 2.0));
        assert_eq!(tier, ConfidenceTier::Low);
    }

    #[test]
    fn large_residual_is_low_and_cites_numbers() {
        let (tier, messages) = assess(&signals(-7.27, 1.0, 8.0));
        assert_eq!(tier, ConfidenceTier::Low);
        assert!(messages[0].contains("-7.27"));
        assert!(messages[0].contains("10 short-game opportunities"));
    }
}
