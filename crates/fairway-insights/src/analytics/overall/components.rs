use super::sanitize::{finite, mean};
use super::views::ComponentDelta;
use crate::analytics::domain::{RoundRecord, SgComponent};
use crate::analytics::strokes_gained::round2;

/// Deltas closer than this are treated as tied and resolved by
/// [`SgComponent::measured`] order.
pub const LEAK_TIE_EPSILON: f64 = 0.05;
/// A component must lose at least this much before it counts as a leak.
pub const LEAK_THRESHOLD: f64 = -0.1;
pub const RESIDUAL_DOMINANT_MIN: f64 = 0.5;
pub const COMPONENT_SMALL: f64 = 0.25;

/// Per-component recent and baseline means. Deltas stay `None` unless
/// `comparable`, since a baseline made of the recent rounds has nothing to
/// compare against.
pub(crate) fn component_deltas(
    recent: &[&RoundRecord],
    baseline: &[&RoundRecord],
    comparable: bool,
) -> Vec<ComponentDelta> {
    SgComponent::ordered()
        .into_iter()
        .map(|component| {
            let recent_values = values_for(recent, component);
            let baseline_values = values_for(baseline, component);
            let recent_average = mean(&recent_values);
            let baseline_average = mean(&baseline_values);
            let delta = match (recent_average, baseline_average) {
                (Some(recent), Some(baseline)) if comparable => Some(round2(recent - baseline)),
                _ => None,
            };

            ComponentDelta {
                component,
                recent_average: recent_average.map(round2),
                baseline_average: baseline_average.map(round2),
                delta,
                recent_samples: recent_values.len(),
            }
        })
        .collect()
}

fn values_for(rounds: &[&RoundRecord], component: SgComponent) -> Vec<f64> {
    rounds
        .iter()
        .filter_map(|round| finite(round.strokes_gained.component(component)))
        .collect()
}

fn delta_of(deltas: &[ComponentDelta], component: SgComponent) -> Option<f64> {
    deltas
        .iter()
        .find(|entry| entry.component == component)
        .and_then(|entry| entry.delta)
}

fn measured_deltas(deltas: &[ComponentDelta]) -> Vec<(SgComponent, f64)> {
    SgComponent::measured()
        .into_iter()
        .filter_map(|component| delta_of(deltas, component).map(|delta| (component, delta)))
        .collect()
}

/// Most negative measured component, or `None` when nothing is losing
/// strokes. Near-ties go to the earlier component in tie-break order.
pub(crate) fn biggest_leak(deltas: &[ComponentDelta]) -> Option<SgComponent> {
    leak_among(&measured_deltas(deltas))
}

pub(crate) fn strongest_component(deltas: &[ComponentDelta]) -> Option<SgComponent> {
    strongest_among(&measured_deltas(deltas)).map(|(component, _)| component)
}

/// Leak selection over `(component, value)` pairs listed in tie-break order.
pub fn leak_among(values: &[(SgComponent, f64)]) -> Option<SgComponent> {
    let mut best: Option<(SgComponent, f64)> = None;
    for &(component, value) in values {
        if value > LEAK_THRESHOLD {
            continue;
        }
        best = match best {
            Some((_, current)) if value < current - LEAK_TIE_EPSILON => Some((component, value)),
            Some(existing) => Some(existing),
            None => Some((component, value)),
        };
    }
    best.map(|(component, _)| component)
}

pub fn strongest_among(values: &[(SgComponent, f64)]) -> Option<(SgComponent, f64)> {
    let mut best: Option<(SgComponent, f64)> = None;
    for &(component, value) in values {
        best = match best {
            Some((_, current)) if value > current + LEAK_TIE_EPSILON => Some((component, value)),
            Some(existing) => Some(existing),
            None => Some((component, value)),
        };
    }
    best
}

/// Residual swing outweighs the measured parts, either because they are all
/// small or because none were recorded.
pub(crate) fn residual_dominant(deltas: &[ComponentDelta]) -> bool {
    let Some(residual) = delta_of(deltas, SgComponent::Residual) else {
        return false;
    };
    if residual.abs() < RESIDUAL_DOMINANT_MIN {
        return false;
    }
    SgComponent::measured()
        .into_iter()
        .filter_map(|component| delta_of(deltas, component))
        .all(|delta| delta.abs() < COMPONENT_SMALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deltas(values: [(SgComponent, Option<f64>); 5]) -> Vec<ComponentDelta> {
        values
            .into_iter()
            .map(|(component, delta)| ComponentDelta {
                component,
                recent_average: delta,
                baseline_average: delta.map(|_| 0.0),
                delta,
                recent_samples: usize::from(delta.is_some()),
            })
            .collect()
    }

    fn round_with_putting(day: u32, putting: f64) -> RoundRecord {
        RoundRecord {
            id: crate::analytics::domain::RoundId(format!("r{day}")),
            played_on: chrono::NaiveDate::from_ymd_opt(2025, 5, day).expect("valid date"),
            hole_count: 18,
            non_par3_holes: Some(14),
            score: 88,
            to_par: None,
            fairways_hit: None,
            fairways_possible: None,
            greens_hit: None,
            putts: Some(33),
            penalties: None,
            course_rating: Some(72.0),
            slope_rating: Some(113.0),
            par: Some(72),
            handicap_at_round: Some(15.0),
            strokes_gained: crate::analytics::domain::StrokesGainedBreakdown {
                putting: Some(putting),
                ..Default::default()
            },
        }
    }

    #[test]
    fn deltas_need_a_baseline_beyond_the_recent_rounds() {
        let rounds: Vec<RoundRecord> = (1..=4)
            .map(|day| round_with_putting(day, -0.5 * f64::from(day)))
            .collect();
        let refs: Vec<&RoundRecord> = rounds.iter().collect();

        let same = component_deltas(&refs, &refs, false);
        let putting = same
            .iter()
            .find(|entry| entry.component == SgComponent::Putting)
            .expect("putting entry");
        assert_eq!(putting.recent_average, Some(-1.25));
        assert_eq!(putting.delta, None);
        assert!(same.iter().all(|entry| entry.delta.is_none()));
        assert_eq!(biggest_leak(&same), None);
        assert_eq!(strongest_component(&same), None);

        let extended = component_deltas(&refs[2..], &refs, true);
        assert_eq!(delta_of(&extended, SgComponent::Putting), Some(-0.5));
    }

    #[test]
    fn leak_prefers_tie_break_order_within_epsilon() {
        let entries = deltas([
            (SgComponent::OffTee, Some(-0.82)),
            (SgComponent::Approach, Some(-0.80)),
            (SgComponent::Putting, Some(-0.3)),
            (SgComponent::Penalties, Some(0.1)),
            (SgComponent::Residual, Some(-2.0)),
        ]);
        assert_eq!(biggest_leak(&entries), Some(SgComponent::Approach));
    }

    #[test]
    fn clearly_worse_component_wins_over_order() {
        let entries = deltas([
            (SgComponent::OffTee, Some(-1.2)),
            (SgComponent::Approach, Some(-0.8)),
            (SgComponent::Putting, None),
            (SgComponent::Penalties, None),
            (SgComponent::Residual, None),
        ]);
        assert_eq!(biggest_leak(&entries), Some(SgComponent::OffTee));
        assert_eq!(strongest_component(&entries), Some(SgComponent::Approach));
    }

    #[test]
    fn no_leak_when_everything_holds_steady() {
        let entries = deltas([
            (SgComponent::OffTee, Some(0.2)),
            (SgComponent::Approach, Some(-0.05)),
            (SgComponent::Putting, Some(0.0)),
            (SgComponent::Penalties, Some(0.3)),
            (SgComponent::Residual, Some(0.1)),
        ]);
        assert_eq!(biggest_leak(&entries), None);
        assert!(!residual_dominant(&entries));
    }

    #[test]
    fn residual_dominates_small_or_absent_components() {
        let small = deltas([
            (SgComponent::OffTee, Some(0.1)),
            (SgComponent::Approach, Some(-0.2)),
            (SgComponent::Putting, Some(0.05)),
            (SgComponent::Penalties, Some(0.0)),
            (SgComponent::Residual, Some(-1.4)),
        ]);
        assert!(residual_dominant(&small));

        let absent = deltas([
            (SgComponent::OffTee, None),
            (SgComponent::Approach, None),
            (SgComponent::Putting, None),
            (SgComponent::Penalties, None),
            (SgComponent::Residual, Some(0.9)),
        ]);
        assert!(residual_dominant(&absent));

        let loud = deltas([
            (SgComponent::OffTee, Some(0.1)),
            (SgComponent::Approach, Some(-0.9)),
            (SgComponent::Putting, None),
            (SgComponent::Penalties, None),
            (SgComponent::Residual, Some(-1.4)),
        ]);
        assert!(!residual_dominant(&loud));
    }
}
