use crate::analytics::domain::SgComponent;
use serde::Serialize;

/// Practice recommendation with a measurable completion criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Drill {
    pub name: &'static str,
    /// Imperative, lower-case clause that reads after a colon.
    pub instruction: &'static str,
    /// Verb phrase that completes "This drill ...".
    pub benefit: &'static str,
    /// `Goal:` criterion without closing punctuation, so it can sit inside
    /// the benefit sentence.
    pub goal: &'static str,
}

const OFF_TEE: &[Drill] = &[
    Drill {
        name: "fairway gates",
        instruction: "set two alignment sticks 30 yards apart on the range and hit ten tee shots through the gap",
        benefit: "helps you start more holes from the short grass",
        goal: "Goal: 7 of 10 tee shots finish inside the gate",
    },
    Drill {
        name: "three-club ladder",
        instruction: "hit three tee shots each with driver, hybrid, and your longest iron toward one fairway target",
        benefit: "builds a dependable club choice for tight holes",
        goal: "Goal: 6 of 9 balls finish in the target fairway",
    },
];

const APPROACH: &[Drill] = &[
    Drill {
        name: "target greens",
        instruction: "pick three green-sized targets at 100, 130, and 160 yards and hit three balls to each",
        benefit: "helps you find more greens from your usual approach distances",
        goal: "Goal: 5 of 9 balls finish on the target area",
    },
    Drill {
        name: "distance ladder",
        instruction: "hit five wedge shots, making each one carry 10 yards farther than the last",
        benefit: "sharpens the distance control your approach shots depend on",
        goal: "Goal: 4 of 5 balls land within 5 yards of the target number",
    },
];

const PUTTING: &[Drill] = &[
    Drill {
        name: "lag ladder",
        instruction: "roll putts from 10, 20, 30, and 40 feet and stop each one inside a three-foot circle",
        benefit: "helps you cut down on three-putts",
        goal: "Goal: 10 of 12 putts finish inside the circle",
    },
    Drill {
        name: "around the clock",
        instruction: "place six balls in a circle three feet from the hole and make each one in a row",
        benefit: "builds trust on the short putts that save pars",
        goal: "Goal: make all 6 in a row twice",
    },
];

const PENALTIES: &[Drill] = &[
    Drill {
        name: "safe-side targeting",
        instruction: "pick a target on the range, name the trouble on one side, and hit ten balls that start toward the safe side",
        benefit: "helps you keep big numbers off the card",
        goal: "Goal: 9 of 10 balls finish on the safe side of the target",
    },
    Drill {
        name: "recovery choice",
        instruction: "play nine practice holes and after every missed shot choose the punch-out that gets you back in play in one swing",
        benefit: "saves the strokes that come from forcing a hero shot",
        goal: "Goal: zero penalty strokes over nine practice holes",
    },
];

const SHORT_GAME: &[Drill] = &[
    Drill {
        name: "up-and-down challenge",
        instruction: "drop five balls in different lies within 20 yards of a hole and play each one until it is holed",
        benefit: "helps you turn near-misses into saved strokes",
        goal: "Goal: get 3 of 5 balls up and down",
    },
    Drill {
        name: "landing-spot chipping",
        instruction: "place a towel as a landing spot and chip ten balls from the fringe so each one lands on the towel",
        benefit: "builds the touch that keeps short shots close",
        goal: "Goal: land 6 of 10 balls on the towel",
    },
];

/// Drill library for one component. Residual maps to short-game work.
pub fn drills_for(component: SgComponent) -> &'static [Drill] {
    match component {
        SgComponent::OffTee => OFF_TEE,
        SgComponent::Approach => APPROACH,
        SgComponent::Putting => PUTTING,
        SgComponent::Penalties => PENALTIES,
        SgComponent::Residual => SHORT_GAME,
    }
}
