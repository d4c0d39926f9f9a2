//! Paraphrase tables keyed by outcome.
//!
//! Placeholders: `{recent}` `{delta}` `{per_round}` `{value}` `{label}`
//! `{signed}` `{evidence}` `{residual_context}` `{stat}` `{drill}`
//! `{instruction}` `{benefit}` `{goal}`. Evidence and residual context carry
//! their own leading separator and may be empty. Every card is at most two
//! sentences.

use super::plan::Outcome;

pub struct TemplateSet {
    pub outcome: Outcome,
    pub variants: &'static [&'static str],
    /// Plain copy used when every variant fails validation.
    pub fallback: &'static str,
}

pub static TEMPLATES: &[TemplateSet] = &[
    TemplateSet {
        outcome: Outcome::TrendImproving,
        variants: &[
            "Your recent scores average {recent}, {delta} strokes better than your longer-term baseline.",
            "You have trimmed {delta} strokes off your baseline, with recent rounds averaging {recent}.",
            "Your last few rounds are {delta} strokes lower than your usual, averaging {recent}.",
            "Nice trend: your recent average of {recent} beats your baseline by {delta} strokes.",
            "You are scoring {delta} strokes better than your baseline lately, at an average of {recent}.",
        ],
        fallback: "Your recent scores are better than your baseline.",
    },
    TemplateSet {
        outcome: Outcome::TrendStable,
        variants: &[
            "Your recent average of {recent} is within {delta} strokes of your baseline, so your scoring is holding steady.",
            "You are scoring right around your usual level, averaging {recent} lately.",
            "Your scores have stayed consistent, with recent rounds averaging {recent}.",
            "Steady form: your last few rounds average {recent}, close to your baseline.",
            "You are holding your level, with a recent average of {recent} against your baseline.",
        ],
        fallback: "Your scores are holding steady.",
    },
    TemplateSet {
        outcome: Outcome::TrendWorsening,
        variants: &[
            "Your recent scores average {recent}, {delta} strokes higher than your baseline.",
            "You have added {delta} strokes to your baseline over your last few rounds, averaging {recent}.",
            "Your last few rounds are running {delta} strokes above your usual, at an average of {recent}.",
            "Scores are up lately: your recent average of {recent} trails your baseline by {delta} strokes.",
            "You are scoring {delta} strokes worse than your baseline lately, at an average of {recent}.",
        ],
        fallback: "Your recent scores are above your baseline.",
    },
    TemplateSet {
        outcome: Outcome::TrendImprovingLately,
        variants: &[
            "Your scores have been trending down across your last few rounds, by about {per_round} strokes a round, and now average {recent}.",
            "You have lowered your score at roughly {per_round} strokes per round lately, with a recent average of {recent}.",
            "Your last few rounds show a steady move lower, about {per_round} strokes each time, averaging {recent}.",
            "Momentum is building: your scores are falling by about {per_round} strokes a round, with a recent average of {recent}.",
            "You are heading the right way, cutting about {per_round} strokes a round lately at an average of {recent}.",
        ],
        fallback: "Your scores have been trending lower over your last few rounds.",
    },
    TemplateSet {
        outcome: Outcome::TrendWorseningLately,
        variants: &[
            "Your scores have been trending up across your last few rounds, by about {per_round} strokes a round, and now average {recent}.",
            "You have added roughly {per_round} strokes per round lately, with a recent average of {recent}.",
            "Your last few rounds show a steady climb, about {per_round} strokes each time, averaging {recent}.",
            "Your scores are creeping up by about {per_round} strokes a round, with a recent average of {recent}.",
            "You are heading the wrong way lately, adding about {per_round} strokes a round at an average of {recent}.",
        ],
        fallback: "Your scores have been trending higher over your last few rounds.",
    },
    TemplateSet {
        outcome: Outcome::TrendInsufficient,
        variants: &[
            "Log a few more rounds and your scoring trend will appear here.",
            "You need a few more rounds before a reliable scoring trend shows up.",
            "Your scoring trend needs more rounds before it can be measured.",
            "Keep posting scores and you will see your trend take shape here.",
            "A couple more rounds will give you a trustworthy read on your scoring trend.",
        ],
        fallback: "Your scoring trend will appear after a few more rounds.",
    },
    TemplateSet {
        outcome: Outcome::RoundBetter,
        variants: &[
            "You beat the expected score for your handicap by {value} strokes.",
            "Your round came in {value} strokes better than a typical round at your handicap.",
            "You played {value} strokes better than expected on this course.",
            "Strong day: your score was {value} strokes under the expectation for your handicap.",
            "You finished {value} strokes ahead of the expected score for your handicap level.",
        ],
        fallback: "You scored better than expected for your handicap.",
    },
    TemplateSet {
        outcome: Outcome::RoundAsExpected,
        variants: &[
            "Your score landed within {value} strokes of the expectation for your handicap.",
            "You played right around the expected score for your handicap.",
            "Your round matched what your handicap predicts on this course.",
            "You scored close to expectation, within {value} strokes.",
            "This was a typical round for your handicap, within {value} strokes of expected.",
        ],
        fallback: "You scored about as expected for your handicap.",
    },
    TemplateSet {
        outcome: Outcome::RoundWorse,
        variants: &[
            "Your score was {value} strokes above the expectation for your handicap.",
            "You finished {value} strokes worse than expected on this course.",
            "Your round came in {value} strokes higher than a typical round at your handicap.",
            "Tough day: you were {value} strokes over the expected score for your handicap.",
            "You gave back {value} strokes against the expectation for your handicap.",
        ],
        fallback: "You scored above the expectation for your handicap.",
    },
    TemplateSet {
        outcome: Outcome::RoundUnavailable,
        variants: &[
            "Add your handicap to see how this round compares with expectation.",
            "Your round needs a handicap index before it can be compared with expectation.",
            "Once you have a handicap index, you will see how this round stacks up.",
            "You can compare this round with expectation after your handicap is set.",
            "Set your handicap index to unlock a comparison with your expected score.",
        ],
        fallback: "Your round needs a handicap before it can be compared.",
    },
    TemplateSet {
        outcome: Outcome::BestPositive,
        variants: &[
            "Your {label} is your strongest area, gaining {signed} strokes{evidence}.",
            "You are getting the most from your {label} at {signed} strokes{evidence}.",
            "Your {label} leads the way at {signed} strokes{evidence}.",
            "Best area right now: your {label}, at {signed} strokes{evidence}.",
            "Your {label} is carrying your game with {signed} strokes{evidence}.",
        ],
        fallback: "Your {label} is your strongest area right now.",
    },
    TemplateSet {
        outcome: Outcome::BestNeutral,
        variants: &[
            "Your {label} is your steadiest area, close to even at {signed} strokes{evidence}.",
            "You are holding your own with your {label} at {signed} strokes{evidence}.",
            "Your {label} is level with expectation at {signed} strokes{evidence}.",
            "Nothing is pulling ahead yet, but your {label} is your best area at {signed} strokes{evidence}.",
            "Your {label} is keeping pace at {signed} strokes{evidence}.",
        ],
        fallback: "Your {label} is your steadiest area right now.",
    },
    TemplateSet {
        outcome: Outcome::BestNegative,
        variants: &[
            "Even your best area, {label}, sits at {signed} strokes{evidence}, so there is room across your game.",
            "Your {label} is your best area right now at {signed} strokes{evidence}.",
            "Every area is behind your usual level, with your {label} closest at {signed} strokes{evidence}.",
            "Your {label} holds up best at {signed} strokes{evidence}.",
            "You are giving up the least with your {label}, at {signed} strokes{evidence}.",
        ],
        fallback: "Your {label} is holding up best right now.",
    },
    TemplateSet {
        outcome: Outcome::StrengthUnavailable,
        variants: &[
            "Your strengths will show up here once your rounds carry enough detail to compare.",
            "You will see your strongest area once there is enough round data behind it.",
            "Your best area needs more round data before it can be named.",
            "Keep posting complete rounds and your strongest area will appear here.",
            "Your strongest area stays hidden until your history has enough to compare.",
        ],
        fallback: "Your strongest area will appear once there is enough round data.",
    },
    TemplateSet {
        outcome: Outcome::Weakness,
        variants: &[
            "Your {label} is costing you the most at {signed} strokes{evidence}{residual_context}.",
            "The biggest leak in your game is {label}, at {signed} strokes{evidence}{residual_context}.",
            "You are losing the most ground with your {label}, at {signed} strokes{evidence}{residual_context}.",
            "Your {label} is where strokes are slipping away, at {signed} strokes{evidence}{residual_context}.",
            "Most of your lost strokes trace back to {label}, at {signed} strokes{evidence}{residual_context}.",
            "Your {label} is the weakest part of your game at {signed} strokes{evidence}{residual_context}.",
        ],
        fallback: "Your {label} is costing you the most strokes right now.",
    },
    TemplateSet {
        outcome: Outcome::ResidualDominant,
        variants: &[
            "Your short game is likely costing you about {signed} strokes, since your tracked stats look steady.",
            "With your tracked stats near normal, the missing {signed} strokes may be coming from your short game.",
            "You may be dropping strokes close to the hole, with {signed} unexplained by your tracked stats.",
            "Most of the {signed} stroke gap likely sits in your short game, since your tracked stats hold up.",
            "Your short game probably accounts for the {signed} strokes your tracked stats do not explain.",
            "The {signed} strokes outside your tracked stats likely point to your short game.",
        ],
        fallback: "Your short game is likely where your extra strokes are coming from.",
    },
    TemplateSet {
        outcome: Outcome::OpportunityNeutral,
        variants: &[
            "Your tracked areas are all close to your usual level, so there is no clear area to fix right now.",
            "You are holding steady across your tracked stats, with no area pulling away from the rest.",
            "Your game is balanced right now, with every tracked area near your normal level.",
            "Nothing in your tracked stats stands out from your usual level, so keep building on your routine.",
            "You have no standout gap in your tracked stats at the moment.",
        ],
        fallback: "Your tracked stats are close to your usual level.",
    },
    TemplateSet {
        outcome: Outcome::OpportunityPending,
        variants: &[
            "Your biggest opportunity will show up here once there is enough data to compare your areas.",
            "You will see which area to work on once your rounds can be compared.",
            "There is not enough comparison data yet to single out an area for you.",
            "Your next area to improve will be named here once your rounds can be measured against expectation.",
            "You do not have enough attributed rounds yet to point at one area of your game.",
        ],
        fallback: "Your biggest opportunity will show up once your rounds can be compared.",
    },
    TemplateSet {
        outcome: Outcome::ScoreOnly,
        variants: &[
            "You are logging scores only, so your game cannot be broken into areas yet.",
            "Your rounds carry a score but no stats, so there is no area to point to yet.",
            "With only your score recorded, there is not enough detail to single out an area.",
            "Your insights stay at the score level until your rounds include more stats.",
            "You have scores without stats so far, which keeps your breakdown at the total only.",
        ],
        fallback: "You are tracking scores only, so there is no area to single out yet.",
    },
    TemplateSet {
        outcome: Outcome::Drill,
        variants: &[
            "Focus your next practice on the {drill} drill: {instruction}. Doing this {benefit} ({goal}).",
            "Work on the {drill} drill in your next session: {instruction}. Regular practice here {benefit} ({goal}).",
            "Spend time on the {drill} drill before you play again: {instruction}. Each session {benefit} ({goal}).",
            "Make room for the {drill} drill in your practice: {instruction}. Repeating it {benefit} ({goal}).",
            "Prioritize the {drill} drill this week, where you {instruction}. That routine {benefit} ({goal}).",
            "Your best next move is to focus on the {drill} drill: {instruction}. This drill {benefit} ({goal}).",
        ],
        fallback: "Focus on the {drill} drill in your practice: {instruction}. It {benefit} ({goal}).",
    },
    TemplateSet {
        outcome: Outcome::Tracking,
        variants: &[
            "Start logging your {stat} every round so your insights can show where your scores come from.",
            "Track your {stat} on your next card to unlock a clearer breakdown of your rounds.",
            "Add your {stat} when you enter your next round so your breakdown gets sharper.",
            "Record your {stat} for the next few rounds and your insights will get more specific.",
            "Make a habit of noting your {stat} after each hole so you can see more than the final score.",
            "Keep a count of your {stat} next time out and start tracking it alongside your score.",
        ],
        fallback: "Track your {stat} next round to unlock a fuller breakdown.",
    },
    TemplateSet {
        outcome: Outcome::AddHandicap,
        variants: &[
            "Add your handicap index to your next round so you can see where your strokes come from.",
            "Set your handicap index before you post again to unlock a breakdown of your round.",
            "Enter your handicap with your next score and your recap will show which areas helped you.",
            "Once your handicap index is on file, your recaps will split your score into areas you can work on.",
            "Record your handicap index alongside your next round so you get a full breakdown.",
        ],
        fallback: "Add your handicap index to unlock a breakdown of your rounds.",
    },
    TemplateSet {
        outcome: Outcome::KeepPosting,
        variants: &[
            "Keep posting rounds with your usual stats so you can compare each area against your baseline.",
            "Play a few more rounds and log each one the same way to unlock your area-by-area comparison.",
            "Your next few rounds will give you a baseline to measure each part of your game against.",
            "Keep entering your rounds so your insights can compare recent play with your longer history.",
            "Post a few more rounds and you will see which area to practice next.",
        ],
        fallback: "Keep posting rounds so you can compare each area against your baseline.",
    },
];

pub fn template_set(outcome: Outcome) -> Option<&'static TemplateSet> {
    TEMPLATES.iter().find(|set| set.outcome == outcome)
}
