//! Combines adjacency, compactness and remaining time into a layout score.
//!
//! ```text
//! efficiency = clamp(adjacency_ratio * 100 + compactness_bonus + time_bonus, 0, 100)
//! ```
//!
//! A layout with any room still unplaced is not scored at all: it gets efficiency `0`,
//! zero stars and a single "not all rooms were placed" message.

use roomcraft_engine::{
    LayoutScorer, LevelDefinition, RoomBlock, ScoreBreakdown, ScoreResult, Stars,
};

use crate::{
    adjacency::{adjacency_ratio, score_adjacency},
    compactness::score_compactness,
    policy::{ScoringPolicy, StarThresholds},
};

pub const EXCELLENT_FLOW_MESSAGE: &str = "Excellent room connections! Great flow design.";
pub const GOOD_FLOW_MESSAGE: &str = "Good room placement, but some connections could be improved.";
pub const POOR_FLOW_MESSAGE: &str = "Focus on connecting related rooms for better flow.";
pub const COMPACT_MESSAGE: &str = "Efficient use of space - compact and well-organized!";
pub const SPEED_MESSAGE: &str = "Speed bonus earned! Quick and efficient building.";
pub const INCOMPLETE_MESSAGE: &str =
    "Not all rooms were placed - complete the layout for full points";

/// The standard [`LayoutScorer`].
#[derive(Debug, Clone, Default)]
pub struct LayoutEvaluator {
    policy: ScoringPolicy,
}

impl LayoutEvaluator {
    #[must_use]
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Scores `rooms` as laid out for `level`.
    ///
    /// Pure: the same inputs always give the same result.
    #[must_use]
    pub fn evaluate(
        &self,
        level: &LevelDefinition,
        rooms: &[RoomBlock],
        time_remaining_secs: u32,
    ) -> ScoreResult {
        if rooms.iter().any(|room| !room.is_placed()) {
            return ScoreResult::incomplete(INCOMPLETE_MESSAGE);
        }

        let adjacency = score_adjacency(rooms);
        let ratio = adjacency_ratio(adjacency, self.policy.neutral_adjacency_ratio);
        let compactness_bonus = score_compactness(rooms, self.policy.compactness);
        let time_bonus = self.time_bonus(time_remaining_secs, level.time_limit);

        let efficiency = (ratio * 100.0 + compactness_bonus + time_bonus).clamp(0.0, 100.0);
        let breakdown = ScoreBreakdown {
            adjacency,
            adjacency_ratio: ratio,
            compactness_bonus,
            time_bonus,
        };

        ScoreResult::new(
            efficiency,
            stars_for(efficiency, self.policy.stars),
            efficiency >= level.target_score,
            self.feedback(&breakdown),
            Some(breakdown),
        )
    }

    /// Share of the time limit still left, scaled to the maximum time bonus.
    #[must_use]
    pub fn time_bonus(&self, time_remaining_secs: u32, time_limit_secs: u32) -> f64 {
        if time_limit_secs == 0 {
            return 0.0;
        }
        let fraction = f64::from(time_remaining_secs) / f64::from(time_limit_secs);
        fraction.clamp(0.0, 1.0) * self.policy.max_time_bonus
    }

    fn feedback(&self, breakdown: &ScoreBreakdown) -> Vec<String> {
        let thresholds = self.policy.feedback;
        let flow = if breakdown.adjacency_ratio > thresholds.excellent_adjacency {
            EXCELLENT_FLOW_MESSAGE
        } else if breakdown.adjacency_ratio > thresholds.good_adjacency {
            GOOD_FLOW_MESSAGE
        } else {
            POOR_FLOW_MESSAGE
        };

        let mut feedback = vec![flow.to_owned()];
        if breakdown.compactness_bonus > thresholds.compact_layout {
            feedback.push(COMPACT_MESSAGE.to_owned());
        }
        if breakdown.time_bonus > thresholds.speed {
            feedback.push(SPEED_MESSAGE.to_owned());
        }
        feedback
    }
}

impl LayoutScorer for LayoutEvaluator {
    fn score(
        &self,
        level: &LevelDefinition,
        rooms: &[RoomBlock],
        time_remaining_secs: u32,
    ) -> ScoreResult {
        self.evaluate(level, rooms, time_remaining_secs)
    }
}

/// Maps an efficiency to its star band. Thresholds are inclusive lower bounds.
#[must_use]
pub fn stars_for(efficiency: f64, thresholds: StarThresholds) -> Stars {
    if efficiency >= thresholds.three {
        Stars::THREE
    } else if efficiency >= thresholds.two {
        Stars::TWO
    } else if efficiency >= thresholds.one {
        Stars::ONE
    } else {
        Stars::ZERO
    }
}

#[cfg(test)]
mod tests {
    use roomcraft_engine::{
        AdjacencyTally, Difficulty, Footprint, GridSize, RoomCategory, RoomSpec, builtin_levels,
    };

    use super::*;

    fn spec(id: &str, (w, h): (u16, u16), priority: u32, wants: &[&str]) -> RoomSpec {
        RoomSpec {
            id: id.into(),
            name: id.to_owned(),
            category: RoomCategory::Living,
            footprint: Footprint::new(w, h),
            area: u32::from(w * h) * 20,
            priority,
            connections: wants.iter().copied().map(Into::into).collect(),
        }
    }

    fn two_room_level() -> LevelDefinition {
        LevelDefinition {
            id: 9,
            title: "Pair".to_owned(),
            difficulty: Difficulty::Beginner,
            description: String::new(),
            grid: GridSize::new(4, 4),
            time_limit: 100,
            target_score: 75.0,
            xp_reward: 100,
            hints: vec![],
            rooms: vec![
                spec("a", (2, 2), 5, &["b"]),
                spec("b", (2, 1), 5, &["a"]),
            ],
        }
    }

    fn blocks(level: &LevelDefinition) -> Vec<RoomBlock> {
        level.rooms.iter().cloned().map(RoomBlock::new).collect()
    }

    #[test]
    fn test_side_by_side_rooms_score_full_marks() {
        let level = two_room_level();
        let mut rooms = blocks(&level);
        rooms[0] = rooms[0].clone().placed_at(0, 0);
        rooms[1] = rooms[1].clone().placed_at(2, 0);

        let result = LayoutEvaluator::default().evaluate(&level, &rooms, 0);
        let breakdown = result.breakdown().unwrap();
        assert_eq!(
            (breakdown.adjacency.achieved, breakdown.adjacency.possible),
            (10, 10)
        );
        assert!((result.efficiency() - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.stars(), Stars::THREE);
        assert!(result.passed());
        assert_eq!(result.feedback()[0], EXCELLENT_FLOW_MESSAGE);
    }

    #[test]
    fn test_separated_rooms_lose_adjacency() {
        let level = two_room_level();
        let mut rooms = blocks(&level);
        rooms[0] = rooms[0].clone().placed_at(0, 0);
        rooms[1] = rooms[1].clone().placed_at(0, 3);

        let result = LayoutEvaluator::default().evaluate(&level, &rooms, 0);
        let breakdown = result.breakdown().unwrap();
        assert_eq!(breakdown.adjacency.achieved, 0);
        assert!(breakdown.adjacency_ratio.abs() < f64::EPSILON);
        // only the compactness bonus remains: 20 - 8 / 120 * 5
        assert!((result.efficiency() - (20.0 - 8.0 / 120.0 * 5.0)).abs() < 1e-9);
        assert_eq!(result.stars(), Stars::ZERO);
        assert!(!result.passed());
        assert_eq!(
            result.feedback(),
            [POOR_FLOW_MESSAGE.to_owned(), COMPACT_MESSAGE.to_owned()]
        );
    }

    #[test]
    fn test_incomplete_layout_is_not_scored() {
        let level = two_room_level();
        let mut rooms = blocks(&level);
        rooms[0] = rooms[0].clone().placed_at(0, 0);

        let result = LayoutEvaluator::default().evaluate(&level, &rooms, 100);
        assert!(result.efficiency().abs() < f64::EPSILON);
        assert_eq!(result.stars(), Stars::ZERO);
        assert!(!result.passed());
        assert_eq!(result.feedback(), [INCOMPLETE_MESSAGE.to_owned()]);
        assert!(result.breakdown().is_none());
    }

    #[test]
    fn test_layout_without_preferences_uses_neutral_ratio() {
        let mut level = two_room_level();
        for room in &mut level.rooms {
            room.connections.clear();
        }
        let mut rooms = blocks(&level);
        rooms[0] = rooms[0].clone().placed_at(0, 0);
        rooms[1] = rooms[1].clone().placed_at(2, 0);

        // 0.5 is an assumed neutral value, not something the layout earned.
        let result = LayoutEvaluator::default().evaluate(&level, &rooms, 0);
        let breakdown = result.breakdown().unwrap();
        assert!((breakdown.adjacency_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(result.feedback()[0], POOR_FLOW_MESSAGE);

        let strict = LayoutEvaluator::new(ScoringPolicy {
            neutral_adjacency_ratio: 0.0,
            ..ScoringPolicy::default()
        });
        let breakdown = *strict.evaluate(&level, &rooms, 0).breakdown().unwrap();
        assert!(breakdown.adjacency_ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn test_time_bonus() {
        let evaluator = LayoutEvaluator::default();
        assert!((evaluator.time_bonus(300, 300) - 20.0).abs() < f64::EPSILON);
        assert!((evaluator.time_bonus(150, 300) - 10.0).abs() < f64::EPSILON);
        assert!(evaluator.time_bonus(0, 300).abs() < f64::EPSILON);
        assert!((evaluator.time_bonus(500, 300) - 20.0).abs() < f64::EPSILON);
        assert!(evaluator.time_bonus(10, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_star_band_boundaries() {
        let thresholds = StarThresholds::default();
        assert_eq!(stars_for(59.9, thresholds), Stars::ZERO);
        assert_eq!(stars_for(60.0, thresholds), Stars::ONE);
        assert_eq!(stars_for(74.9, thresholds), Stars::ONE);
        assert_eq!(stars_for(75.0, thresholds), Stars::TWO);
        assert_eq!(stars_for(89.9, thresholds), Stars::TWO);
        assert_eq!(stars_for(90.0, thresholds), Stars::THREE);
        assert_eq!(stars_for(100.0, thresholds), Stars::THREE);
    }

    #[test]
    fn test_feedback_thresholds_are_strict() {
        let evaluator = LayoutEvaluator::default();
        let breakdown = |ratio, compactness, time| ScoreBreakdown {
            adjacency: AdjacencyTally::default(),
            adjacency_ratio: ratio,
            compactness_bonus: compactness,
            time_bonus: time,
        };
        assert_eq!(
            evaluator.feedback(&breakdown(0.8, 15.0, 10.0)),
            [GOOD_FLOW_MESSAGE.to_owned()]
        );
        assert_eq!(
            evaluator.feedback(&breakdown(0.6, 15.1, 10.1)),
            [
                POOR_FLOW_MESSAGE.to_owned(),
                COMPACT_MESSAGE.to_owned(),
                SPEED_MESSAGE.to_owned()
            ]
        );
    }

    #[test]
    fn test_builtin_level_scores_through_trait_object() {
        let level = &builtin_levels()[0];
        let scorer: Box<dyn LayoutScorer> = Box::new(LayoutEvaluator::default());
        let mut rooms = blocks(level);
        rooms[0] = rooms[0].clone().placed_at(0, 0); // living 3x2
        rooms[1] = rooms[1].clone().placed_at(3, 0); // kitchen 2x2
        rooms[2] = rooms[2].clone().placed_at(0, 2); // bathroom 2x1

        let result = scorer.score(level, &rooms, level.time_limit);
        let breakdown = result.breakdown().unwrap();
        assert_eq!(
            (breakdown.adjacency.achieved, breakdown.adjacency.possible),
            (9, 9)
        );
        assert!((breakdown.time_bonus - 20.0).abs() < f64::EPSILON);
        assert_eq!(result.stars(), Stars::THREE);
        assert!(result.passed());
    }
}
