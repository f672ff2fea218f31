//! Tunable constants of the scoring heuristic.
//!
//! A policy can be loaded from JSON; any omitted field keeps its default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Adjacency ratio assumed when no room declares any adjacency preference.
    ///
    /// An assumed value (50% by default), not one derived from the layout.
    pub neutral_adjacency_ratio: f64,
    pub compactness: CompactnessParams,
    /// Bonus awarded when the whole time limit is still left.
    pub max_time_bonus: f64,
    pub stars: StarThresholds,
    pub feedback: FeedbackThresholds,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            neutral_adjacency_ratio: 0.5,
            compactness: CompactnessParams::default(),
            max_time_bonus: 20.0,
            stars: StarThresholds::default(),
            feedback: FeedbackThresholds::default(),
        }
    }
}

/// `bonus = max(0, max_bonus - bounding_area / total_room_area * scale)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactnessParams {
    pub max_bonus: f64,
    pub scale: f64,
}

impl Default for CompactnessParams {
    fn default() -> Self {
        Self {
            max_bonus: 20.0,
            scale: 5.0,
        }
    }
}

/// Lowest efficiency (inclusive) earning each star count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarThresholds {
    pub one: f64,
    pub two: f64,
    pub three: f64,
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self {
            one: 60.0,
            two: 75.0,
            three: 90.0,
        }
    }
}

/// Values a score component must exceed (strictly) to trigger its feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackThresholds {
    pub excellent_adjacency: f64,
    pub good_adjacency: f64,
    pub compact_layout: f64,
    pub speed: f64,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            excellent_adjacency: 0.8,
            good_adjacency: 0.6,
            compact_layout: 15.0,
            speed: 10.0,
        }
    }
}
