//! Levels bundled with the game.

use super::{
    geometry::GridSize,
    level::{Difficulty, LevelDefinition},
    room::{Footprint, RoomCategory, RoomId, RoomSpec},
};

fn room(
    id: &str,
    name: &str,
    category: RoomCategory,
    (width, height): (u16, u16),
    area: u32,
    priority: u32,
    connections: &[&str],
) -> RoomSpec {
    RoomSpec {
        id: RoomId::new(id),
        name: name.to_owned(),
        category,
        footprint: Footprint::new(width, height),
        area,
        priority,
        connections: connections.iter().copied().map(RoomId::from).collect(),
    }
}

fn hints(hints: &[&str]) -> Vec<String> {
    hints.iter().map(|&hint| hint.to_owned()).collect()
}

/// Returns every built-in level, ordered by id.
#[must_use]
pub fn builtin_levels() -> Vec<LevelDefinition> {
    use RoomCategory::{Living, Private, Service};

    vec![
        LevelDefinition {
            id: 1,
            title: "Starter Cabin".to_owned(),
            difficulty: Difficulty::Beginner,
            description: "Build your first 3-room cabin layout".to_owned(),
            grid: GridSize::new(8, 6),
            time_limit: 300,
            target_score: 75.0,
            xp_reward: 150,
            hints: hints(&[
                "Place the Kitchen near the Living area for easy access",
                "Keep the Bathroom private but accessible",
                "Try to create a compact, efficient layout",
            ]),
            rooms: vec![
                room("living", "Living Room", Living, (3, 2), 200, 5, &["kitchen"]),
                room("kitchen", "Kitchen", Service, (2, 2), 120, 4, &["living"]),
                room("bathroom", "Bathroom", Private, (2, 1), 60, 3, &[]),
            ],
        },
        LevelDefinition {
            id: 2,
            title: "Family Home".to_owned(),
            difficulty: Difficulty::Intermediate,
            description: "Design a comfortable 5-room family layout".to_owned(),
            grid: GridSize::new(10, 8),
            time_limit: 420,
            target_score: 80.0,
            xp_reward: 250,
            hints: hints(&[
                "Create separate public and private zones",
                "Connect Kitchen to both Living and Dining areas",
                "Place Bedroom away from noisy common areas",
            ]),
            rooms: vec![
                room(
                    "living",
                    "Living Room",
                    Living,
                    (3, 3),
                    240,
                    5,
                    &["kitchen", "dining"],
                ),
                room(
                    "kitchen",
                    "Kitchen",
                    Service,
                    (3, 2),
                    150,
                    4,
                    &["living", "dining"],
                ),
                room(
                    "dining",
                    "Dining Room",
                    Living,
                    (2, 2),
                    120,
                    3,
                    &["kitchen", "living"],
                ),
                room("bedroom", "Bedroom", Private, (3, 2), 180, 4, &["bathroom"]),
                room("bathroom", "Bathroom", Private, (2, 2), 80, 3, &["bedroom"]),
            ],
        },
    ]
}

/// Looks up `id` in `levels`, falling back to the first level when it is unknown.
#[must_use]
pub fn find_level(levels: &[LevelDefinition], id: u32) -> Option<&LevelDefinition> {
    levels
        .iter()
        .find(|level| level.id == id)
        .or_else(|| levels.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 2);
        for level in &levels {
            assert_eq!(level.validate(), Ok(()), "level {}", level.id);
        }
    }

    #[test]
    fn test_find_level_falls_back_to_first() {
        let levels = builtin_levels();
        assert_eq!(find_level(&levels, 2).map(|l| l.id), Some(2));
        assert_eq!(find_level(&levels, 99).map(|l| l.id), Some(1));
        assert!(find_level(&[], 1).is_none());
    }
}
