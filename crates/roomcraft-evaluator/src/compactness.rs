//! Compactness evaluation: rewards layouts whose placed rooms sit close together.

use roomcraft_engine::{Rect, RoomBlock};

use crate::policy::CompactnessParams;

/// Smallest rectangle enclosing every placed room, or `None` when nothing is placed.
#[must_use]
pub fn bounding_rect<'a>(rooms: impl IntoIterator<Item = &'a RoomBlock>) -> Option<Rect> {
    rooms
        .into_iter()
        .filter_map(RoomBlock::rect)
        .reduce(Rect::union)
}

/// Computes the compactness bonus of the placed rooms.
///
/// The bonus is `max(0, max_bonus - bounding_area / total_room_area * scale)`, where
/// `bounding_area` is measured in grid cells and `total_room_area` is the sum of the
/// rooms' nominal areas. Returns `0` when no room is placed or the rooms have no area.
#[must_use]
pub fn score_compactness<'a>(
    rooms: impl IntoIterator<Item = &'a RoomBlock>,
    params: CompactnessParams,
) -> f64 {
    let placed = rooms
        .into_iter()
        .filter(|room| room.is_placed())
        .collect::<Vec<_>>();
    let Some(bounds) = bounding_rect(placed.iter().copied()) else {
        return 0.0;
    };
    let total_area = placed
        .iter()
        .map(|room| f64::from(room.spec().area))
        .sum::<f64>();
    if total_area <= 0.0 {
        return 0.0;
    }
    let bounding_area = f64::from(bounds.width) * f64::from(bounds.height);
    (params.max_bonus - bounding_area / total_area * params.scale).max(0.0)
}
