//! Adjacency evaluation: how many of the declared "wants to share a wall with"
//! preferences the layout satisfies.

use roomcraft_engine::{AdjacencyTally, RoomBlock};

/// Tallies adjacency preferences over `rooms`.
///
/// For every room `R` and every id `D` in `R`'s connections, `R`'s priority is added to
/// `possible`; it is also added to `achieved` when the room named `D` exists, is placed,
/// and shares a wall with `R`. Preferences are one-directional: if only `A` lists `B`,
/// only `A`'s priority is at stake.
///
/// Raw counts are returned so callers can combine tallies consistently.
///
/// # Example
///
/// ```
/// use roomcraft_engine::{Layout, GridPosition, builtin_levels};
/// use roomcraft_evaluator::adjacency::score_adjacency;
///
/// let level = &builtin_levels()[0];
/// let mut layout = Layout::new(level);
/// layout.place(&"living".into(), GridPosition::new(0, 0)).unwrap();
/// layout.place(&"kitchen".into(), GridPosition::new(3, 0)).unwrap();
///
/// let tally = score_adjacency(layout.rooms());
/// assert_eq!((tally.achieved, tally.possible), (9, 9));
/// ```
#[must_use]
pub fn score_adjacency(rooms: &[RoomBlock]) -> AdjacencyTally {
    let mut tally = AdjacencyTally::default();
    for room in rooms {
        let priority = u64::from(room.priority());
        for wanted in &room.spec().connections {
            tally.possible += priority;
            let satisfied = rooms
                .iter()
                .find(|other| other.id() == wanted)
                .is_some_and(|other| room.is_adjacent_to(other));
            if satisfied {
                tally.achieved += priority;
            }
        }
    }
    tally
}

/// `achieved / possible`, or `neutral` when nothing was asked for.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn adjacency_ratio(tally: AdjacencyTally, neutral: f64) -> f64 {
    if tally.possible == 0 {
        neutral
    } else {
        tally.achieved as f64 / tally.possible as f64
    }
}
