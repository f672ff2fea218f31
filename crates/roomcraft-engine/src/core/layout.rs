use crate::PlacementError;

use super::{
    geometry::{GridPosition, GridSize, Rect},
    level::LevelDefinition,
    room::{Placement, RoomBlock, RoomId, Rotation},
};

/// Checks whether `room`, with its current rotation, may be anchored at `position`.
///
/// The candidate rectangle must lie inside `grid` and must not strictly intersect any
/// other *placed* room in `all_rooms`. The room itself is skipped (by id), so a placed
/// room can re-validate or move its own position. Touching edges are allowed.
///
/// # Example
///
/// ```
/// use roomcraft_engine::{GridPosition, GridSize, Layout, can_place};
///
/// let level = &roomcraft_engine::builtin_levels()[0];
/// let layout = Layout::new(level);
/// let living = layout.room(&"living".into()).unwrap();
///
/// assert!(can_place(layout.grid(), living, layout.rooms(), GridPosition::new(5, 4)));
/// assert!(!can_place(layout.grid(), living, layout.rooms(), GridPosition::new(6, 4)));
/// ```
#[must_use]
pub fn can_place(
    grid: GridSize,
    room: &RoomBlock,
    all_rooms: &[RoomBlock],
    position: GridPosition,
) -> bool {
    check_placement(grid, room, all_rooms, position).is_ok()
}

/// Like [`can_place`], but reports why a placement is rejected.
pub fn check_placement(
    grid: GridSize,
    room: &RoomBlock,
    all_rooms: &[RoomBlock],
    position: GridPosition,
) -> Result<(), PlacementError> {
    let candidate = room.rect_at(position);
    if !grid.contains(candidate) {
        return Err(PlacementError::OutOfBounds {
            room: room.id().clone(),
            position,
        });
    }
    let blocker = all_rooms
        .iter()
        .filter(|other| other.id() != room.id())
        .find(|other| other.rect().is_some_and(|rect| rect.overlaps(candidate)));
    if let Some(other) = blocker {
        return Err(PlacementError::Overlap {
            room: room.id().clone(),
            other: other.id().clone(),
        });
    }
    Ok(())
}

/// Placement state of every room of one level on its grid.
///
/// All mutations go through [`check_placement`], so placed rooms always lie inside the
/// grid and never overlap each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    grid: GridSize,
    rooms: Vec<RoomBlock>,
}

impl Layout {
    /// Creates a layout with every room of `level` unplaced and unrotated.
    #[must_use]
    pub fn new(level: &LevelDefinition) -> Self {
        Self {
            grid: level.grid,
            rooms: level.rooms.iter().cloned().map(RoomBlock::new).collect(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn rooms(&self) -> &[RoomBlock] {
        &self.rooms
    }

    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&RoomBlock> {
        self.rooms.iter().find(|room| room.id() == id)
    }

    fn index_of(&self, id: &RoomId) -> Result<usize, PlacementError> {
        self.rooms
            .iter()
            .position(|room| room.id() == id)
            .ok_or_else(|| PlacementError::UnknownRoom { room: id.clone() })
    }

    pub fn placed_rooms(&self) -> impl Iterator<Item = &RoomBlock> + '_ {
        self.rooms.iter().filter(|room| room.is_placed())
    }

    pub fn unplaced_rooms(&self) -> impl Iterator<Item = &RoomBlock> + '_ {
        self.rooms.iter().filter(|room| !room.is_placed())
    }

    /// Every room is on the grid.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rooms.iter().all(RoomBlock::is_placed)
    }

    /// Returns the placed room covering the cell `(x, y)`, if any.
    #[must_use]
    pub fn room_at(&self, x: i32, y: i32) -> Option<&RoomBlock> {
        let cell = Rect::new(x, y, 1, 1);
        self.placed_rooms()
            .find(|room| room.rect().is_some_and(|rect| rect.overlaps(cell)))
    }

    /// Whether room `id` could be anchored at `position`. Unknown rooms never fit.
    #[must_use]
    pub fn can_place(&self, id: &RoomId, position: GridPosition) -> bool {
        self.room(id)
            .is_some_and(|room| can_place(self.grid, room, &self.rooms, position))
    }

    /// Places (or moves) room `id` with its top-left corner at `position`.
    pub fn place(&mut self, id: &RoomId, position: GridPosition) -> Result<(), PlacementError> {
        let index = self.index_of(id)?;
        check_placement(self.grid, &self.rooms[index], &self.rooms, position)?;
        self.rooms[index].set_placement(Placement::Placed(position));
        Ok(())
    }

    /// Takes room `id` off the grid. Returns whether it was placed.
    pub fn remove(&mut self, id: &RoomId) -> Result<bool, PlacementError> {
        let index = self.index_of(id)?;
        let was_placed = self.rooms[index].is_placed();
        self.rooms[index].set_placement(Placement::Unplaced);
        Ok(was_placed)
    }

    /// Turns room `id` a further 90° and returns the new rotation.
    ///
    /// A placed room keeps its anchor; if the rotated footprint would leave the grid or
    /// hit another room, the rotation is refused and nothing changes.
    pub fn rotate(&mut self, id: &RoomId) -> Result<Rotation, PlacementError> {
        let index = self.index_of(id)?;
        let room = &self.rooms[index];
        let rotation = room.rotation().rotated_right();
        if let Some(position) = room.position() {
            let rotated = room.clone().with_rotation(rotation);
            check_placement(self.grid, &rotated, &self.rooms, position).map_err(|cause| {
                PlacementError::RotationBlocked {
                    room: id.clone(),
                    source: Box::new(cause),
                }
            })?;
        }
        self.rooms[index].set_rotation(rotation);
        Ok(rotation)
    }

    /// Returns every room to the unplaced, unrotated state.
    pub fn reset(&mut self) {
        for room in &mut self.rooms {
            room.set_placement(Placement::Unplaced);
            room.set_rotation(Rotation::default());
        }
    }
}
