use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{GridPosition, Rect};

/// Identifier of a room, unique within one level (e.g. `"kitchen"`).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Quarter-turn rotation of a room block.
///
/// Serialized as its angle in degrees (`0`, `90`, `180` or `270`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    #[must_use]
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Rotates a further 90° clockwise, wrapping at 360°.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Whether the footprint's width and height trade places.
    #[must_use]
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl Serialize for Rotation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.degrees())
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let degrees = u16::deserialize(deserializer)?;
        Rotation::from_degrees(degrees).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "rotation must be one of 0, 90, 180, 270, got {degrees}"
            ))
        })
    }
}

/// Declared size of a room in grid cells, before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u16,
    pub height: u16,
}

impl Footprint {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Width and height after applying `rotation`.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        if rotation.is_quarter_turn() {
            Self::new(self.height, self.width)
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Living,
    Private,
    Service,
    Utility,
}

/// Immutable description of a room as declared by a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub id: RoomId,
    pub name: String,
    pub category: RoomCategory,
    #[serde(rename = "size")]
    pub footprint: Footprint,
    /// Real-world floor area in square feet. Independent of the grid footprint.
    pub area: u32,
    /// Weight of this room's adjacency preferences.
    pub priority: u32,
    /// Rooms this room wants to share a wall with.
    #[serde(default)]
    pub connections: Vec<RoomId>,
}

/// Whether a room currently sits on the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Placement {
    #[default]
    Unplaced,
    Placed(GridPosition),
}

/// A placeable room: its declared spec plus the mutable rotation and placement state.
///
/// The builder-style constructors do not check grid bounds or overlaps; the placement
/// invariant is enforced by [`Layout`](super::layout::Layout).
///
/// # Example
///
/// ```
/// use roomcraft_engine::{Footprint, RoomBlock, RoomCategory, RoomSpec, Rotation};
///
/// let spec = RoomSpec {
///     id: "hall".into(),
///     name: "Hall".to_owned(),
///     category: RoomCategory::Utility,
///     footprint: Footprint::new(3, 1),
///     area: 40,
///     priority: 1,
///     connections: vec![],
/// };
/// let room = RoomBlock::new(spec).with_rotation(Rotation::Deg90).placed_at(2, 0);
/// assert_eq!(room.effective_size(), Footprint::new(1, 3));
/// assert!(room.is_placed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomBlock {
    spec: RoomSpec,
    rotation: Rotation,
    placement: Placement,
}

impl RoomBlock {
    #[must_use]
    pub fn new(spec: RoomSpec) -> Self {
        Self {
            spec,
            rotation: Rotation::default(),
            placement: Placement::Unplaced,
        }
    }

    #[must_use]
    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub fn placed_at(self, x: i32, y: i32) -> Self {
        Self {
            placement: Placement::Placed(GridPosition::new(x, y)),
            ..self
        }
    }

    #[must_use]
    pub fn spec(&self) -> &RoomSpec {
        &self.spec
    }

    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.spec.id
    }

    #[must_use]
    pub fn priority(&self) -> u32 {
        self.spec.priority
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placement.is_placed()
    }

    #[must_use]
    pub fn position(&self) -> Option<GridPosition> {
        match self.placement {
            Placement::Placed(position) => Some(position),
            Placement::Unplaced => None,
        }
    }

    /// Footprint after rotation.
    #[must_use]
    pub fn effective_size(&self) -> Footprint {
        self.spec.footprint.rotated(self.rotation)
    }

    /// Rectangle this room would cover if anchored at `position`.
    #[must_use]
    pub fn rect_at(&self, position: GridPosition) -> Rect {
        let size = self.effective_size();
        Rect::new(
            position.x,
            position.y,
            i32::from(size.width),
            i32::from(size.height),
        )
    }

    /// Rectangle currently covered, or `None` while unplaced.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.position().map(|position| self.rect_at(position))
    }

    /// Whether this room and `other` are both placed and share a wall.
    #[must_use]
    pub fn is_adjacent_to(&self, other: &RoomBlock) -> bool {
        match (self.rect(), other.rect()) {
            (Some(a), Some(b)) => a.shares_edge(b),
            _ => false,
        }
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    pub(crate) fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn spec(id: &str, width: u16, height: u16, priority: u32) -> RoomSpec {
        RoomSpec {
            id: id.into(),
            name: id.to_owned(),
            category: RoomCategory::Living,
            footprint: Footprint::new(width, height),
            area: u32::from(width) * u32::from(height) * 20,
            priority,
            connections: vec![],
        }
    }

    #[test]
    fn test_effective_size_follows_rotation() {
        for (width, height) in [(2, 1), (3, 2), (1, 1), (4, 7)] {
            let room = RoomBlock::new(spec("r", width, height, 1));
            for rotation in Rotation::ALL {
                let size = room.clone().with_rotation(rotation).effective_size();
                if rotation.is_quarter_turn() {
                    assert_eq!(size, Footprint::new(height, width));
                } else {
                    assert_eq!(size, Footprint::new(width, height));
                }
            }
        }
    }

    #[test]
    fn test_rotation_wraps() {
        let mut rotation = Rotation::Deg0;
        for expected in [90, 180, 270, 0] {
            rotation = rotation.rotated_right();
            assert_eq!(rotation.degrees(), expected);
        }
    }

    #[test]
    fn test_rotation_serialization() {
        assert_eq!(serde_json::to_string(&Rotation::Deg270).unwrap(), "270");
        assert_eq!(
            serde_json::from_str::<Rotation>("90").unwrap(),
            Rotation::Deg90
        );
        assert!(serde_json::from_str::<Rotation>("45").is_err());
        assert!(serde_json::from_str::<Rotation>("360").is_err());
    }

    #[test]
    fn test_room_spec_deserialization() {
        let json = r#"{
            "id": "kitchen",
            "name": "Kitchen",
            "category": "service",
            "size": { "width": 2, "height": 2 },
            "area": 120,
            "priority": 4,
            "connections": ["living"]
        }"#;
        let spec: RoomSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.id.as_str(), "kitchen");
        assert_eq!(spec.category, RoomCategory::Service);
        assert_eq!(spec.footprint, Footprint::new(2, 2));
        assert_eq!(spec.connections, vec![RoomId::from("living")]);
    }

    #[test]
    fn test_unplaced_room_has_no_rect() {
        let room = RoomBlock::new(spec("a", 2, 2, 1));
        assert_eq!(room.rect(), None);
        assert!(!room.is_adjacent_to(&room.clone().placed_at(2, 0)));
    }
}
