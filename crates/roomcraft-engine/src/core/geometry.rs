use serde::{Deserialize, Serialize};

/// Dimensions of a level's build grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn cell_count(self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Returns `true` if `rect` lies fully inside the grid.
    ///
    /// Negative anchors are never inside.
    #[must_use]
    pub fn contains(self, rect: Rect) -> bool {
        rect.x >= 0
            && rect.y >= 0
            && rect.right() <= i64::from(self.width)
            && rect.bottom() <= i64::from(self.height)
    }
}

/// Top-left anchor cell of a placed room.
///
/// Coordinates are signed so that candidate anchors coming from pointer input can be
/// represented before validation; a placed room always has non-negative coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle on the grid, using half-open cell intervals
/// `[x, x + width)` and `[y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge. Widened so that anchors near `i32::MAX` cannot overflow.
    #[must_use]
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge, widened like [`Rect::right`].
    #[must_use]
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    #[must_use]
    pub fn area(self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Strict interior intersection. Rectangles that only touch along an edge or at a
    /// corner do not overlap.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        !(self.right() <= i64::from(other.x)
            || other.right() <= i64::from(self.x)
            || self.bottom() <= i64::from(other.y)
            || other.bottom() <= i64::from(self.y))
    }

    /// Returns `true` if the two rectangles share a border segment of nonzero length.
    ///
    /// One rectangle's vertical edge must coincide with the other's while their
    /// y-intervals strictly overlap, or the same with the axes swapped. Corner contact
    /// is not adjacency.
    #[must_use]
    pub fn shares_edge(self, other: Self) -> bool {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        let (other_x, other_y) = (i64::from(other.x), i64::from(other.y));
        let x_touching = self.right() == other_x || other.right() == x;
        let y_touching = self.bottom() == other_y || other.bottom() == y;
        let x_overlapping = x < other.right() && other_x < self.right();
        let y_overlapping = y < other.bottom() && other_y < self.bottom();
        (x_touching && y_overlapping) || (y_touching && x_overlapping)
    }

    /// Smallest rectangle enclosing both.
    ///
    /// A width or height beyond `i32::MAX` saturates.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let x = i32::min(self.x, other.x);
        let y = i32::min(self.y, other.y);
        let right = i64::max(self.right(), other.right());
        let bottom = i64::max(self.bottom(), other.bottom());
        let width = i32::try_from(right - i64::from(x)).unwrap_or(i32::MAX);
        let height = i32::try_from(bottom - i64::from(y)).unwrap_or(i32::MAX);
        Self::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0, 0, 2, 2);
        assert!(a.overlaps(Rect::new(1, 1, 2, 2)));
        assert!(a.overlaps(Rect::new(0, 0, 1, 1)));
        // touching edges
        assert!(!a.overlaps(Rect::new(2, 0, 2, 2)));
        assert!(!a.overlaps(Rect::new(0, 2, 2, 2)));
        // touching corner
        assert!(!a.overlaps(Rect::new(2, 2, 1, 1)));
        assert!(!a.overlaps(Rect::new(5, 5, 1, 1)));
    }

    #[test]
    fn test_shares_edge() {
        let a = Rect::new(0, 0, 2, 2);
        assert!(a.shares_edge(Rect::new(2, 0, 2, 1)));
        assert!(a.shares_edge(Rect::new(-1, 1, 1, 3)));
        assert!(a.shares_edge(Rect::new(1, 2, 3, 1)));
        assert!(a.shares_edge(Rect::new(0, -4, 1, 4)));
        // corner contact only
        assert!(!a.shares_edge(Rect::new(2, 2, 1, 1)));
        assert!(!a.shares_edge(Rect::new(-1, -1, 1, 1)));
        // gap of one cell
        assert!(!a.shares_edge(Rect::new(3, 0, 1, 1)));
        // overlapping rectangles are not adjacent
        assert!(!a.shares_edge(Rect::new(1, 0, 2, 2)));
    }

    #[test]
    fn test_grid_contains() {
        let grid = GridSize::new(4, 4);
        assert!(grid.contains(Rect::new(0, 0, 4, 4)));
        assert!(grid.contains(Rect::new(2, 3, 2, 1)));
        assert!(!grid.contains(Rect::new(3, 0, 2, 1)));
        assert!(!grid.contains(Rect::new(0, 3, 1, 2)));
        assert!(!grid.contains(Rect::new(-1, 0, 1, 1)));
        assert!(!grid.contains(Rect::new(0, -1, 1, 1)));
    }

    #[test]
    fn test_edges_near_coordinate_limits() {
        let far = Rect::new(i32::MAX, i32::MAX, 2, 3);
        assert_eq!(far.right(), i64::from(i32::MAX) + 2);
        assert_eq!(far.bottom(), i64::from(i32::MAX) + 3);
        assert!(!GridSize::new(4, 4).contains(far));
        assert!(far.overlaps(Rect::new(i32::MAX, i32::MAX, 1, 1)));
        assert!(!far.overlaps(Rect::new(0, 0, 2, 2)));
        assert!(!far.shares_edge(Rect::new(0, 0, 2, 2)));

        let wide = Rect::new(i32::MIN, 0, 1, 1).union(Rect::new(i32::MAX, 0, 1, 1));
        assert_eq!(wide, Rect::new(i32::MIN, 0, i32::MAX, 1));
    }

    #[test]
    fn test_union() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(3, 1, 1, 4);
        assert_eq!(a.union(b), Rect::new(0, 0, 4, 5));
        assert_eq!(a.union(b).area(), 20);
    }
}
