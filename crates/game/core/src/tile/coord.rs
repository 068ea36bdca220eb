use arrayvec::ArrayVec;
use strum::{EnumIter, IntoEnumIterator};

/// Grid coordinate. Row 0 is the bottom of the board, column 0 the left edge.
///
/// Fields are signed so that freshly generated tiles can carry their
/// off-board starting row and so neighbor arithmetic never wraps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub row: i32,
    pub col: i32,
}

/// Cardinal direction on the board. `North` points toward higher rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Row/column delta for a single step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (1, 0),
            Self::South => (-1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

impl TileCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn row_above(self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    pub const fn row_below(self) -> Self {
        Self::new(self.row - 1, self.col)
    }

    pub const fn col_left(self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    pub const fn col_right(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    /// Coordinate `distance` steps away in `direction`.
    pub const fn step(self, direction: Direction, distance: i32) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr * distance, self.col + dc * distance)
    }

    pub const fn in_bounds(self, size: usize) -> bool {
        let n = size as i32;
        self.row >= 0 && self.col >= 0 && self.row < n && self.col < n
    }

    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Orthogonal adjacency: the 3×3 scan around `self` keeps only cells
    /// whose checkerboard parity differs, which rejects diagonals and self.
    pub const fn is_orthogonal_neighbor(self, other: Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (self.row + self.col + other.row + other.col) % 2 != 0
    }

    /// Direction from `self` toward `other` when they share a row or column.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        match (other.row - self.row, other.col - self.col) {
            (0, 0) => None,
            (r, 0) if r > 0 => Some(Direction::North),
            (_, 0) => Some(Direction::South),
            (0, c) if c > 0 => Some(Direction::East),
            (0, _) => Some(Direction::West),
            _ => None,
        }
    }

    /// In-bounds orthogonal neighbors. Out-of-bounds input yields nothing.
    pub fn cardinal_neighbors(self, size: usize) -> ArrayVec<TileCoord, 4> {
        let mut out = ArrayVec::new();
        if !self.in_bounds(size) {
            return out;
        }
        for direction in Direction::iter() {
            let next = self.step(direction, 1);
            if next.in_bounds(size) {
                out.push(next);
            }
        }
        out
    }

    /// Grid indices for an in-bounds coordinate.
    pub(crate) fn index(self, size: usize) -> Option<(usize, usize)> {
        self.in_bounds(size)
            .then_some((self.row as usize, self.col as usize))
    }
}

impl core::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_rejects_diagonals_and_self() {
        let center = TileCoord::new(1, 1);
        assert!(center.is_orthogonal_neighbor(TileCoord::new(2, 1)));
        assert!(center.is_orthogonal_neighbor(TileCoord::new(1, 0)));
        assert!(!center.is_orthogonal_neighbor(TileCoord::new(2, 2)));
        assert!(!center.is_orthogonal_neighbor(TileCoord::new(0, 0)));
        assert!(!center.is_orthogonal_neighbor(center));
        assert!(!center.is_orthogonal_neighbor(TileCoord::new(1, 3)));
    }

    #[test]
    fn cardinal_neighbors_are_bounded() {
        assert_eq!(TileCoord::new(0, 0).cardinal_neighbors(3).len(), 2);
        assert_eq!(TileCoord::new(1, 1).cardinal_neighbors(3).len(), 4);
        assert!(TileCoord::new(-1, 0).cardinal_neighbors(3).is_empty());
        assert!(TileCoord::new(0, 3).cardinal_neighbors(3).is_empty());
    }

    #[test]
    fn direction_to_requires_shared_axis() {
        let origin = TileCoord::new(2, 2);
        assert_eq!(origin.direction_to(TileCoord::new(0, 2)), Some(Direction::South));
        assert_eq!(origin.direction_to(TileCoord::new(2, 4)), Some(Direction::East));
        assert_eq!(origin.direction_to(TileCoord::new(3, 3)), None);
        assert_eq!(origin.direction_to(origin), None);
    }
}
