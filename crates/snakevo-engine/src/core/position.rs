use serde::{Deserialize, Serialize};

use super::Direction;

/// A cell coordinate. Coordinates may step outside the grid; bounds are
/// checked by the caller against the configured grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub const fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[must_use]
    pub fn is_inside(self, width: u16, height: u16) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x.unsigned_abs() < u32::from(width)
            && self.y.unsigned_abs() < u32::from(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(1, 2);
        let b = Position::new(4, 0);
        assert_eq!(a.manhattan_distance(b), 5);
        assert_eq!(b.manhattan_distance(a), 5);
    }

    #[test]
    fn test_is_inside() {
        assert!(Position::new(0, 0).is_inside(3, 3));
        assert!(Position::new(2, 2).is_inside(3, 3));
        assert!(!Position::new(3, 0).is_inside(3, 3));
        assert!(!Position::new(0, -1).is_inside(3, 3));
        assert!(Position::new(65_534, 0).is_inside(u16::MAX, 1));
        assert!(!Position::new(65_535, 0).is_inside(u16::MAX, 1));
    }
}
