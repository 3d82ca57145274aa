use serde::{Deserialize, Serialize};

/// Heading of the snake on the grid.
///
/// The discriminant doubles as the action index: `0 = Up`, `1 = Right`,
/// `2 = Down`, `3 = Left`. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Converts an action index into a heading.
    #[must_use]
    pub fn from_action(action: usize) -> Option<Self> {
        Self::ALL.get(action).copied()
    }

    #[must_use]
    pub const fn as_action(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// One-hot encoding in action order.
    #[must_use]
    pub fn one_hot(self) -> [f32; Self::LEN] {
        let mut encoded = [0.0; Self::LEN];
        encoded[self.as_action()] = 1.0;
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_action(dir.as_action()), Some(dir));
        }
        assert_eq!(Direction::from_action(4), None);
    }

    #[test]
    fn test_opposite_cancels_delta() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_one_hot() {
        assert_eq!(Direction::Down.one_hot(), [0.0, 0.0, 1.0, 0.0]);
    }
}
