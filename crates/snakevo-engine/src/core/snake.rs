use std::collections::VecDeque;

use super::{Direction, Position};

/// The snake body. The head is the first segment.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: VecDeque<Position>,
    heading: Direction,
}

impl Snake {
    #[must_use]
    pub fn new(head: Position, heading: Direction) -> Self {
        Self {
            segments: VecDeque::from([head]),
            heading,
        }
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Changes the heading. Reversing onto the neck is ignored once the
    /// snake is longer than its head.
    pub fn turn(&mut self, direction: Direction) {
        if self.len() > 1 && direction == self.heading.opposite() {
            return;
        }
        self.heading = direction;
    }

    #[must_use]
    pub fn next_head(&self) -> Position {
        self.head().moved(self.heading)
    }

    /// Returns `true` if moving the head onto `pos` would hit the body.
    ///
    /// The tail cell is free unless the snake is growing this step, because
    /// the tail moves away in the same tick.
    #[must_use]
    pub fn bites(&self, pos: Position, growing: bool) -> bool {
        let skip_tail = usize::from(!growing);
        self.segments
            .iter()
            .take(self.segments.len() - skip_tail)
            .any(|segment| *segment == pos)
    }

    /// Moves one cell along the current heading.
    pub fn advance(&mut self, grow: bool) -> Position {
        let head = self.next_head();
        self.segments.push_front(head);
        if !grow {
            self.segments.pop_back();
        }
        head
    }
}
