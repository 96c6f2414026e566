use std::collections::VecDeque;

use crate::area::Position;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The cell next to `pos` in this direction.
    pub fn step(self, pos: Position, cell: i32) -> Position {
        match self {
            Up => pos.offset(0, -cell),
            Down => pos.offset(0, cell),
            Left => pos.offset(-cell, 0),
            Right => pos.offset(cell, 0),
        }
    }
}

/// The snake's cells, ordered from tail (front) to head (back).
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake { body: VecDeque::from(vec![head]) }
    }

    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn head(&self) -> Position {
        // Never empty: created with a head, and advance() pushes before popping
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Pushes `new_head`. Unless growing, the oldest cell is dropped and returned.
    pub fn advance(&mut self, new_head: Position, grow: bool) -> Option<Position> {
        self.body.push_back(new_head);

        if grow {
            None
        } else {
            self.body.pop_front()
        }
    }

    /// Whether `head` overlaps any cell except the last one pushed.
    pub fn collides_with_self(&self, head: Position) -> bool {
        self.body.iter().rev().skip(1).any(|pos| *pos == head)
    }
}
