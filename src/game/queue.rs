use std::collections::VecDeque;

use super::direction::Direction;

/// Pending direction commands, oldest first.
///
/// One producer (the key-event source) appends, one consumer (the tick)
/// drains. Both run on the same task, so no locking is involved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, direction: Direction) {
        self.pending.push_back(direction);
    }

    pub fn peek(&self) -> Option<Direction> {
        self.pending.front().copied()
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    /// Drop commands from the front while `reject` holds for them.
    ///
    /// Returns how many were dropped.
    pub fn discard_while(&mut self, mut reject: impl FnMut(Direction) -> bool) -> usize {
        let mut dropped = 0;
        while self.peek().is_some_and(&mut reject) {
            self.pending.pop_front();
            dropped += 1;
        }
        dropped
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<Direction> for InputQueue {
    fn extend<T: IntoIterator<Item = Direction>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}

impl FromIterator<Direction> for InputQueue {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}
