use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board and gameplay state right before a mutating action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub game: RestorableState,
}

impl Snapshot {
    pub fn capture(board: &Board, game: &GameState) -> Self {
        Self {
            board: board.clone(),
            game: game.restorable(),
        }
    }
}

/// Snapshot stack, newest last. With a capacity the oldest entry makes room for a new one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UndoStack {
    entries: VecDeque<Snapshot>,
    capacity: Option<usize>,
}

impl UndoStack {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while self.entries.len() >= capacity {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Result<Snapshot> {
        self.entries.pop_back().ok_or(GameError::UndoEmpty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(revealed: CellCount) -> Snapshot {
        let mut game = GameState::new(&Level::BEGINNER, &SessionConfig::default());
        game.revealed_count = revealed;
        Snapshot::capture(&Board::new(4), &game)
    }

    #[test]
    fn pops_newest_first() {
        let mut stack = UndoStack::new(None);
        stack.push(snapshot(1));
        stack.push(snapshot(2));

        assert_eq!(stack.pop().map(|s| s.game.revealed_count), Ok(2));
        assert_eq!(stack.pop().map(|s| s.game.revealed_count), Ok(1));
        assert_eq!(stack.pop(), Err(GameError::UndoEmpty));
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut stack = UndoStack::new(Some(2));
        for revealed in 1..=3 {
            stack.push(snapshot(revealed));
        }

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().map(|s| s.game.revealed_count), Ok(3));
        assert_eq!(stack.pop().map(|s| s.game.revealed_count), Ok(2));
        assert!(stack.is_empty());
    }

    #[test]
    fn zero_capacity_disables_undo() {
        let mut stack = UndoStack::new(Some(0));
        stack.push(snapshot(1));
        assert!(stack.is_empty());
    }
}
