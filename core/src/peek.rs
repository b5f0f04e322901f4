use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Power-up a peek belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeekKind {
    Hint,
    MegaHint,
    SafeClick,
}

/// What a peeked cell shows while the peek lasts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeekContent {
    Mine,
    Number(u8),
    Empty,
}

impl From<Cell> for PeekContent {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell { is_mine: true, .. } => Self::Mine,
            Cell { mines_around: 0, .. } => Self::Empty,
            Cell { mines_around, .. } => Self::Number(mines_around),
        }
    }
}

/// Temporary view over hidden cells. Holding one never changes the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivePeek {
    pub kind: PeekKind,
    pub cells: Vec<(Coord2, PeekContent)>,
    pub timer: TimerId,
}

impl ActivePeek {
    pub fn content_at(&self, coords: Coord2) -> Option<PeekContent> {
        self.cells
            .iter()
            .find(|&&(pos, _)| pos == coords)
            .map(|&(_, content)| content)
    }
}

/// Computes peek content for every still-hidden position in `area`, out-of-range positions are skipped.
pub fn peek_cells(board: &Board, area: impl IntoIterator<Item = Coord2>) -> Vec<(Coord2, PeekContent)> {
    area.into_iter()
        .filter_map(|pos| board.get(pos).map(|&cell| (pos, cell)))
        .filter(|(_, cell)| cell.is_hidden())
        .map(|(pos, cell)| (pos, cell.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_with_mines;

    #[test]
    fn peek_skips_revealed_and_keeps_board() {
        let mut board = board_with_mines(3, &[(0, 0)]);
        board[(2, 2)].is_revealed = true;
        board[(0, 0)].is_marked = true;
        let before = board.clone();

        let cells = peek_cells(&board, board.rect((0, 0), (2, 2)));

        assert_eq!(cells.len(), 8);
        assert!(cells.contains(&((0, 0), PeekContent::Mine)));
        assert!(cells.contains(&((1, 1), PeekContent::Number(1))));
        assert!(cells.contains(&((2, 0), PeekContent::Empty)));
        assert!(!cells.iter().any(|&(pos, _)| pos == (2, 2)));
        assert_eq!(board, before);
    }

    #[test]
    fn peek_ignores_out_of_range_positions() {
        let board = board_with_mines(2, &[(1, 1)]);
        let cells = peek_cells(&board, [(0, 0), (2, 0), (0, 9)]);
        assert_eq!(cells, [((0, 0), PeekContent::Number(1))]);
    }
}
