use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single square of the board. Its position is implicit in the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_marked: bool,
    pub is_revealed: bool,
    /// Always 0 for mines.
    pub mines_around: u8,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed
    }
}

/// Square grid of cells indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: Coord,
    cells: Array2<Cell>,
}

impl Board {
    /// Every cell starts hidden, unmarked and with no mines around.
    pub fn new(size: Coord) -> Self {
        Self {
            size,
            cells: Array2::default((size, size).to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.validate_coords(coords).ok().map(|coords| &self[coords])
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// Inclusive bounding rectangle of two positions, both expected in bounds.
    pub fn rect(&self, a: Coord2, b: Coord2) -> RectIter {
        RectIter::new(a, b)
    }

    /// Every position, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Coord2> + use<> {
        let side = self.size;
        (0..side).flat_map(move |x| (0..side).map(move |y| (x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        // a board never holds more than u8::MAX squared cells
        self.cells.iter().filter(|&cell| predicate(cell)).count() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.neighbors_of(coords).filter(|&pos| self[pos].is_mine).count() as u8
    }

    /// Assigns every non-mine cell its mine-neighbor count, mines keep 0.
    pub fn compute_adjacency(&mut self) {
        for coords in self.positions() {
            let count = if self[coords].is_mine {
                0
            } else {
                self.adjacent_mine_count(coords)
            };
            self[coords].mines_around = count;
        }
    }

    pub fn clear_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_mine = false;
            cell.mines_around = 0;
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Builds a board with mines at `mines` and adjacency already computed.
#[cfg(test)]
pub(crate) fn board_with_mines(size: Coord, mines: &[Coord2]) -> Board {
    let mut board = Board::new(size);
    for &coords in mines {
        board[coords].is_mine = true;
    }
    board.compute_adjacency();
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_blank() {
        let board = Board::new(4);
        assert_eq!(board.total_cells(), 16);
        assert_eq!(board.positions().count(), 16);
        assert!(board.iter().all(|&cell| cell == Cell::default()));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let board = Board::new(3);
        assert_eq!(board.validate_coords((3, 0)), Err(GameError::InvalidCoords));
        assert!(board.get((0, 3)).is_none());
        assert!(board.get((2, 2)).is_some());
    }

    #[test]
    fn adjacency_counts_neighbor_mines() {
        let board = board_with_mines(3, &[(0, 0), (2, 2)]);
        assert_eq!(board[(1, 1)].mines_around, 2);
        assert_eq!(board[(1, 0)].mines_around, 1);
        assert_eq!(board[(2, 0)].mines_around, 0);
        assert_eq!(board[(0, 0)].mines_around, 0);
        assert_eq!(board.mine_count(), 2);
    }

    #[test]
    fn clear_mines_resets_counts() {
        let mut board = board_with_mines(3, &[(1, 1)]);
        board.clear_mines();
        assert_eq!(board.mine_count(), 0);
        assert!(board.iter().all(|cell| cell.mines_around == 0));
    }
}
