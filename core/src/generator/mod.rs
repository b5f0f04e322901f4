use crate::*;
pub use shuffle::*;

mod shuffle;

/// Strategy that distributes mines on a blank board while keeping one position safe.
pub trait MineGenerator {
    /// Places exactly `mines` mines, never at `exclude`, and computes adjacency.
    ///
    /// Fails before touching the board when `mines` does not fit next to the excluded cell.
    fn place(&mut self, board: &mut Board, exclude: Coord2, mines: CellCount) -> Result<()>;
}

/// Largest mine count a board of side `size` accepts while keeping one cell safe.
pub const fn mine_capacity(size: Coord) -> CellCount {
    mult(size, size).saturating_sub(1)
}

pub fn check_mine_capacity(size: Coord, mines: CellCount) -> Result<()> {
    let capacity = mine_capacity(size);
    if mines > capacity {
        log::warn!(
            "Too many mines for this board, requested {} but only fits {}",
            mines,
            capacity
        );
        Err(GameError::TooManyMines {
            requested: mines,
            capacity,
        })
    } else {
        Ok(())
    }
}

/// First-click-safe uniform placement with the session's random source.
pub fn place_mines(board: &mut Board, rng: &mut GameRng, exclude: Coord2, mines: CellCount) -> Result<()> {
    ShuffleGenerator::new(rng).place(board, exclude, mines)
}
