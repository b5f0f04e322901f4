use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Bonus actions a player can trigger besides plain clicks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Powerup {
    /// Next click peeks a cell and its neighbors.
    Hint,
    /// Next two clicks select a rectangle to peek.
    MegaHint,
    /// Peeks a random safe hidden cell right away.
    SafeClick,
    /// Removes some random mines for good.
    Exterminator,
    /// Player places every mine by hand before the game starts.
    ManualPlacement,
}

/// A cell and its in-bounds neighbors, up to 9 positions.
pub fn hint_area(board: &Board, center: Coord2) -> impl Iterator<Item = Coord2> + use<> {
    core::iter::once(center).chain(board.neighbors_of(center))
}

/// Picks a uniformly random hidden, unflagged cell without a mine.
pub fn pick_safe_cell(board: &Board, rng: &mut GameRng) -> Option<Coord2> {
    let eligible: Vec<Coord2> = board
        .positions()
        .filter(|&pos| {
            let cell = board[pos];
            cell.is_hidden() && !cell.is_marked && !cell.is_mine
        })
        .collect();
    rng.pick(&eligible).copied()
}

/// Whether removing `removals` mines out of `mines` keeps strictly more than `removals` on the board.
pub const fn can_exterminate(mines: CellCount, removals: CellCount) -> bool {
    mines > removals && mines - removals > removals
}

/// Permanently removes `removals` random unrevealed, unflagged mines and recomputes adjacency.
///
/// Returns the cleared positions. Refuses, without touching the board, when too few mines remain
/// or fewer than `removals` of them are unflagged.
pub fn exterminate(board: &mut Board, rng: &mut GameRng, removals: CellCount) -> Result<Vec<Coord2>> {
    let total = board.mine_count();
    let mut mines: Vec<Coord2> = board
        .positions()
        .filter(|&pos| {
            let cell = board[pos];
            cell.is_mine && !cell.is_revealed && !cell.is_marked
        })
        .collect();

    // a board never holds more than u8::MAX squared cells
    if !can_exterminate(total, removals) || (mines.len() as CellCount) < removals {
        log::debug!(
            "Exterminator refused, {} mines left ({} unflagged) for {} removals",
            total,
            mines.len(),
            removals
        );
        return Err(GameError::ExterminatorRefused);
    }

    rng.shuffle(&mut mines);
    mines.truncate(removals.into());
    for &pos in &mines {
        board[pos].is_mine = false;
    }
    board.compute_adjacency();

    log::debug!("Exterminated mines at {:?}", mines);
    Ok(mines)
}
