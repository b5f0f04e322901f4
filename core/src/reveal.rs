use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a single reveal request did to the target cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Target was flagged or already revealed, nothing changed.
    AlreadyHandled,
    /// Target holds a mine. The cell stays unrevealed, the caller decides what it costs.
    HitMine,
    /// Target revealed with this many mines around, no cascade.
    Number(u8),
    /// Target revealed with no mines around and its region cascaded open.
    Empty,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::AlreadyHandled)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub outcome: RevealOutcome,
    /// Cells newly revealed by this request, cascade included.
    pub opened: CellCount,
}

impl Reveal {
    const fn untouched(outcome: RevealOutcome) -> Self {
        Self { outcome, opened: 0 }
    }
}

/// Reveals `coords`, flood-filling outward from zero cells.
///
/// `is_revealed` doubles as the visited set, so every cell is opened at most once across the
/// cascade and any earlier reveals.
pub fn reveal_cell(board: &mut Board, coords: Coord2) -> Result<Reveal> {
    let coords = board.validate_coords(coords)?;
    let cell = board[coords];

    if cell.is_marked || cell.is_revealed {
        return Ok(Reveal::untouched(RevealOutcome::AlreadyHandled));
    }
    if cell.is_mine {
        return Ok(Reveal::untouched(RevealOutcome::HitMine));
    }

    board[coords].is_revealed = true;
    log::debug!("Open cell at {:?}, mine count: {}", coords, cell.mines_around);

    if cell.mines_around > 0 {
        return Ok(Reveal {
            outcome: RevealOutcome::Number(cell.mines_around),
            opened: 1,
        });
    }

    let mut opened: CellCount = 1;
    let mut to_visit: VecDeque<Coord2> = board.neighbors_of(coords).collect();

    while let Some(visit_coords) = to_visit.pop_front() {
        let visit = board[visit_coords];
        if visit.is_revealed || visit.is_marked || visit.is_mine {
            continue;
        }

        board[visit_coords].is_revealed = true;
        opened += 1;
        log::trace!(
            "Flood opened cell at {:?}, mine count: {}",
            visit_coords,
            visit.mines_around
        );

        if visit.mines_around == 0 {
            to_visit.extend(
                board
                    .neighbors_of(visit_coords)
                    .filter(|&pos| !board[pos].is_revealed),
            );
        }
    }

    Ok(Reveal {
        outcome: RevealOutcome::Empty,
        opened,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_with_mines;

    #[test]
    fn flagged_and_revealed_cells_are_left_alone() {
        let mut board = board_with_mines(3, &[(2, 2)]);
        board[(0, 0)].is_marked = true;
        board[(1, 1)].is_revealed = true;
        let before = board.clone();

        assert_eq!(reveal_cell(&mut board, (0, 0)).unwrap().outcome, RevealOutcome::AlreadyHandled);
        assert_eq!(reveal_cell(&mut board, (1, 1)).unwrap().outcome, RevealOutcome::AlreadyHandled);
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut board = board_with_mines(3, &[(2, 2)]);
        let before = board.clone();

        assert_eq!(reveal_cell(&mut board, (3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(reveal_cell(&mut board, (0, 200)), Err(GameError::InvalidCoords));
        assert_eq!(board, before);
    }

    #[test]
    fn mine_is_reported_but_not_revealed() {
        let mut board = board_with_mines(3, &[(2, 2)]);
        let reveal = reveal_cell(&mut board, (2, 2)).unwrap();
        assert_eq!(reveal, Reveal::untouched(RevealOutcome::HitMine));
        assert!(!board[(2, 2)].is_revealed);
    }

    #[test]
    fn number_does_not_cascade() {
        let mut board = board_with_mines(3, &[(2, 2)]);
        let reveal = reveal_cell(&mut board, (1, 1)).unwrap();
        assert_eq!(reveal.outcome, RevealOutcome::Number(1));
        assert_eq!(reveal.opened, 1);
        assert_eq!(board.count_where(|cell| cell.is_revealed), 1);
    }

    #[test]
    fn zero_cell_opens_region_bounded_by_numbers() {
        // column x = 2 is fenced off by mines at (3, _)
        let mut board = board_with_mines(5, &[(3, 0), (3, 1), (3, 2), (3, 3), (3, 4)]);

        let reveal = reveal_cell(&mut board, (0, 0)).unwrap();

        assert_eq!(reveal.outcome, RevealOutcome::Empty);
        assert_eq!(reveal.opened, 15);
        for coords in board.positions() {
            assert_eq!(board[coords].is_revealed, coords.0 < 3, "at {:?}", coords);
        }
        assert_eq!(board[(2, 2)].mines_around, 3);
    }

    #[test]
    fn cascade_skips_flags_and_reveal_is_idempotent() {
        let mut board = board_with_mines(4, &[(3, 3)]);
        board[(1, 0)].is_marked = true;

        let first = reveal_cell(&mut board, (0, 3)).unwrap();
        assert_eq!(first.outcome, RevealOutcome::Empty);
        assert!(!board[(1, 0)].is_revealed);
        assert!(!board[(3, 3)].is_revealed);
        // 16 cells, minus the mine and the flag
        assert_eq!(first.opened, 14);

        let snapshot = board.clone();
        assert_eq!(reveal_cell(&mut board, (0, 3)).unwrap().opened, 0);
        assert_eq!(board, snapshot);
    }
}
