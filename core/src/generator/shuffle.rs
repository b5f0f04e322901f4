use alloc::vec::Vec;

use super::*;

/// Uniform placement: shuffle every candidate position and take the first `mines` of them.
///
/// Each of the `C(n - 1, mines)` layouts that avoid the excluded cell is equally likely, in `O(n)` time and space.
#[derive(Debug)]
pub struct ShuffleGenerator<'a> {
    rng: &'a mut GameRng,
}

impl<'a> ShuffleGenerator<'a> {
    pub fn new(rng: &'a mut GameRng) -> Self {
        Self { rng }
    }
}

impl MineGenerator for ShuffleGenerator<'_> {
    fn place(&mut self, board: &mut Board, exclude: Coord2, mines: CellCount) -> Result<()> {
        let exclude = board.validate_coords(exclude)?;
        check_mine_capacity(board.size(), mines)?;

        let mut candidates: Vec<Coord2> = board.positions().filter(|&pos| pos != exclude).collect();
        self.rng.shuffle(&mut candidates);

        board.clear_mines();
        for &coords in candidates.iter().take(mines.into()) {
            board[coords].is_mine = true;
        }
        board.compute_adjacency();

        log::debug!(
            "Placed {} mines on a {}x{} board, excluding {:?}",
            mines,
            board.size(),
            board.size(),
            exclude
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_cell_is_never_a_mine() {
        for seed in 0..200 {
            let mut rng = GameRng::seed_from_u64(seed);
            let mut board = Board::new(4);
            ShuffleGenerator::new(&mut rng).place(&mut board, (0, 0), 15).unwrap();
            assert!(!board[(0, 0)].is_mine);
            assert_eq!(board.mine_count(), 15);
        }
    }

    #[test]
    fn places_exact_count_with_correct_adjacency() {
        let mut rng = GameRng::seed_from_u64(99);
        let mut board = Board::new(8);
        ShuffleGenerator::new(&mut rng).place(&mut board, (3, 4), 14).unwrap();

        assert_eq!(board.mine_count(), 14);
        for coords in board.positions() {
            let cell = board[coords];
            if cell.is_mine {
                assert_eq!(cell.mines_around, 0);
            } else {
                let expected = board.neighbors_of(coords).filter(|&n| board[n].is_mine).count();
                assert_eq!(usize::from(cell.mines_around), expected, "at {:?}", coords);
            }
        }
    }

    #[test]
    fn too_many_mines_fails_without_mutation() {
        let mut rng = GameRng::seed_from_u64(1);
        let mut board = Board::new(4);
        board[(1, 1)].is_marked = true;
        let before = board.clone();

        let err = ShuffleGenerator::new(&mut rng).place(&mut board, (0, 0), 16).unwrap_err();

        assert_eq!(
            err,
            GameError::TooManyMines {
                requested: 16,
                capacity: 15
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn every_cell_but_the_excluded_one_gets_mined_eventually() {
        let mut hits = [0u32; 9];
        for seed in 0..300 {
            let mut rng = GameRng::seed_from_u64(seed);
            let mut board = Board::new(3);
            ShuffleGenerator::new(&mut rng).place(&mut board, (1, 1), 1).unwrap();
            for (i, coords) in board.positions().enumerate() {
                if board[coords].is_mine {
                    hits[i] += 1;
                }
            }
        }
        // (1, 1) is index 4 in column-major order
        assert_eq!(hits[4], 0);
        assert!(hits.iter().enumerate().all(|(i, &n)| i == 4 || n > 0));
    }
}
