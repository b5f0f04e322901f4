use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Running
/// - NotStarted -> Misconfigured
/// - Running -> Won
/// - Running -> Lost
/// - Running -> NotStarted (undo back before the first move)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first click, no mines placed yet
    #[default]
    NotStarted,
    Running,
    Won,
    Lost,
    /// The level does not fit its board, only a restart or level change leaves this
    Misconfigured,
}

impl Phase {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What the next primary click on the board means.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Plain reveal
    #[default]
    Normal,
    Hint,
    MegaHint,
    ManualPlacement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub lives_left: u8,
    pub marked_count: CellCount,
    pub revealed_count: CellCount,
    pub secs_passed: u32,
    pub hints_left: u8,
    pub safe_clicks_left: u8,
    pub is_used_exterminator: bool,
    pub is_used_mega_hint: bool,
    pub mode: Mode,
    pub mega_hint_anchor: Option<Coord2>,
    /// Mines currently on the board, lower than the level's once the exterminator ran.
    pub mine_count: CellCount,
    /// Mines were placed by hand, a first click must never re-place them.
    pub manual_layout: bool,
    pub first_click_pending: bool,
    pub triggered_mine: Option<Coord2>,
}

impl GameState {
    pub fn new(level: &Level, config: &SessionConfig) -> Self {
        Self {
            phase: Phase::NotStarted,
            lives_left: config.lives.max(1),
            marked_count: 0,
            revealed_count: 0,
            secs_passed: 0,
            hints_left: config.hints,
            safe_clicks_left: config.safe_clicks,
            is_used_exterminator: false,
            is_used_mega_hint: false,
            mode: Mode::Normal,
            mega_hint_anchor: None,
            mine_count: level.mine_count,
            manual_layout: false,
            first_click_pending: true,
            triggered_mine: None,
        }
    }

    /// How many mines have not been flagged yet, negative when flags outnumber mines
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.marked_count)
    }

    pub fn all_safe_revealed(&self, board: &Board) -> bool {
        self.revealed_count >= board.total_cells().saturating_sub(self.mine_count)
    }

    /// Every flag sits on a mine and every mine carries a flag.
    pub fn flags_match_mines(&self, board: &Board) -> bool {
        self.mine_count > 0
            && self.marked_count == self.mine_count
            && board.iter().all(|cell| cell.is_mine == cell.is_marked)
    }

    /// Either condition alone wins the game.
    pub fn check_win(&self, board: &Board) -> bool {
        self.all_safe_revealed(board) || self.flags_match_mines(board)
    }

    /// Gameplay fields an undo snapshot carries. Elapsed time and the power-up selection in progress are left out.
    pub fn restorable(&self) -> RestorableState {
        RestorableState {
            phase: self.phase,
            lives_left: self.lives_left,
            marked_count: self.marked_count,
            revealed_count: self.revealed_count,
            hints_left: self.hints_left,
            safe_clicks_left: self.safe_clicks_left,
            is_used_exterminator: self.is_used_exterminator,
            is_used_mega_hint: self.is_used_mega_hint,
            mine_count: self.mine_count,
            manual_layout: self.manual_layout,
            triggered_mine: self.triggered_mine,
        }
    }

    /// Applies a snapshot and re-derives everything that is not stored in it.
    pub fn restore(&mut self, saved: RestorableState) {
        self.phase = saved.phase;
        self.lives_left = saved.lives_left;
        self.marked_count = saved.marked_count;
        self.revealed_count = saved.revealed_count;
        self.hints_left = saved.hints_left;
        self.safe_clicks_left = saved.safe_clicks_left;
        self.is_used_exterminator = saved.is_used_exterminator;
        self.is_used_mega_hint = saved.is_used_mega_hint;
        self.mine_count = saved.mine_count;
        self.manual_layout = saved.manual_layout;
        self.triggered_mine = saved.triggered_mine;

        self.mode = Mode::Normal;
        self.mega_hint_anchor = None;
        self.first_click_pending =
            !self.manual_layout && self.revealed_count == 0 && self.marked_count == 0;
        if self.first_click_pending && self.phase.is_running() {
            self.phase = Phase::NotStarted;
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorableState {
    pub phase: Phase,
    pub lives_left: u8,
    pub marked_count: CellCount,
    pub revealed_count: CellCount,
    pub hints_left: u8,
    pub safe_clicks_left: u8,
    pub is_used_exterminator: bool,
    pub is_used_mega_hint: bool,
    pub mine_count: CellCount,
    pub manual_layout: bool,
    pub triggered_mine: Option<Coord2>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_with_mines;

    fn state_for(board: &Board, mines: CellCount) -> GameState {
        let mut state = GameState::new(&Level::custom(board.size(), mines), &SessionConfig::default());
        state.phase = Phase::Running;
        state.first_click_pending = false;
        state.revealed_count = board.count_where(|cell| cell.is_revealed);
        state.marked_count = board.count_where(|cell| cell.is_marked);
        state
    }

    #[test]
    fn win_by_reveal_ignores_flags() {
        let mut board = board_with_mines(3, &[(0, 0)]);
        for pos in board.positions().filter(|&pos| pos != (0, 0)) {
            board[pos].is_revealed = true;
        }
        assert!(state_for(&board, 1).check_win(&board));

        // a stray flag does not matter once everything safe is open
        board[(0, 0)].is_marked = true;
        let state = state_for(&board, 1);
        assert!(state.all_safe_revealed(&board));
        assert!(state.check_win(&board));
    }

    #[test]
    fn win_by_flags_ignores_reveals() {
        let mut board = board_with_mines(3, &[(0, 0), (2, 2)]);
        board[(0, 0)].is_marked = true;
        board[(2, 2)].is_marked = true;

        let state = state_for(&board, 2);
        assert!(!state.all_safe_revealed(&board));
        assert!(state.flags_match_mines(&board));
        assert!(state.check_win(&board));
    }

    #[test]
    fn wrong_or_missing_flags_do_not_win() {
        let mut board = board_with_mines(3, &[(0, 0), (2, 2)]);
        board[(0, 0)].is_marked = true;
        assert!(!state_for(&board, 2).check_win(&board));

        board[(1, 1)].is_marked = true;
        assert!(!state_for(&board, 2).check_win(&board));
    }

    #[test]
    fn both_conditions_together_still_win() {
        let mut board = board_with_mines(2, &[(0, 0)]);
        board[(0, 0)].is_marked = true;
        for pos in [(1, 0), (0, 1), (1, 1)] {
            board[pos].is_revealed = true;
        }
        let state = state_for(&board, 1);
        assert!(state.all_safe_revealed(&board) && state.flags_match_mines(&board));
        assert!(state.check_win(&board));
    }

    #[test]
    fn restore_rederives_first_click() {
        let mut state = GameState::new(&Level::BEGINNER, &SessionConfig::default());
        let saved = RestorableState {
            phase: Phase::Running,
            ..state.restorable()
        };
        state.mode = Mode::Hint;
        state.first_click_pending = false;

        state.restore(saved);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.first_click_pending);
        assert_eq!(state.phase, Phase::NotStarted);
    }

    #[test]
    fn restore_keeps_manual_layout_started() {
        let mut state = GameState::new(&Level::BEGINNER, &SessionConfig::default());
        let saved = RestorableState {
            phase: Phase::Running,
            manual_layout: true,
            ..state.restorable()
        };

        state.restore(saved);

        assert!(!state.first_click_pending);
        assert_eq!(state.phase, Phase::Running);
    }
}
