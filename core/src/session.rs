use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of a player action on the session
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    NoChange,
    /// A safe cell opened, `Empty` when its region cascaded
    Revealed(RevealOutcome),
    /// A mine was hit but lives remain, it flashes until the reversion fires
    LifeLost { lives_left: u8 },
    Lost,
    Won,
    Flagged,
    Unflagged,
    /// A power-up now waits for a click on the board
    ModeEntered(Mode),
    /// First corner of a mega-hint rectangle
    AnchorSet(Coord2),
    Peeking(PeekKind),
    MinePlaced { remaining: CellCount },
    /// The last hand-placed mine went down and the game is running
    LayoutComplete,
    Exterminated { removed: CellCount },
    Undone,
}

impl ActionOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// What a renderer should draw for a cell right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    Peek(PeekContent),
    /// Mine that was just hit, or the one that ended the game
    Exploded,
    Mine,
    IncorrectFlag,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub lives_left: u8,
    pub mines_left: i32,
    pub hints_left: u8,
    pub safe_clicks_left: u8,
    pub secs_passed: u32,
    pub undo_depth: usize,
    pub mega_hint_available: bool,
    pub exterminator_available: bool,
}

/// One player's game from level selection to win or loss, plus everything around it.
///
/// Owns the board, the game state, the undo stack, pending reversions, the random source and
/// the score store. Every action either applies completely or returns an error and changes
/// nothing, configuration errors aside.
#[derive(Debug)]
pub struct Session<S = MemoryScoreStore> {
    level: Level,
    config: SessionConfig,
    board: Board,
    state: GameState,
    undo: UndoStack,
    scheduler: Scheduler,
    rng: GameRng,
    peeks: Vec<ActivePeek>,
    mine_flash: Option<(Coord2, TimerId)>,
    elapsed: Duration,
    store: S,
}

impl Session<MemoryScoreStore> {
    pub fn new(level: Level, config: SessionConfig, seed: u64) -> Self {
        Self::with_store(level, config, seed, MemoryScoreStore::new())
    }
}

impl<S: ScoreStore> Session<S> {
    pub fn with_store(level: Level, config: SessionConfig, seed: u64, store: S) -> Self {
        Self {
            board: Board::new(level.size),
            state: GameState::new(&level, &config),
            undo: UndoStack::new(config.undo_capacity),
            scheduler: Scheduler::new(),
            rng: GameRng::seed_from_u64(seed),
            peeks: Vec::new(),
            mine_flash: None,
            elapsed: Duration::ZERO,
            level,
            config,
            store,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn best_score(&self) -> Option<u32> {
        self.store.best_score(&self.level.key)
    }

    pub fn active_peeks(&self) -> &[ActivePeek] {
        &self.peeks
    }

    pub fn pending_reversions(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.board.get(coords).copied().ok_or(GameError::InvalidCoords)
    }

    pub fn counters(&self) -> Counters {
        let state = &self.state;
        Counters {
            lives_left: state.lives_left,
            mines_left: state.mines_left(),
            hints_left: state.hints_left,
            safe_clicks_left: state.safe_clicks_left,
            secs_passed: state.secs_passed,
            undo_depth: self.undo.len(),
            mega_hint_available: !state.is_used_mega_hint,
            exterminator_available: !state.is_used_exterminator
                && can_exterminate(state.mine_count, self.config.exterminator_removals),
        }
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        use CellView::*;

        let coords = self.board.validate_coords(coords)?;
        let cell = self.board[coords];

        Ok(match self.state.phase {
            Phase::Lost if self.state.triggered_mine == Some(coords) => Exploded,
            Phase::Lost => match cell {
                Cell {
                    is_revealed: true,
                    mines_around,
                    ..
                } => Open(mines_around),
                Cell {
                    is_marked: true,
                    is_mine,
                    ..
                } => {
                    if is_mine {
                        Flagged
                    } else {
                        IncorrectFlag
                    }
                }
                Cell { is_mine: true, .. } => Mine,
                _ => Hidden,
            },
            Phase::Won if cell.is_mine => Flagged,
            _ if cell.is_revealed => Open(cell.mines_around),
            _ if cell.is_mine && self.state.mode == Mode::ManualPlacement => Mine,
            _ if self.mine_flash.is_some_and(|(pos, _)| pos == coords) => Exploded,
            _ => {
                let peeked = self
                    .peeks
                    .iter()
                    .rev()
                    .find_map(|peek| peek.content_at(coords));
                match peeked {
                    Some(content) => Peek(content),
                    None if cell.is_marked => Flagged,
                    None => Hidden,
                }
            }
        })
    }

    /// Reveal, or feed the click to the active power-up mode.
    pub fn primary_activate(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        use ActionOutcome::*;

        let coords = self.board.validate_coords(coords)?;
        self.check_playable()?;

        match self.state.mode {
            Mode::ManualPlacement => return self.place_manual_mine(coords),
            Mode::Hint => return self.use_hint(coords),
            Mode::MegaHint => return self.select_mega_hint(coords),
            Mode::Normal => {}
        }

        let cell = self.board[coords];
        if cell.is_marked || cell.is_revealed {
            return Ok(NoChange);
        }
        self.check_level_fits()?;

        self.push_undo();
        if self.state.first_click_pending {
            self.start_game(coords)?;
        }

        let reveal = reveal_cell(&mut self.board, coords)?;
        self.state.revealed_count += reveal.opened;

        Ok(match reveal.outcome {
            RevealOutcome::AlreadyHandled => NoChange,
            RevealOutcome::HitMine => self.hit_mine(coords),
            outcome @ (RevealOutcome::Number(_) | RevealOutcome::Empty) => {
                if self.state.check_win(&self.board) {
                    self.end_game(true);
                    Won
                } else {
                    Revealed(outcome)
                }
            }
        })
    }

    /// Toggle a flag. The first flag of a game places the mines around it like a first click.
    pub fn secondary_activate(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        use ActionOutcome::*;

        let coords = self.board.validate_coords(coords)?;
        self.check_playable()?;
        if self.state.mode == Mode::ManualPlacement {
            return Err(GameError::ModeBusy);
        }

        let cell = self.board[coords];
        if cell.is_revealed {
            return Ok(NoChange);
        }
        self.check_level_fits()?;
        if !cell.is_marked && self.state.marked_count >= self.state.mine_count {
            return Err(GameError::FlagLimitReached(self.state.mine_count));
        }

        self.push_undo();
        if self.state.first_click_pending {
            self.start_game(coords)?;
        }

        let outcome = if cell.is_marked {
            self.board[coords].is_marked = false;
            self.state.marked_count -= 1;
            Unflagged
        } else {
            self.board[coords].is_marked = true;
            self.state.marked_count += 1;
            Flagged
        };

        if self.state.check_win(&self.board) {
            self.end_game(true);
            return Ok(Won);
        }
        Ok(outcome)
    }

    pub fn activate_powerup(&mut self, powerup: Powerup) -> Result<ActionOutcome> {
        use ActionOutcome::*;

        self.check_playable()?;

        match powerup {
            Powerup::ManualPlacement => self.enter_manual_placement(),
            Powerup::Hint => {
                self.check_powerup_ready()?;
                if self.state.hints_left == 0 {
                    return Err(GameError::NoUsesLeft);
                }
                if self.peeks.iter().any(|peek| peek.kind == PeekKind::Hint) {
                    return Err(GameError::ModeBusy);
                }
                self.state.mode = Mode::Hint;
                Ok(ModeEntered(Mode::Hint))
            }
            Powerup::MegaHint => {
                self.check_powerup_ready()?;
                if self.state.is_used_mega_hint {
                    return Err(GameError::NoUsesLeft);
                }
                self.state.mode = Mode::MegaHint;
                self.state.mega_hint_anchor = None;
                Ok(ModeEntered(Mode::MegaHint))
            }
            Powerup::SafeClick => {
                self.check_powerup_ready()?;
                if self.state.safe_clicks_left == 0 {
                    return Err(GameError::NoUsesLeft);
                }
                let target =
                    pick_safe_cell(&self.board, &mut self.rng).ok_or(GameError::NoEligibleCell)?;

                self.push_undo();
                self.state.safe_clicks_left -= 1;
                let cells = peek_cells(&self.board, [target]);
                self.start_peek(PeekKind::SafeClick, cells, self.config.safe_click_duration);
                Ok(Peeking(PeekKind::SafeClick))
            }
            Powerup::Exterminator => {
                self.check_powerup_ready()?;
                if self.state.is_used_exterminator {
                    return Err(GameError::NoUsesLeft);
                }
                let snapshot = Snapshot::capture(&self.board, &self.state);
                let removed = exterminate(
                    &mut self.board,
                    &mut self.rng,
                    self.config.exterminator_removals,
                )?;

                self.undo.push(snapshot);
                self.state.is_used_exterminator = true;
                if let Some((pos, timer)) = self.mine_flash {
                    if removed.contains(&pos) {
                        self.scheduler.cancel(timer);
                        self.mine_flash = None;
                    }
                }
                // never more than the board holds
                let removed = removed.len() as CellCount;
                self.state.mine_count -= removed;

                if self.state.check_win(&self.board) {
                    self.end_game(true);
                    return Ok(Won);
                }
                Ok(Exterminated { removed })
            }
        }
    }

    pub fn request_undo(&mut self) -> Result<ActionOutcome> {
        if self.state.phase.is_final() {
            return Err(GameError::AlreadyEnded);
        }

        let snapshot = self.undo.pop()?;
        self.clear_transients();
        self.board = snapshot.board;
        self.state.restore(snapshot.game);
        log::debug!("Undo, {} snapshots left", self.undo.len());
        Ok(ActionOutcome::Undone)
    }

    /// Starts over on the same level.
    pub fn request_restart(&mut self) {
        log::debug!("Restart on level {}", self.level.key);
        self.reset();
    }

    pub fn select_level(&mut self, key: &str) -> Result<()> {
        if self.state.phase.is_running() {
            return Err(GameError::LevelLocked);
        }
        let level = Level::from_key(key)?;
        self.set_level(level)
    }

    /// Switches to any level, including custom ones, and starts a new game on it.
    pub fn set_level(&mut self, level: Level) -> Result<()> {
        if self.state.phase.is_running() {
            return Err(GameError::LevelLocked);
        }
        log::debug!(
            "Level {} selected, {}x{} with {} mines",
            level.key,
            level.size,
            level.size,
            level.mine_count
        );
        self.level = level;
        self.reset();
        Ok(())
    }

    /// Moves the session clock, applying every reversion that came due. Play time only counts while running.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Reversion> {
        if self.state.phase.is_running() {
            self.elapsed = self.elapsed.saturating_add(elapsed);
            self.state.secs_passed = u32::try_from(self.elapsed.as_secs()).unwrap_or(u32::MAX);
        }

        let fired = self.scheduler.advance(elapsed);
        for &(id, reversion) in &fired {
            match reversion {
                Reversion::Peek(kind) => {
                    log::trace!("{:?} peek expired", kind);
                    self.peeks.retain(|peek| peek.timer != id);
                }
                Reversion::MineFlash => {
                    if self.mine_flash.is_some_and(|(_, timer)| timer == id) {
                        self.mine_flash = None;
                    }
                }
            }
        }
        fired.into_iter().map(|(_, reversion)| reversion).collect()
    }

    fn check_playable(&self) -> Result<()> {
        match self.state.phase {
            Phase::Won | Phase::Lost => Err(GameError::AlreadyEnded),
            Phase::Misconfigured => self.level.validate().and(Err(GameError::NotRunning)),
            Phase::NotStarted | Phase::Running => Ok(()),
        }
    }

    /// Power-ups other than manual placement need a running game and no other mode in progress.
    fn check_powerup_ready(&self) -> Result<()> {
        if self.state.mode == Mode::ManualPlacement {
            return Err(GameError::ModeBusy);
        }
        if !self.state.phase.is_running() {
            return Err(GameError::NotRunning);
        }
        if self.state.mode != Mode::Normal {
            return Err(GameError::ModeBusy);
        }
        Ok(())
    }

    /// Before the first move, a level that cannot keep one cell safe locks the session.
    fn check_level_fits(&mut self) -> Result<()> {
        if !self.state.first_click_pending {
            return Ok(());
        }
        self.level.validate().inspect_err(|_| {
            self.clear_transients();
            self.state.mode = Mode::Normal;
            self.state.phase = Phase::Misconfigured;
        })
    }

    fn start_game(&mut self, first: Coord2) -> Result<()> {
        place_mines(&mut self.board, &mut self.rng, first, self.level.mine_count)?;
        self.state.mine_count = self.level.mine_count;
        self.state.first_click_pending = false;
        self.mark_started();
        Ok(())
    }

    fn mark_started(&mut self) {
        if matches!(self.state.phase, Phase::NotStarted) {
            log::debug!("Game started on level {}", self.level.key);
            self.state.phase = Phase::Running;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.phase.is_final() {
            return;
        }

        self.clear_transients();
        self.state.mode = Mode::Normal;
        self.state.mega_hint_anchor = None;
        self.state.phase = if won { Phase::Won } else { Phase::Lost };
        log::debug!(
            "Game {} after {}s",
            if won { "won" } else { "lost" },
            self.state.secs_passed
        );

        if won {
            self.state.triggered_mine = None;
            let secs = self.state.secs_passed;
            if self.store.record_score_if_better(&self.level.key, secs) {
                log::debug!("New best score on level {}: {}s", self.level.key, secs);
            }
        }
    }

    fn hit_mine(&mut self, coords: Coord2) -> ActionOutcome {
        self.state.lives_left = self.state.lives_left.saturating_sub(1);

        if self.state.lives_left == 0 {
            self.state.triggered_mine = Some(coords);
            self.end_game(false);
            ActionOutcome::Lost
        } else {
            let timer = self
                .scheduler
                .schedule(Reversion::MineFlash, self.config.mine_flash_duration);
            self.mine_flash = Some((coords, timer));
            log::debug!("Mine hit at {:?}, {} lives left", coords, self.state.lives_left);
            ActionOutcome::LifeLost {
                lives_left: self.state.lives_left,
            }
        }
    }

    fn use_hint(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        self.push_undo();
        self.state.mode = Mode::Normal;
        self.state.hints_left = self.state.hints_left.saturating_sub(1);

        let cells = peek_cells(&self.board, hint_area(&self.board, coords));
        self.start_peek(PeekKind::Hint, cells, self.config.hint_duration);
        Ok(ActionOutcome::Peeking(PeekKind::Hint))
    }

    fn select_mega_hint(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let Some(anchor) = self.state.mega_hint_anchor else {
            self.state.mega_hint_anchor = Some(coords);
            return Ok(ActionOutcome::AnchorSet(coords));
        };

        self.push_undo();
        self.state.mode = Mode::Normal;
        self.state.mega_hint_anchor = None;
        self.state.is_used_mega_hint = true;

        let cells = peek_cells(&self.board, self.board.rect(anchor, coords));
        self.start_peek(PeekKind::MegaHint, cells, self.config.mega_hint_duration);
        Ok(ActionOutcome::Peeking(PeekKind::MegaHint))
    }

    fn enter_manual_placement(&mut self) -> Result<ActionOutcome> {
        if self.state.phase != Phase::NotStarted || !self.state.first_click_pending {
            return Err(GameError::LevelLocked);
        }
        if self.state.mode != Mode::Normal {
            return Err(GameError::ModeBusy);
        }
        self.check_level_fits()?;
        if self.level.mine_count == 0 {
            return Err(GameError::NoEligibleCell);
        }

        // a new layout starts a new game
        self.clear_transients();
        self.undo.clear();
        self.elapsed = Duration::ZERO;
        self.state.secs_passed = 0;
        self.board.clear_mines();
        self.state.mode = Mode::ManualPlacement;
        log::debug!("Manual placement of {} mines", self.level.mine_count);
        Ok(ActionOutcome::ModeEntered(Mode::ManualPlacement))
    }

    fn place_manual_mine(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        if self.board[coords].is_mine {
            return Ok(ActionOutcome::NoChange);
        }

        self.board[coords].is_mine = true;
        let remaining = self.level.mine_count.saturating_sub(self.board.mine_count());
        if remaining > 0 {
            return Ok(ActionOutcome::MinePlaced { remaining });
        }

        self.board.compute_adjacency();
        self.state.mode = Mode::Normal;
        self.state.mine_count = self.level.mine_count;
        self.state.manual_layout = true;
        self.state.first_click_pending = false;
        self.mark_started();
        Ok(ActionOutcome::LayoutComplete)
    }

    fn start_peek(&mut self, kind: PeekKind, cells: Vec<(Coord2, PeekContent)>, duration: Duration) {
        self.peeks.retain(|peek| peek.kind != kind);
        let timer = self.scheduler.schedule(Reversion::Peek(kind), duration);
        log::debug!("{:?} peeking {} cells", kind, cells.len());
        self.peeks.push(ActivePeek { kind, cells, timer });
    }

    fn push_undo(&mut self) {
        self.undo.push(Snapshot::capture(&self.board, &self.state));
    }

    fn clear_transients(&mut self) {
        self.scheduler.cancel_all();
        self.peeks.clear();
        self.mine_flash = None;
    }

    fn reset(&mut self) {
        self.clear_transients();
        self.board = Board::new(self.level.size);
        self.state = GameState::new(&self.level, &self.config);
        self.undo.clear();
        self.elapsed = Duration::ZERO;
    }
}
