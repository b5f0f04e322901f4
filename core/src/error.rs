use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, requested {requested} but at most {capacity} fit")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Cannot place more than {0} flags")]
    FlagLimitReached(CellCount),
    #[error("No uses left for this power-up")]
    NoUsesLeft,
    #[error("Another mode or peek of this kind is already active")]
    ModeBusy,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is not running")]
    NotRunning,
    #[error("Nothing to undo")]
    UndoEmpty,
    #[error("No eligible cell left")]
    NoEligibleCell,
    #[error("Not enough mines left to exterminate")]
    ExterminatorRefused,
    #[error("Level cannot change while a game is running")]
    LevelLocked,
    #[error("Unknown level")]
    UnknownLevel,
}

impl GameError {
    /// Configuration errors leave the session unplayable until restart or level change.
    pub const fn is_configuration(self) -> bool {
        matches!(self, Self::TooManyMines { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
