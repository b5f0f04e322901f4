use alloc::borrow::Cow;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count a game is played with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub size: Coord,
    pub mine_count: CellCount,
    pub key: Cow<'static, str>,
}

impl Level {
    pub const BEGINNER: Self = Self::preset("beginner", 4, 2);
    pub const MEDIUM: Self = Self::preset("medium", 8, 14);
    pub const EXPERT: Self = Self::preset("expert", 12, 32);

    pub const PRESETS: [Self; 3] = [Self::BEGINNER, Self::MEDIUM, Self::EXPERT];

    const fn preset(key: &'static str, size: Coord, mine_count: CellCount) -> Self {
        Self {
            size,
            mine_count,
            key: Cow::Borrowed(key),
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        Self::PRESETS
            .into_iter()
            .find(|level| level.key == key)
            .ok_or(GameError::UnknownLevel)
    }

    /// Custom level, mine count is only validated once the first click places the mines.
    pub fn custom(size: Coord, mine_count: CellCount) -> Self {
        Self {
            size: size.max(1),
            mine_count,
            key: Cow::Borrowed("custom"),
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub fn validate(&self) -> Result<()> {
        check_mine_capacity(self.size, self.mine_count)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::BEGINNER
    }
}
