use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Budgets and timings of a session, fixed for the lifetime of each game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub lives: u8,
    pub hints: u8,
    pub safe_clicks: u8,
    /// Mines removed by the exterminator.
    pub exterminator_removals: u16,
    pub hint_duration: Duration,
    pub mega_hint_duration: Duration,
    pub safe_click_duration: Duration,
    /// How long a mine that cost a life stays visible.
    pub mine_flash_duration: Duration,
    /// `None` keeps every snapshot until the next game.
    pub undo_capacity: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            hints: 3,
            safe_clicks: 3,
            exterminator_removals: 3,
            hint_duration: Duration::from_millis(1500),
            mega_hint_duration: Duration::from_millis(2000),
            safe_click_duration: Duration::from_millis(1500),
            mine_flash_duration: Duration::from_millis(333),
            undo_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{ "lives": 1 }"#).unwrap();
        assert_eq!(config.lives, 1);
        assert_eq!(config.hints, 3);
        assert_eq!(config.undo_capacity, None);
    }
}
