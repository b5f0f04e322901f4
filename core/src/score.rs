use alloc::collections::BTreeMap;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Best completion time per level, in seconds. Lower is better.
///
/// The engine writes to it when a game is won and never reads it for gameplay.
pub trait ScoreStore {
    fn best_score(&self, level_key: &str) -> Option<u32>;

    /// Stores `secs` when there is no score yet or it beats the stored one, returns whether it did.
    fn record_score_if_better(&mut self, level_key: &str, secs: u32) -> bool;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryScoreStore {
    best: BTreeMap<String, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.best.iter().map(|(key, &secs)| (key.as_str(), secs))
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best_score(&self, level_key: &str) -> Option<u32> {
        self.best.get(level_key).copied()
    }

    fn record_score_if_better(&mut self, level_key: &str, secs: u32) -> bool {
        match self.best.get_mut(level_key) {
            Some(best) if *best <= secs => false,
            Some(best) => {
                *best = secs;
                true
            }
            None => {
                self.best.insert(level_key.into(), secs);
                true
            }
        }
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn best_score(&self, level_key: &str) -> Option<u32> {
        (**self).best_score(level_key)
    }

    fn record_score_if_better(&mut self, level_key: &str, secs: u32) -> bool {
        (**self).record_score_if_better(level_key, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_faster_times() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.best_score("beginner"), None);

        assert!(store.record_score_if_better("beginner", 40));
        assert!(!store.record_score_if_better("beginner", 40));
        assert!(!store.record_score_if_better("beginner", 55));
        assert!(store.record_score_if_better("beginner", 12));

        assert_eq!(store.best_score("beginner"), Some(12));
        assert_eq!(store.best_score("expert"), None);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut store = MemoryScoreStore::new();
        store.record_score_if_better("medium", 90);

        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"medium":90}"#);
        assert_eq!(serde_json::from_str::<MemoryScoreStore>(&json).unwrap(), store);
    }
}
