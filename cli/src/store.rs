use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sweeper_core::{MemoryScoreStore, ScoreStore};

/// Best scores kept in a JSON file, rewritten whenever a score improves.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    scores: MemoryScoreStore,
}

impl JsonScoreStore {
    /// Loads the file, a missing file starts an empty table.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)
                .with_context(|| format!("Could not parse scores in {}", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => MemoryScoreStore::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("Could not read {}", path.display()));
            }
        };
        log::debug!("Loaded scores from {}", path.display());
        Ok(Self { path, scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &MemoryScoreStore {
        &self.scores
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.scores)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Could not write {}", self.path.display()))
    }
}

impl ScoreStore for JsonScoreStore {
    fn best_score(&self, level_key: &str) -> Option<u32> {
        self.scores.best_score(level_key)
    }

    fn record_score_if_better(&mut self, level_key: &str, secs: u32) -> bool {
        if !self.scores.record_score_if_better(level_key, secs) {
            return false;
        }
        if let Err(err) = self.save() {
            log::error!("Could not save scores: {:?}", err);
        }
        true
    }
}
