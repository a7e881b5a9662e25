use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::{LEADERBOARD_SLOT, StateStore};

pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
    pub date: String,
}

/// Best scores first, at most [`MAX_LEADERBOARD_ENTRIES`].
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Leaderboard {
    entries: Vec<HighScore>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A missing or unreadable slot is an empty leaderboard.
    pub fn load<S: StateStore>(store: &S) -> Self {
        let content = match store.read(LEADERBOARD_SLOT) {
            Ok(Some(content)) => content,
            Ok(None) => return Self::new(),
            Err(e) => {
                crate::log!("Failed to read leaderboard: {}", e);
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<HighScore>>(&content) {
            Ok(entries) => Self::from_entries(entries),
            Err(e) => {
                crate::log!("Ignoring malformed leaderboard: {}", e);
                Self::new()
            }
        }
    }

    pub fn save<S: StateStore>(&self, store: &S) -> Result<(), StoreError> {
        let content = serde_json::to_string(&self.entries)?;
        store.write(LEADERBOARD_SLOT, &content)
    }

    fn from_entries(entries: Vec<HighScore>) -> Self {
        let mut leaderboard = Self { entries };
        leaderboard.normalize();
        leaderboard
    }

    fn normalize(&mut self) {
        // stable: among equal scores the older entry stays ahead
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
    }

    /// Inserts an entry and returns its rank, or `None` if it did not make the cut.
    pub fn add(&mut self, name: &str, score: u32, date: &str) -> Option<usize> {
        self.entries.push(HighScore {
            name: name.to_string(),
            score,
            date: date.to_string(),
        });
        let inserted = self.entries.len() - 1;
        let rank = self.entries[..inserted]
            .iter()
            .filter(|entry| entry.score >= score)
            .count();
        let entry = self.entries.remove(inserted);
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        (rank < MAX_LEADERBOARD_ENTRIES).then_some(rank)
    }

    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
