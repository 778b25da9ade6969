//! Top-N leaderboard persisted as one JSON array under a single storage key.
//!
//! The stored sequence is always sorted by score (descending, stable on ties)
//! and holds at most `capacity` entries. It is read once, the first time the
//! board is needed, and overwritten whole on every accepted submission. Storage
//! problems are logged and swallowed; from then on the in-memory list is
//! authoritative, so a broken store degrades to a session-only board.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::PageResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub date: String,
}

// --- Storage ------------------------------------------------------------------

/// Minimal key-value persistence (`localStorage` in the browser).
pub trait KeyValueStore {
    fn load(&self, key: &str) -> PageResult<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> PageResult<()>;
}

/// In-memory store. Clones share the same map, so a test can keep a handle and
/// inspect (or corrupt) what the leaderboard wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> PageResult<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> PageResult<()> {
        self.put(key, value);
        Ok(())
    }
}

// --- Leaderboard ----------------------------------------------------------------

pub struct Leaderboard {
    store: Box<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    max_name_chars: usize,
    entries: Vec<LeaderboardEntry>,
    loaded: bool,
}

impl Leaderboard {
    pub fn new(store: Box<dyn KeyValueStore>, cfg: &GameConfig) -> Self {
        Self {
            store,
            key: cfg.storage_key.clone(),
            capacity: cfg.leaderboard_capacity,
            max_name_chars: cfg.max_name_chars,
            entries: Vec::new(),
            loaded: false,
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The ranked list, read from storage on first use. Missing or malformed
    /// data yields an empty board; later calls never touch storage again.
    pub fn load(&mut self) -> &[LeaderboardEntry] {
        if !self.loaded {
            self.loaded = true;
            match self.read() {
                Ok(mut stored) => {
                    rank(&mut stored, self.capacity);
                    self.entries = stored;
                }
                Err(e) => log::warn!("failed to read high scores, keeping session list: {e}"),
            }
        }
        &self.entries
    }

    fn read(&self) -> PageResult<Vec<LeaderboardEntry>> {
        match self.store.load(&self.key)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    /// Insert a named score. Returns `None` (and changes nothing) when the
    /// trimmed name is empty; otherwise the ranked, truncated list.
    pub fn submit(&mut self, name: &str, score: u32, date: &str) -> Option<&[LeaderboardEntry]> {
        let name = clean_name(name, self.max_name_chars)?;
        self.load();
        self.entries.push(LeaderboardEntry {
            name,
            score,
            date: date.to_string(),
        });
        rank(&mut self.entries, self.capacity);
        if let Err(e) = self.persist() {
            log::warn!("failed to persist high scores: {e}");
        }
        Some(self.entries.as_slice())
    }

    fn persist(&mut self) -> PageResult<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.save(&self.key, &json)
    }

    /// Record-worthy: positive, and either a free slot exists or it beats the
    /// current lowest entry.
    pub fn is_new_high_score(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < self.capacity {
            return true;
        }
        self.entries
            .iter()
            .map(|e| e.score)
            .min()
            .is_none_or(|min| score > min)
    }

    /// Row of the first entry with this name and score, for highlighting a
    /// fresh submission.
    pub fn position_of(&self, name: &str, score: u32) -> Option<usize> {
        let name = clean_name(name, self.max_name_chars)?;
        self.entries
            .iter()
            .position(|e| e.score == score && e.name == name)
    }
}

/// Stable sort by score, highest first, then keep the top `capacity`.
fn rank(entries: &mut Vec<LeaderboardEntry>, capacity: usize) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(capacity);
}

fn clean_name(raw: &str, max_chars: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect::<String>().trim_end().to_string())
}
