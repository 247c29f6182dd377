//! Topic quiz leaderboard
//!
//! Finished topics are ranked by score. Kept in LocalStorage on wasm.

use serde::{Deserialize, Serialize};

/// Number of results kept
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub topic: String,
    pub score: u32,
    /// Unix time in ms when the topic was finished
    pub timestamp: f64,
}

/// Best topic results, highest score first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_quiz_leaderboard";

    pub fn new() -> Self {
        Self::default()
    }

    /// Any score makes a board with free slots; a full board needs a better one
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < MAX_ENTRIES || self.entries.last().is_none_or(|e| score > e.score)
    }

    /// 1-based rank `score` would get; ties rank below existing entries
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        Some(self.insertion_point(score) + 1)
    }

    /// Insert a finished topic. Returns its 1-based rank if it made the board.
    pub fn record(&mut self, topic: &str, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let index = self.insertion_point(score);
        self.entries.insert(
            index,
            LeaderboardEntry {
                topic: topic.to_string(),
                score,
                timestamp,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        log::info!("Leaderboard: '{}' scored {} (rank {})", topic, score, index + 1);
        Some(index + 1)
    }

    fn insertion_point(&self, score: u32) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best result for one topic
    pub fn best_for(&self, topic: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.topic == topic)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored.map(|json| serde_json::from_str::<Leaderboard>(&json)) {
            Some(Ok(board)) => {
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            Some(Err(e)) => {
                log::warn!("Discarding unreadable leaderboard: {}", e);
                Self::new()
            }
            None => Self::new(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not store leaderboard");
                }
            }
            Err(e) => log::warn!("Could not serialize leaderboard: {}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

/// Relative age of an entry, e.g. "3 mins ago"
pub fn format_age(now_ms: f64, timestamp: f64) -> String {
    let mins = ((now_ms - timestamp) / 60_000.0).max(0.0).floor() as u64;
    let hours = mins / 60;
    let days = hours / 24;

    match (days, hours, mins) {
        (1, _, _) => "Yesterday".to_string(),
        (d, _, _) if d > 1 => format!("{} days ago", d),
        (_, 1, _) => "1 hour ago".to_string(),
        (_, h, _) if h > 1 => format!("{} hours ago", h),
        (_, _, 1) => "1 min ago".to_string(),
        (_, _, m) if m > 1 => format!("{} mins ago", m),
        _ => "Just now".to_string(),
    }
}
