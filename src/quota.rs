// ABOUTME: Daily usage quota tracking for the script-deck application
// ABOUTME: Persists a (date, count) pair and resets it whenever the calendar day changes

use crate::errors::{DeckError, Result};
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const KEY_DATE: &str = "ai_presentation_gen_date";
pub const KEY_COUNT: &str = "ai_presentation_gen_count";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Key-value persistence for the quota counter.
pub trait QuotaStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryQuotaStore {
    entries: HashMap<String, String>,
}

impl MemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuotaStore for MemoryQuotaStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a small JSON object on disk.
#[derive(Debug)]
pub struct FileQuotaStore {
    path: PathBuf,
}

impl FileQuotaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        // A corrupt file is read as empty; the tracker then resets it to today.
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Ignoring corrupt quota file {:?}: {}", self.path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    // Write a sibling temp file, then rename over the target.
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        crate::utils::ensure_parent_directory_exists(&self.path)?;
        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| DeckError::QuotaStateError(e.to_string()))?;
        let tmp = self
            .path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl QuotaStore for FileQuotaStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }
}

/// Snapshot of the persisted counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaState {
    pub date: String,
    pub count: u32,
}

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Tracks how many generations are left for the current day.
pub struct QuotaTracker {
    store: Box<dyn QuotaStore>,
    limit: u32,
    today: Clock,
}

impl QuotaTracker {
    pub fn new(store: Box<dyn QuotaStore>, limit: u32) -> Self {
        Self::with_clock(store, limit, Box::new(|| Local::now().date_naive()))
    }

    pub fn with_clock(store: Box<dyn QuotaStore>, limit: u32, today: Clock) -> Self {
        Self {
            store,
            limit,
            today,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Remaining generations today. Rolls the stored state over to today if
    /// the stored date is stale.
    pub fn remaining(&mut self) -> Result<u32> {
        let state = self.current_state()?;
        Ok(self.limit.saturating_sub(state.count))
    }

    /// Record one successful generation for today.
    pub fn increment(&mut self) -> Result<()> {
        let state = self.current_state()?;
        let count = state.count.saturating_add(1);
        self.store.set(KEY_COUNT, &count.to_string())?;
        info!("Recorded generation {} of {} for {}", count, self.limit, state.date);
        Ok(())
    }

    /// Read the stored state, resetting it first when the day has changed.
    pub fn current_state(&mut self) -> Result<QuotaState> {
        let today = (self.today)().format(DATE_FORMAT).to_string();
        let stored_date = self.store.get(KEY_DATE)?;

        if stored_date.as_deref() != Some(today.as_str()) {
            debug!(
                "Quota date changed ({:?} -> {}), resetting count",
                stored_date, today
            );
            self.store.set(KEY_DATE, &today)?;
            self.store.set(KEY_COUNT, "0")?;
            return Ok(QuotaState {
                date: today,
                count: 0,
            });
        }

        let count = match self.store.get(KEY_COUNT)? {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!("Ignoring unparsable quota count {:?}", raw);
                0
            }),
            None => 0,
        };

        Ok(QuotaState { date: today, count })
    }
}
