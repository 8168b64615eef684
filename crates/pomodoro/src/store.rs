//! Session storage
//!
//! Persists one record per calendar date in a single JSON file:
//! - Session log: ~/.pomodoro/sessions.json
//!
//! The file is the only source of truth. Every query re-reads it and every
//! mutation re-reads then rewrites it. Nothing is locked, so two processes
//! recording at the same moment can lose one update.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::countdown::SessionSink;
use crate::error::{PomodoroError, Result};
use crate::stats::{StatsRange, StatsSummary};
use pomodoro_core::Paths;

/// Sessions completed on one date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Number of completed sessions
    pub count: u32,
    /// Minutes credited to those sessions
    pub total_minutes: u32,
}

/// The persisted mapping of date -> daily record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    #[serde(default)]
    days: BTreeMap<NaiveDate, DailyRecord>,
}

impl SessionLog {
    /// Count one completed session on `date`, returning the new count
    pub fn record(&mut self, date: NaiveDate, minutes: u32) -> u32 {
        let record = self.days.entry(date).or_default();
        record.count = record.count.saturating_add(1);
        record.total_minutes = record.total_minutes.saturating_add(minutes);
        record.count
    }

    /// Zero the record for `date`
    pub fn reset(&mut self, date: NaiveDate) {
        self.days.insert(date, DailyRecord::default());
    }

    /// The record for `date`, if any session was ever stored on it
    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&date)
    }

    /// Sessions completed on `date`
    pub fn count_on(&self, date: NaiveDate) -> u32 {
        self.get(date).map(|r| r.count).unwrap_or(0)
    }

    /// All records, oldest date first
    pub fn records(&self) -> impl Iterator<Item = (&NaiveDate, &DailyRecord)> {
        self.days.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// File-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Path to the JSON session log
    path: PathBuf,
}

impl SessionStore {
    /// Store at the standard location for `paths`
    pub fn new(paths: &Paths) -> Self {
        Self::open(&paths.sessions_file())
    }

    /// Store backed by an explicit file
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temporary file that a save writes before renaming over the log
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the whole log; a missing or blank file is an empty log
    pub fn load(&self) -> Result<SessionLog> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session log yet");
                return Ok(SessionLog::default());
            }
            Err(e) => {
                return Err(PomodoroError::StoreCorrupt {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(SessionLog::default());
        }

        serde_json::from_str(&content).map_err(|e| PomodoroError::StoreCorrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Replace the log on disk
    pub fn save(&self, log: &SessionLog) -> Result<()> {
        let unwritable = |source: std::io::Error| PomodoroError::StoreUnwritable {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(unwritable)?;
        }

        let content = serde_json::to_string_pretty(log)
            .map_err(|e| unwritable(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        // Write-then-rename so readers never see a half-written log
        let staging = self.staging_path();
        fs::write(&staging, content).map_err(unwritable)?;
        fs::rename(&staging, &self.path).map_err(unwritable)?;

        debug!(path = %self.path.display(), days = log.days.len(), "Saved session log");
        Ok(())
    }

    /// Record a completed session on `date`, returning that date's new count
    pub fn record_completion_on(&self, date: NaiveDate, minutes: u32) -> Result<u32> {
        // Not atomic across processes: load and save are separate steps
        let mut log = self.load()?;
        let count = log.record(date, minutes);
        self.save(&log)?;

        info!(%date, minutes, count, "Recorded completed session");
        Ok(count)
    }

    /// Record a completed session today
    pub fn record_completion(&self, minutes: u32) -> Result<u32> {
        self.record_completion_on(today(), minutes)
    }

    /// Sessions completed on `date`
    pub fn count_on(&self, date: NaiveDate) -> Result<u32> {
        Ok(self.load()?.count_on(date))
    }

    /// Sessions completed today
    pub fn today_count(&self) -> Result<u32> {
        self.count_on(today())
    }

    /// Zero the record for `date`
    pub fn reset_on(&self, date: NaiveDate) -> Result<()> {
        let mut log = self.load()?;
        log.reset(date);
        self.save(&log)?;

        info!(%date, "Reset session count");
        Ok(())
    }

    /// Zero today's record
    pub fn reset_today(&self) -> Result<()> {
        self.reset_on(today())
    }

    /// Statistics for `range`, with relative ranges anchored at `today`
    pub fn compute_stats_on(&self, range: StatsRange, today: NaiveDate) -> Result<StatsSummary> {
        let log = self.load()?;
        Ok(StatsSummary::from_log(&log, range, today))
    }

    /// Statistics for `range`, anchored at the current date
    pub fn compute_stats(&self, range: StatsRange) -> Result<StatsSummary> {
        self.compute_stats_on(range, today())
    }
}

impl SessionSink for SessionStore {
    fn today_count(&mut self) -> Result<u32> {
        SessionStore::today_count(self)
    }

    fn record_completion(&mut self, minutes: u32) -> Result<u32> {
        SessionStore::record_completion(self, minutes)
    }
}
