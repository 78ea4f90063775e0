use crate::error::StorageError;
use crate::utils::fs::atomic_write;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One used topic. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub topic: String,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
}

/// JSON-array file of [`TopicRecord`]s in insertion (chronological) order.
///
/// `append` is read-modify-write of the whole file: two overlapping processes
/// can lose one append. The file itself is always replaced atomically.
#[derive(Debug, Clone)]
pub struct TopicHistoryStore {
    path: PathBuf,
}

impl TopicHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empty when the file does not exist; `StorageError::Read` when it is
    /// unreadable or not a JSON array of records.
    pub fn load(&self) -> Result<Vec<TopicRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| StorageError::read(&self.path, e))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|e| StorageError::read(&self.path, e))
    }

    /// [`load`](Self::load), treating a malformed file as empty history.
    pub fn load_or_empty(&self) -> Vec<TopicRecord> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("topic history unreadable, treating as empty: {e}");
            Vec::new()
        })
    }

    pub fn append(&self, topic: &str) -> Result<TopicRecord, StorageError> {
        self.append_at(topic, Utc::now())
    }

    pub fn append_at(&self, topic: &str, date: DateTime<Utc>) -> Result<TopicRecord, StorageError> {
        let mut history = self.load_or_empty();
        let record = TopicRecord {
            topic: topic.to_string(),
            date,
        };
        history.push(record.clone());
        self.write(&history)?;
        tracing::debug!(topic, total = history.len(), "recorded topic");
        Ok(record)
    }

    pub fn reset(&self) -> Result<(), StorageError> {
        self.write(&[])
    }

    fn write(&self, history: &[TopicRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(history)
            .map_err(|e| StorageError::write(&self.path, std::io::Error::other(e)))?;
        atomic_write(&self.path, json.as_bytes()).map_err(|e| StorageError::write(&self.path, e))
    }
}

/// `2025-03-05T09:00:00.000Z`, the shape existing history files use.
mod iso_millis {
    use super::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
