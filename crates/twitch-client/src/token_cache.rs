//! App access token storage.
//!
//! One record per client id, overwritten on every successful token fetch.
//! Freshness is checked lazily by the caller; stale records are never
//! deleted, only replaced.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::TwitchError;

/// How long a fetched token is reused before a new one is requested.
pub const FRESHNESS_WINDOW_SECS: i64 = 60 * 60;

/// A bearer token together with the moment it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn new(access_token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            issued_at,
        }
    }

    /// Reusable iff `now - issued_at` is under one hour.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.issued_at) < Duration::seconds(FRESHNESS_WINDOW_SECS)
    }
}

/// Storage for the single cached app token.
///
/// Implementations must treat unreadable entries as a miss. Writes are not
/// coordinated between concurrent callers; the last write wins.
pub trait TokenCache: Send + Sync {
    fn get(&self) -> Option<CachedToken>;
    fn put(&self, token: &CachedToken) -> Result<(), TwitchError>;
}

/// On-disk record. `client_id` keys the record to a provider identity.
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    #[serde(default)]
    client_id: String,
    access_token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

/// JSON file cache, by default `./cache/twitch-token.json`.
pub struct FileTokenCache {
    path: PathBuf,
    client_id: String,
}

impl FileTokenCache {
    pub const FILE_NAME: &'static str = "twitch-token.json";

    pub fn new(path: impl Into<PathBuf>, client_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            client_id: client_id.into(),
        }
    }

    /// Cache file `twitch-token.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, client_id: impl Into<String>) -> Self {
        Self::new(dir.as_ref().join(Self::FILE_NAME), client_id)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenCache for FileTokenCache {
    fn get(&self) -> Option<CachedToken> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable token cache, ignoring");
                return None;
            }
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Corrupt token cache, ignoring");
                return None;
            }
        };

        if record.client_id != self.client_id {
            tracing::debug!("Token cache belongs to a different client id");
            return None;
        }

        Some(CachedToken::new(record.access_token, record.timestamp))
    }

    /// Writes a sibling temp file and renames it over the record, so a
    /// concurrent `get` sees either the old record or the new one.
    fn put(&self, token: &CachedToken) -> Result<(), TwitchError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let record = CacheRecord {
            client_id: self.client_id.clone(),
            access_token: token.access_token.clone(),
            timestamp: token.issued_at,
        };

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(&serde_json::to_vec(&record)?)?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process cache. Counts writes so callers can assert refresh behavior.
#[derive(Default)]
pub struct MemoryTokenCache {
    slot: Mutex<Option<CachedToken>>,
    writes: Mutex<usize>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: CachedToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
            writes: Mutex::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenCache for MemoryTokenCache {
    fn get(&self) -> Option<CachedToken> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn put(&self, token: &CachedToken) -> Result<(), TwitchError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.clone());
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
