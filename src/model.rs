// ABOUTME: Serde data models for Quip API responses
// ABOUTME: Tolerant parsing with optional fields and usec timestamps

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub private_folder_id: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FolderResponse {
    pub folder: FolderInfo,
    #[serde(default)]
    pub children: Vec<FolderChild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FolderInfo {
    pub title: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// A folder listing entry: either a document (thread) or a subfolder.
/// The API tags children by which id key is present.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FolderChild {
    Thread { thread_id: String },
    Folder { folder_id: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadResponse {
    pub thread: ThreadInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadInfo {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub created_usec: i64,
    pub updated_usec: i64,
}

/// Rate-limit signals parsed from response headers, not the JSON body.
/// Absent headers mean no signal, which is treated as plenty of quota.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub remaining: Option<u32>,
    pub retry_after_secs: Option<u64>,
}

impl RateLimit {
    /// How long to pause before the next request, if remaining quota is
    /// below the low-water mark. The extra second covers header rounding.
    pub fn backoff(&self, low_water: u32) -> Option<Duration> {
        match self.remaining {
            Some(remaining) if remaining < low_water => {
                Some(Duration::from_secs(self.retry_after_secs.unwrap_or(0) + 1))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub doc_id: String,
    pub title: String,
    pub file_path: String,
}
