//! In-memory station directory.
//!
//! Serves a fixed station list, optionally loaded from a JSON file, so the
//! server can run without a Central Server and tests can count calls.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;

use crate::domain::StationRecord;

use super::StationDirectory;
use super::client::StationDto;
use super::error::DirectoryError;

/// What the directory answers with on every call.
#[derive(Debug, Clone)]
enum Snapshot {
    Stations(Vec<StationRecord>),
    Rejected(String),
}

/// Directory backed by a station list held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    snapshot: Snapshot,
    calls: Arc<AtomicUsize>,
}

impl InMemoryDirectory {
    /// Create a directory serving the given stations.
    pub fn new(stations: Vec<StationRecord>) -> Self {
        Self {
            snapshot: Snapshot::Stations(stations),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a directory that rejects every listing with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            snapshot: Snapshot::Rejected(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load stations from a JSON file.
    ///
    /// Accepts either a bare array of stations or the Central Server
    /// `{ "success": true, "data": [...] }` envelope.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DirectoryError::File {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&json).map_err(|e| DirectoryError::Json {
                message: format!("{}: {}", path.display(), e),
            })?;

        let list = match value {
            serde_json::Value::Object(mut map) => {
                map.remove("data").unwrap_or(serde_json::Value::Array(Vec::new()))
            }
            other => other,
        };

        let dtos: Vec<StationDto> =
            serde_json::from_value(list).map_err(|e| DirectoryError::Json {
                message: format!("{}: {}", path.display(), e),
            })?;

        Ok(Self::new(
            dtos.into_iter().map(StationDto::into_record).collect(),
        ))
    }

    /// Number of times the listing has been requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stations held, zero for a failing directory.
    pub fn len(&self) -> usize {
        match &self.snapshot {
            Snapshot::Stations(stations) => stations.len(),
            Snapshot::Rejected(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StationDirectory for InMemoryDirectory {
    fn list_active(&self) -> BoxFuture<'_, Result<Vec<StationRecord>, DirectoryError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.snapshot {
            Snapshot::Stations(stations) => Ok(stations.clone()),
            Snapshot::Rejected(message) => Err(DirectoryError::Rejected {
                message: message.clone(),
            }),
        };
        Box::pin(async move { result })
    }
}
