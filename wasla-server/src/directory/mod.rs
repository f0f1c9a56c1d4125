//! Station directory access.
//!
//! The Central Server owns the list of stations. This module provides the
//! `StationDirectory` seam through which the ranking code reads a snapshot,
//! an HTTP implementation for the Central Server, and an in-memory one.

mod client;
mod error;
mod memory;

use futures::future::BoxFuture;

use crate::domain::StationRecord;

pub use client::{
    CentralServerClient, CentralServerConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, StationDto,
};
pub use error::DirectoryError;
pub use memory::InMemoryDirectory;

/// Source of station snapshots.
///
/// Implementations return every station they know about; filtering for
/// eligibility happens in the caller. No caching or retrying is expected.
pub trait StationDirectory: Send + Sync {
    /// List the directory's stations.
    fn list_active(&self) -> BoxFuture<'_, Result<Vec<StationRecord>, DirectoryError>>;
}
