//! Canned payloads read from JSON files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::StatusFeed;
use crate::error::{Error, Result};
use crate::records::{DamageRecord, DroneRecord};

/// Initial damage listing.
pub const DAMAGE_FILE: &str = "damage-status.json";

/// Damage listing after a rescan.
pub const DAMAGE_REFRESH_FILE: &str = "damage-status.refresh.json";

/// Drone listing.
pub const DRONE_FILE: &str = "drone-status.json";

/// Feed reading listings from a directory of JSON arrays.
///
/// Files are read on every call, so edits show up on the next page load.
#[derive(Debug, Clone)]
pub struct DirectoryFeed {
    directory: PathBuf,
}

impl DirectoryFeed {
    /// Create a feed over `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The directory payloads are read from.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn read_listing<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.directory.join(file_name);
        debug!("Reading status payload {}", path.display());

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| Error::FeedRead {
                path: path.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| Error::FeedDecode { path, source })
    }
}

#[async_trait]
impl StatusFeed for DirectoryFeed {
    fn name(&self) -> &'static str {
        "directory"
    }

    async fn damage_statuses(&self, refresh: bool) -> Result<Vec<DamageRecord>> {
        let file_name = if refresh {
            DAMAGE_REFRESH_FILE
        } else {
            DAMAGE_FILE
        };
        self.read_listing(file_name).await
    }

    async fn drone_statuses(&self) -> Result<Vec<DroneRecord>> {
        self.read_listing(DRONE_FILE).await
    }
}
