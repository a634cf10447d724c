//! Status feeds.
//!
//! A feed is the single source the dashboard pages and JSON endpoints read
//! damage and drone listings from. Every call produces a fresh list; nothing
//! is cached between calls or shared between views.

mod directory;
mod mock;

use std::sync::Arc;

use async_trait::async_trait;

pub use directory::DirectoryFeed;
pub use mock::MockFeed;

use crate::config::{FeedConfig, FeedSource};
use crate::error::{Error, Result};
use crate::records::{DamageRecord, DroneRecord};

/// Source of damage and drone status listings.
#[async_trait]
pub trait StatusFeed: Send + Sync + std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Current damage findings.
    ///
    /// `refresh` selects the post-rescan listing instead of the initial one.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be produced.
    async fn damage_statuses(&self, refresh: bool) -> Result<Vec<DamageRecord>>;

    /// Current drone fleet state.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be produced.
    async fn drone_statuses(&self) -> Result<Vec<DroneRecord>>;
}

/// Build the feed selected by configuration.
///
/// # Errors
///
/// Returns an error if a directory feed is selected without a directory.
pub fn from_config(config: &FeedConfig) -> Result<Arc<dyn StatusFeed>> {
    match config.source {
        FeedSource::Builtin => Ok(Arc::new(MockFeed::new())),
        FeedSource::Directory => {
            let directory = config.directory.clone().ok_or_else(|| Error::ConfigValidation {
                message: "feed.directory is required when feed.source = \"directory\""
                    .to_string(),
            })?;
            Ok(Arc::new(DirectoryFeed::new(directory)))
        }
    }
}
