//! Built-in canned payloads.

use async_trait::async_trait;
use tracing::debug;

use super::StatusFeed;
use crate::error::Result;
use crate::records::{DamageRecord, DamageStatus, DroneRecord, DroneStatus};

/// Feed serving fixed listings compiled into the binary.
///
/// The damage listing is a lookup keyed by the refresh flag: the initial scan
/// reports two findings, the rescan adds a third.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFeed;

impl MockFeed {
    /// Create the built-in feed.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Damage findings from the initial scan.
    #[must_use]
    pub fn initial_damage() -> Vec<DamageRecord> {
        vec![
            DamageRecord::new("Loose Engine Cowling", DamageStatus::Critical, "Left Engine 1"),
            DamageRecord::new("Dirty Windshield", DamageStatus::Warning, "Cockpit"),
        ]
    }

    /// Damage findings after a rescan.
    #[must_use]
    pub fn refreshed_damage() -> Vec<DamageRecord> {
        let mut records = Self::initial_damage();
        records.push(DamageRecord::new(
            "Dented Leading Edge",
            DamageStatus::Moderate,
            "Right Wing",
        ));
        records
    }

    /// Fleet state.
    #[must_use]
    pub fn drones() -> Vec<DroneRecord> {
        vec![
            DroneRecord::new(
                "Inspection-1",
                DroneStatus::Active,
                "Left Engine 1",
                "Inspect Engine",
            ),
            DroneRecord::new(
                "Inspection-2",
                DroneStatus::Charging,
                "Right Engine 1",
                "Inspect Engine",
            ),
            DroneRecord::new("Inspection-3", DroneStatus::Maintenance, "Hangar", "Maintenance"),
        ]
    }
}

#[async_trait]
impl StatusFeed for MockFeed {
    fn name(&self) -> &'static str {
        "builtin"
    }

    async fn damage_statuses(&self, refresh: bool) -> Result<Vec<DamageRecord>> {
        debug!(refresh, "serving built-in damage statuses");
        Ok(if refresh {
            Self::refreshed_damage()
        } else {
            Self::initial_damage()
        })
    }

    async fn drone_statuses(&self) -> Result<Vec<DroneRecord>> {
        debug!("serving built-in drone statuses");
        Ok(Self::drones())
    }
}
