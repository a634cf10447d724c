//! Status records shown on the dashboard.
//!
//! Two flat record shapes travel through the system: damage findings on the
//! airframe and the state of each inspection drone. Both serialize with the
//! camelCase field names the dashboard's JSON endpoints expose.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a reported airframe defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageStatus {
    /// Aircraft must not fly until resolved.
    Critical,
    /// Needs attention before the next scheduled check.
    Moderate,
    /// Cosmetic or within limits.
    Minor,
    /// Not damage as such, but worth a look.
    Warning,
}

impl DamageStatus {
    /// Every damage status, in declaration order.
    pub const ALL: [Self; 4] = [Self::Critical, Self::Moderate, Self::Minor, Self::Warning];

    /// The variant name as shown to operators.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Moderate => "Moderate",
            Self::Minor => "Minor",
            Self::Warning => "Warning",
        }
    }

    /// Background class used for the status pulse.
    #[must_use]
    pub fn color_class(self) -> &'static str {
        match self {
            Self::Critical => "bg-red-500",
            Self::Moderate => "bg-orange-500",
            Self::Minor => "bg-yellow-500",
            Self::Warning => "bg-cyan-500",
        }
    }
}

/// Operational state of an inspection drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneStatus {
    /// Flying a task.
    Active,
    /// Powered down.
    Inactive,
    /// On a charger.
    Charging,
    /// Parked in its dock.
    Docked,
    /// Out of service.
    Maintenance,
}

impl DroneStatus {
    /// Every drone status, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::Inactive,
        Self::Charging,
        Self::Docked,
        Self::Maintenance,
    ];

    /// The variant name as shown to operators.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Charging => "Charging",
            Self::Docked => "Docked",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Background class used for the status pulse.
    #[must_use]
    pub fn color_class(self) -> &'static str {
        match self {
            Self::Inactive => "bg-gray-500",
            Self::Charging => "bg-cyan-500",
            Self::Docked => "bg-blue-500",
            Self::Maintenance => "bg-yellow-500",
            Self::Active => "bg-green-500",
        }
    }
}

impl fmt::Display for DamageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reported airframe defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRecord {
    /// What was found (free text).
    pub damage_type: String,
    /// Severity.
    pub status: DamageStatus,
    /// Where on the airframe (free text).
    pub damage_location: String,
}

impl DamageRecord {
    /// Create a damage record.
    #[must_use]
    pub fn new(
        damage_type: impl Into<String>,
        status: DamageStatus,
        damage_location: impl Into<String>,
    ) -> Self {
        Self {
            damage_type: damage_type.into(),
            status,
            damage_location: damage_location.into(),
        }
    }
}

/// A fleet unit and what it is doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneRecord {
    /// Unit name; unique within a listing.
    pub name: String,
    /// Operational state.
    pub status: DroneStatus,
    /// Where the drone is (free text).
    pub location: String,
    /// Assigned task (free text).
    pub current_task: String,
}

impl DroneRecord {
    /// Create a drone record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        status: DroneStatus,
        location: impl Into<String>,
        current_task: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            location: location.into(),
            current_task: current_task.into(),
        }
    }
}
