//! `damagedetect` - Operations dashboard for aircraft line-maintenance drones
//!
//! This library serves the dashboard pages and JSON status endpoints that show
//! detected airframe damage and the state of the inspection drone fleet, plus
//! the frame filters used to cut the bandwidth of the drones' video stream.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod frames;
pub mod logging;
pub mod records;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
pub use feed::{DirectoryFeed, MockFeed, StatusFeed};
pub use logging::init_logging;
pub use records::{DamageRecord, DamageStatus, DroneRecord, DroneStatus};
pub use web::{build_router, AppState};
