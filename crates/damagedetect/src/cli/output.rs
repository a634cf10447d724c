//! Terminal rendering of status listings.

use std::fmt::Write as _;

use crate::error::Result;
use crate::records::{DamageRecord, DroneRecord};

use super::OutputFormat;

/// Render damage findings for the terminal.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_damage(records: &[DamageRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Plain => Ok(records
            .iter()
            .map(|r| format!("{}\t{}\t{}\n", r.status, r.damage_type, r.damage_location))
            .collect()),
        OutputFormat::Table => Ok(table(
            &["DAMAGE", "STATUS", "LOCATION"],
            records
                .iter()
                .map(|r| {
                    vec![
                        r.damage_type.clone(),
                        r.status.to_string(),
                        r.damage_location.clone(),
                    ]
                })
                .collect(),
        )),
    }
}

/// Render drone status for the terminal.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_drones(drones: &[DroneRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(drones)?),
        OutputFormat::Plain => Ok(drones
            .iter()
            .map(|d| format!("{}\t{}\t{}\t{}\n", d.name, d.status, d.location, d.current_task))
            .collect()),
        OutputFormat::Table => Ok(table(
            &["NAME", "STATUS", "LOCATION", "TASK"],
            drones
                .iter()
                .map(|d| {
                    vec![
                        d.name.clone(),
                        d.status.to_string(),
                        d.location.clone(),
                        d.current_task.clone(),
                    ]
                })
                .collect(),
        )),
    }
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_row: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    for row in std::iter::once(&header_row).chain(&rows) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
