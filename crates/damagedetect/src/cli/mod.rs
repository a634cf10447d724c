//! Command-line interface for damagedetect.
//!
//! This module provides the CLI structure for the `damagedetect` binary.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, DamageCommand, DronesCommand, OutputFormat, ServeCommand};
pub use output::{format_damage, format_drones};

/// damagedetect - Line-maintenance drone operations dashboard
///
/// Serves the damage and drone status dashboard and its JSON endpoints, and
/// prints the same listings from the terminal.
#[derive(Debug, Parser)]
#[command(name = "damagedetect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the dashboard web server
    Serve(ServeCommand),

    /// Print damage findings
    Damage(DamageCommand),

    /// Print drone fleet status
    Drones(DronesCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
