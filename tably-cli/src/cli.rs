//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddTablesCommand, AvailabilityCommand, CancelCommand, ConfirmCommand, HoldCommand,
    InitCommand, ListCommand, ReapCommand, ShowCommand, TablesCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing restaurant table reservations.
#[derive(Parser)]
#[command(name = "tably")]
#[command(version, about = "Manage restaurant table reservations and holds", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "TABLY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "TABLY_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "TABLY_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Register table inventory for a restaurant
    AddTables(AddTablesCommand),

    /// List a restaurant's table inventory
    Tables(TablesCommand),

    /// Hold tables for a party
    Hold(HoldCommand),

    /// Confirm a held reservation
    Confirm(ConfirmCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Check whether a party could be seated
    Availability(AvailabilityCommand),

    /// Show a reservation with its assigned tables
    Show(ShowCommand),

    /// List reservations for a restaurant and date
    List(ListCommand),

    /// Release expired holds
    Reap(ReapCommand),
}
