//! CLI command implementations.
//!
//! Each command lives in its own module and exposes an `execute` method
//! taking the shared global options.

mod add_tables;
mod availability;
mod cancel;
mod confirm;
mod hold;
mod init;
mod list;
mod reap;
mod show;
mod tables;

pub use add_tables::AddTablesCommand;
pub use availability::AvailabilityCommand;
pub use cancel::CancelCommand;
pub use confirm::ConfirmCommand;
pub use hold::HoldCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reap::ReapCommand;
pub use show::ShowCommand;
pub use tables::TablesCommand;
