//! Reap command implementation.
//!
//! Releases expired holds: once, or continuously with `--watch`.

use std::time::Duration;

use clap::Args;
use tably::{ReapOperations, Reaper};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Release expired holds.
#[derive(Args)]
pub struct ReapCommand {
    /// Keep sweeping on an interval instead of exiting
    #[arg(long)]
    pub watch: bool,

    /// Sweep interval in seconds for watch mode
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,
}

impl ReapCommand {
    /// Execute the reap command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if self.watch {
            let interval = self.interval.unwrap_or_else(|| config.reap_interval_seconds());
            if !global.quiet {
                eprintln!("Sweeping expired holds every {interval}s (Ctrl-C to stop)");
            }

            let reaper = Reaper::spawn(db, Duration::from_secs(interval)).map_err(CliError::from)?;
            // The reaper runs until the process is interrupted
            loop {
                std::thread::sleep(Duration::from_secs(3600));
                if !reaper.is_running() {
                    return Err(CliError::Config("reaper thread exited".to_string()));
                }
            }
        }

        let result = ReapOperations::reap(&mut db)?;

        if global.quiet {
            println!("{}", result.released);
        } else {
            println!(
                "Released {} expired hold(s), cancelled {} reservation(s)",
                result.released, result.cancelled
            );
        }

        Ok(())
    }
}
