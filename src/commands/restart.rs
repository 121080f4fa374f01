//! Restart the collector daemon.
//!
//! stop then start, unconditionally: a stop failure is reported as a
//! warning and the start attempt proceeds, so the final status is
//! start's alone.

use anyhow::Result;
use colored::Colorize;

use crate::commands::start::{self, StartOutcome};
use crate::commands::stop;
use crate::paths::ControllerPaths;

pub fn run(paths: &ControllerPaths) -> Result<StartOutcome> {
    if let Err(e) = stop::run(paths) {
        println!(
            "{} Stop failed ({e:#}); attempting start anyway",
            "⚠".yellow().bold()
        );
    }
    start::run(paths)
}
