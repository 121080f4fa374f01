//! Remove the collector package.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::paths::DAEMON_PACKAGE;
use crate::pkg;

/// Outcome of an uninstall attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// Package was not installed; nothing to do.
    NotInstalled,
    /// Package removed.
    Removed,
}

pub fn run() -> Result<UninstallOutcome> {
    if !pkg::is_installed(DAEMON_PACKAGE).context("could not query installed packages")? {
        println!(
            "{} {DAEMON_PACKAGE} is not installed, nothing to do",
            "─".dimmed()
        );
        return Ok(UninstallOutcome::NotInstalled);
    }

    pkg::remove(DAEMON_PACKAGE).with_context(|| format!("failed to remove {DAEMON_PACKAGE}"))?;
    println!("{} Removed {DAEMON_PACKAGE}", "✓".green().bold());
    Ok(UninstallOutcome::Removed)
}
