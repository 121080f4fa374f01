//! Stop the collector daemon with graceful-then-forceful escalation.

use anyhow::Result;
use colored::Colorize;

use crate::commands::resolve::resolve_targets;
use crate::paths::{ControllerPaths, DAEMON_PROCESS_NAME};
use crate::pidfile;
use crate::process::{self, ShutdownKind};

/// Outcome of a stop attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No matching process; nothing to do.
    NotRunning,
    /// Every target exited on SIGTERM.
    Graceful,
    /// SIGKILL was needed.
    Forced,
}

pub fn run(paths: &ControllerPaths) -> Result<StopOutcome> {
    let targets = resolve_targets(paths);
    if targets.is_empty() {
        println!("{} {DAEMON_PROCESS_NAME} is not running", "─".dimmed());
        return Ok(StopOutcome::NotRunning);
    }

    println!(
        "Stopping {DAEMON_PROCESS_NAME} (PID{} {})...",
        if targets.len() == 1 { "" } else { "s" },
        format_pids(&targets),
    );

    let kind = process::shutdown(&targets)?;
    clear_record(paths);
    match kind {
        ShutdownKind::Graceful => {
            println!("{} Daemon stopped", "✓".green().bold());
            Ok(StopOutcome::Graceful)
        }
        ShutdownKind::Forced => {
            println!(
                "{} Daemon ignored the termination request and was killed",
                "⚠".yellow().bold()
            );
            Ok(StopOutcome::Forced)
        }
    }
}

fn clear_record(paths: &ControllerPaths) {
    if let Err(e) = pidfile::remove(&paths.pid_file) {
        println!("{} Could not remove PID record: {e}", "⚠".yellow().bold());
    }
}

fn format_pids(pids: &[u32]) -> String {
    pids.iter()
        .map(|pid| pid.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
