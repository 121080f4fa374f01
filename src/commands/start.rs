//! Start the collector daemon.
//!
//! Success means the spawn call succeeded; the controller does not wait
//! for the daemon to initialize. A daemon that exits right after spawn
//! still reports as started, and the failure shows up in the log file the
//! start message points at.

use std::fs::OpenOptions;
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::debug;

use crate::config::CollectorConfig;
use crate::paths::{ControllerPaths, DAEMON_PROCESS_NAME};
use crate::pidfile::{self, PidRecord};
use crate::process;

/// Outcome of a start attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Daemon spawned and its PID recorded.
    Started { pid: u32 },
    /// A recorded daemon PID is still alive; nothing was spawned.
    AlreadyRunning { pid: u32 },
}

pub fn run(paths: &ControllerPaths) -> Result<StartOutcome> {
    if !paths.daemon_bin.exists() {
        bail!(
            "daemon binary {} not found; run 'collectorctl install' first",
            paths.daemon_bin.display()
        );
    }
    if !paths.config_file.exists() {
        bail!(
            "configuration file {} not found",
            paths.config_file.display()
        );
    }

    if let Ok(Some(record)) = pidfile::load(&paths.pid_file) {
        if process::is_alive(record.pid) {
            println!(
                "{} Daemon already running (PID {})",
                "✓".green().bold(),
                record.pid
            );
            return Ok(StartOutcome::AlreadyRunning { pid: record.pid });
        }
    }

    let config = CollectorConfig::load(&paths.config_file)
        .with_context(|| format!("invalid configuration in {}", paths.config_file.display()))?;

    println!("Starting {DAEMON_PROCESS_NAME}...");

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)
        .with_context(|| format!("failed to open log file {}", paths.log_file.display()))?;

    let mut command = Command::new(&paths.daemon_bin);
    command
        .envs(config.child_env())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::from(log_file));

    // Detach into a new session so the daemon outlives this process and
    // never reacquires the controlling terminal.
    unsafe {
        command.pre_exec(|| {
            nix::unistd::setsid().map_err(io::Error::from)?;
            Ok(())
        });
    }

    let child = command.spawn().with_context(|| {
        format!(
            "failed to launch {}; see {} for daemon output",
            paths.daemon_bin.display(),
            paths.log_file.display()
        )
    })?;
    let pid = child.id();
    debug!(pid, "daemon spawned");

    // Fire-and-forget: the handle is dropped without waiting and init
    // reaps the detached daemon.
    drop(child);

    if let Err(e) = pidfile::save(&paths.pid_file, &PidRecord::new(pid, &paths.daemon_bin)) {
        println!("{} Could not write PID record: {e}", "⚠".yellow().bold());
    }

    println!("{} Daemon started (PID {})", "✓".green().bold(), pid);
    println!(
        "  Logs: {}",
        paths.log_file.display().to_string().dimmed()
    );
    Ok(StartOutcome::Started { pid })
}
