//! Process-table queries and signal delivery for the collector daemon.
//!
//! Liveness uses the signal-0 probe; discovery matches the daemon name
//! against process names and full command lines. Shutdown is two-phase:
//! SIGTERM with a bounded liveness poll, then SIGKILL for survivors.

use std::thread;
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use sysinfo::{Pid as SysPid, System};
use thiserror::Error;
use tracing::{debug, warn};

/// How long the graceful phase waits before escalating.
pub const GRACEFUL_WAIT: Duration = Duration::from_secs(5);
/// How long the forceful phase waits before giving up.
pub const FORCE_WAIT: Duration = Duration::from_secs(2);
/// Liveness poll step within each wait window.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Failure to bring every target process down.
#[derive(Debug, Error)]
#[error("daemon still running after forceful kill: PID(s) {survivors:?}")]
pub struct ShutdownError {
    pub survivors: Vec<u32>,
}

/// How a completed shutdown concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownKind {
    /// Every target exited within the graceful window.
    Graceful,
    /// At least one target needed SIGKILL.
    Forced,
}

/// Check whether `pid` is alive.
///
/// EPERM still means the process exists; only ESRCH counts as gone.
pub fn is_alive(pid: u32) -> bool {
    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

/// Find every process whose name or command line contains `needle`,
/// excluding the controller itself.
pub fn find_by_name(needle: &str) -> Vec<u32> {
    let sys = System::new_all();
    let own_pid = std::process::id();

    let mut pids: Vec<u32> = sys
        .processes()
        .iter()
        .filter(|(pid, process)| {
            pid.as_u32() != own_pid
                && (process.name().contains(needle) || process.cmd().join(" ").contains(needle))
        })
        .map(|(pid, _)| pid.as_u32())
        .collect();
    pids.sort_unstable();
    debug!(needle, ?pids, "process discovery");
    pids
}

/// Point-in-time usage snapshot of one daemon process.
#[derive(Debug, Clone)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub command: String,
    pub cpu_percent: f32,
    pub memory_percent: f64,
    pub elapsed: Duration,
}

/// Snapshot `pids` from the process table.
///
/// CPU usage needs two samples separated by sysinfo's minimum interval.
/// PIDs that exited between resolution and sampling are skipped.
pub fn snapshot(pids: &[u32]) -> Vec<ProcessSnapshot> {
    let mut sys = System::new_all();
    thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_processes();
    sys.refresh_memory();

    let total_memory = sys.total_memory();
    pids.iter()
        .filter_map(|&pid| {
            let process = sys.process(SysPid::from_u32(pid))?;
            let command = if process.cmd().is_empty() {
                process.name().to_string()
            } else {
                process.cmd().join(" ")
            };
            let memory_percent = if total_memory == 0 {
                0.0
            } else {
                process.memory() as f64 / total_memory as f64 * 100.0
            };
            Some(ProcessSnapshot {
                pid,
                command,
                cpu_percent: process.cpu_usage(),
                memory_percent,
                elapsed: Duration::from_secs(process.run_time()),
            })
        })
        .collect()
}

/// Two-phase shutdown of `pids`.
///
/// SIGTERM goes to every target, then liveness is polled for up to
/// [`GRACEFUL_WAIT`]. Survivors get SIGKILL and a further [`FORCE_WAIT`]
/// poll. The windows are fixed; only the outcome varies.
pub fn shutdown(pids: &[u32]) -> Result<ShutdownKind, ShutdownError> {
    signal_all(pids, Signal::SIGTERM);
    if wait_until_gone(pids, GRACEFUL_WAIT) {
        return Ok(ShutdownKind::Graceful);
    }

    let survivors: Vec<u32> = pids.iter().copied().filter(|&pid| is_alive(pid)).collect();
    warn!(?survivors, "graceful window elapsed, escalating to SIGKILL");
    signal_all(&survivors, Signal::SIGKILL);
    if wait_until_gone(&survivors, FORCE_WAIT) {
        return Ok(ShutdownKind::Forced);
    }

    Err(ShutdownError {
        survivors: survivors.into_iter().filter(|&pid| is_alive(pid)).collect(),
    })
}

fn signal_all(pids: &[u32], signal: Signal) {
    for &pid in pids {
        debug!(pid, signal = %signal, "delivering signal");
        if let Err(e) = kill(Pid::from_raw(pid as i32), signal) {
            // ESRCH just means it exited between discovery and delivery
            if e != Errno::ESRCH {
                warn!(pid, signal = %signal, error = %e, "signal delivery failed");
            }
        }
    }
}

fn wait_until_gone(pids: &[u32], window: Duration) -> bool {
    let deadline = Instant::now() + window;
    loop {
        if pids.iter().all(|&pid| !is_alive(pid)) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(POLL_INTERVAL);
    }
}
