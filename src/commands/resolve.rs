//! Daemon target resolution shared by stop and status.

use tracing::{debug, warn};

use crate::paths::{ControllerPaths, DAEMON_PROCESS_NAME};
use crate::pidfile;
use crate::process;

/// Resolve the PID set to operate on.
///
/// A live recorded PID is the authoritative handle. A stale record is
/// deleted and resolution falls back to name-based discovery over the
/// process table; so does an unreadable record, which is left in place
/// for inspection.
pub fn resolve_targets(paths: &ControllerPaths) -> Vec<u32> {
    match pidfile::load(&paths.pid_file) {
        Ok(Some(record)) => {
            if process::is_alive(record.pid) {
                debug!(pid = record.pid, "using recorded PID");
                return vec![record.pid];
            }
            debug!(pid = record.pid, "stale PID record, discarding");
            if let Err(e) = pidfile::remove(&paths.pid_file) {
                warn!(error = %e, "could not remove stale PID record");
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "unreadable PID record, falling back to discovery");
        }
    }
    process::find_by_name(DAEMON_PROCESS_NAME)
}
