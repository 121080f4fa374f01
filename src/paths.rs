//! Fixed filesystem locations and well-known names.

use std::path::PathBuf;

/// Daemon process name as it appears in the process table.
pub const DAEMON_PROCESS_NAME: &str = "telemetry-collectord";

/// Package installed and removed by the package manager.
pub const DAEMON_PACKAGE: &str = "telemetry-collector";

/// Package that must be present before the daemon package installs.
pub const PREREQUISITE_PACKAGE: &str = "libcap";

/// Filesystem locations the controller operates on.
///
/// The CLI always uses [`ControllerPaths::system`]; operations take the
/// struct by reference so tests can point them at a temp directory.
#[derive(Debug, Clone)]
pub struct ControllerPaths {
    /// Daemon executable.
    pub daemon_bin: PathBuf,
    /// Key=value configuration file, loaded fresh on every start.
    pub config_file: PathBuf,
    /// Append-only sink for the daemon's stderr.
    pub log_file: PathBuf,
    /// JSON record of the last spawned daemon PID.
    pub pid_file: PathBuf,
    /// yum repository descriptor written during install.
    pub repo_file: PathBuf,
}

impl ControllerPaths {
    /// The fixed system locations used by the CLI.
    pub fn system() -> Self {
        Self {
            daemon_bin: PathBuf::from("/usr/lib/telemetry-collector/bin/telemetry-collectord"),
            config_file: PathBuf::from("/etc/telemetry-collector/collector.conf"),
            log_file: PathBuf::from("/var/log/telemetry-collector.log"),
            pid_file: PathBuf::from("/var/run/telemetry-collectord.pid"),
            repo_file: PathBuf::from("/etc/yum.repos.d/telemetry-collector.repo"),
        }
    }
}
