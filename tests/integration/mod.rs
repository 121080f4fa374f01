//! Integration tests driving real child processes and temp filesystems.
//!
//! The daemon is stood in for by a tiny shell script so the full
//! start/status/stop cycle runs against live PIDs without installing
//! anything.

mod lifecycle;
mod targets;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use collectorctl::paths::ControllerPaths;
use tempfile::TempDir;

/// A controller paths set rooted in a temp directory.
pub fn temp_paths(dir: &TempDir) -> ControllerPaths {
    let root = dir.path();
    ControllerPaths {
        daemon_bin: root.join("fake-daemon"),
        config_file: root.join("collector.conf"),
        log_file: root.join("collector.log"),
        pid_file: root.join("daemon.pid"),
        repo_file: root.join("telemetry-collector.repo"),
    }
}

/// Write an executable stand-in daemon script.
pub fn write_fake_daemon(path: &Path, script: &str) {
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Write a config file carrying all three required keys.
pub fn write_valid_config(path: &Path) {
    fs::write(
        path,
        "COLLECTOR_CONFIG=/etc/telemetry-collector/agent.yaml\n\
         COLLECTOR_ACCESS_TOKEN=test-token\n\
         COLLECTOR_REALM=us0\n",
    )
    .unwrap();
}
