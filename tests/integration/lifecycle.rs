//! Full start/status/stop cycles against a stand-in daemon.

use std::fs;

use collectorctl::commands::restart;
use collectorctl::commands::start::{self, StartOutcome};
use collectorctl::commands::status;
use collectorctl::commands::stop::{self, StopOutcome};
use collectorctl::process;
use serial_test::serial;
use tempfile::TempDir;

use crate::{temp_paths, write_fake_daemon, write_valid_config};

/// Exec replaces the shell, so the recorded PID is the sleeping process.
const DAEMON_SCRIPT: &str = "#!/bin/sh\nexec sleep 30\n";

/// Ignores SIGTERM; only SIGKILL brings it down.
const STUBBORN_SCRIPT: &str = "#!/bin/sh\ntrap '' TERM\nsleep 30\n";

#[test]
fn test_start_fails_without_binary() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    // Config intentionally absent too: the binary check comes first
    let err = start::run(&paths).unwrap_err();
    assert!(format!("{err:#}").contains("binary"));
    assert!(!paths.pid_file.exists());
}

#[test]
fn test_start_fails_without_config() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    write_fake_daemon(&paths.daemon_bin, DAEMON_SCRIPT);

    let err = start::run(&paths).unwrap_err();
    assert!(format!("{err:#}").contains("configuration file"));
    assert!(!paths.pid_file.exists());
}

#[test]
fn test_start_rejects_incomplete_config_without_spawning() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    write_fake_daemon(&paths.daemon_bin, DAEMON_SCRIPT);
    fs::write(
        &paths.config_file,
        "COLLECTOR_CONFIG=/etc/agent.yaml\nCOLLECTOR_REALM=us0\n",
    )
    .unwrap();

    let err = start::run(&paths).unwrap_err();
    assert!(format!("{err:#}").contains("COLLECTOR_ACCESS_TOKEN"));
    assert!(!paths.pid_file.exists());
    assert!(!paths.log_file.exists());
}

#[test]
#[serial]
fn test_start_status_stop_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    write_fake_daemon(&paths.daemon_bin, DAEMON_SCRIPT);
    write_valid_config(&paths.config_file);

    let StartOutcome::Started { pid } = start::run(&paths).unwrap() else {
        panic!("expected a fresh spawn");
    };
    assert!(process::is_alive(pid));
    assert!(paths.pid_file.exists());
    assert!(paths.log_file.exists());

    // Second start is a no-op while the recorded PID is alive
    assert_eq!(
        start::run(&paths).unwrap(),
        StartOutcome::AlreadyRunning { pid }
    );

    let report = status::run(&paths).unwrap();
    assert!(report.running);
    assert_eq!(report.processes[0].pid, pid);

    assert_eq!(stop::run(&paths).unwrap(), StopOutcome::Graceful);
    assert!(!process::is_alive(pid));
    assert!(!paths.pid_file.exists());

    // Stopping again is an idempotent no-op
    assert_eq!(stop::run(&paths).unwrap(), StopOutcome::NotRunning);
}

#[test]
#[serial]
fn test_stop_without_daemon_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    assert_eq!(stop::run(&paths).unwrap(), StopOutcome::NotRunning);
}

#[test]
#[serial]
fn test_status_reports_not_running() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    let report = status::run(&paths).unwrap();
    assert!(!report.running);
    assert!(report.processes.is_empty());
}

#[test]
#[serial]
#[ignore] // Slow: rides out the full graceful window before escalating
fn test_stop_escalates_to_sigkill() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    write_fake_daemon(&paths.daemon_bin, STUBBORN_SCRIPT);
    write_valid_config(&paths.config_file);

    let StartOutcome::Started { pid } = start::run(&paths).unwrap() else {
        panic!("expected a fresh spawn");
    };
    assert!(process::is_alive(pid));

    assert_eq!(stop::run(&paths).unwrap(), StopOutcome::Forced);
    assert!(!process::is_alive(pid));
    assert!(!paths.pid_file.exists());
}

#[test]
#[serial]
fn test_restart_starts_when_nothing_is_running() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    write_fake_daemon(&paths.daemon_bin, DAEMON_SCRIPT);
    write_valid_config(&paths.config_file);

    let StartOutcome::Started { pid } = restart::run(&paths).unwrap() else {
        panic!("expected restart to spawn");
    };
    assert!(process::is_alive(pid));

    stop::run(&paths).unwrap();
}

#[test]
#[serial]
fn test_restart_replaces_running_daemon() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    write_fake_daemon(&paths.daemon_bin, DAEMON_SCRIPT);
    write_valid_config(&paths.config_file);

    let StartOutcome::Started { pid: old_pid } = start::run(&paths).unwrap() else {
        panic!("expected a fresh spawn");
    };

    let StartOutcome::Started { pid: new_pid } = restart::run(&paths).unwrap() else {
        panic!("expected restart to spawn");
    };
    assert_ne!(old_pid, new_pid);
    assert!(!process::is_alive(old_pid));
    assert!(process::is_alive(new_pid));

    stop::run(&paths).unwrap();
}
