//! PID record resolution and name-based discovery.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use collectorctl::commands::resolve::resolve_targets;
use collectorctl::pidfile::{self, PidRecord};
use collectorctl::process;
use serial_test::serial;
use tempfile::TempDir;

use crate::temp_paths;

#[test]
fn test_resolve_prefers_live_recorded_pid() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);

    // Our own PID is certainly alive
    let own_pid = std::process::id();
    pidfile::save(&paths.pid_file, &PidRecord::new(own_pid, Path::new("/bin/x"))).unwrap();

    assert_eq!(resolve_targets(&paths), vec![own_pid]);
}

#[test]
fn test_resolve_discards_stale_record() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);

    pidfile::save(
        &paths.pid_file,
        &PidRecord::new(999999999, Path::new("/bin/x")),
    )
    .unwrap();

    let targets = resolve_targets(&paths);
    assert!(!targets.contains(&999999999));
    assert!(!paths.pid_file.exists(), "stale record should be removed");
}

#[test]
fn test_resolve_leaves_corrupt_record_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let paths = temp_paths(&temp_dir);
    fs::write(&paths.pid_file, "not a record").unwrap();

    let _ = resolve_targets(&paths); // must not panic
    assert!(paths.pid_file.exists(), "corrupt record kept for inspection");
}

#[test]
#[serial]
fn test_find_by_name_discovers_marker_process() {
    let temp_dir = TempDir::new().unwrap();

    // A copy of sleep under a unique name gives discovery an unambiguous
    // target (comm is capped at 15 chars, so keep the marker short)
    let marker = format!("lcprobe{}", std::process::id() % 1_000_000);
    let probe_bin = temp_dir.path().join(&marker);
    fs::copy("/bin/sleep", &probe_bin).unwrap();

    let mut child = std::process::Command::new(&probe_bin)
        .arg("30")
        .spawn()
        .unwrap();
    thread::sleep(Duration::from_millis(300));

    let found = process::find_by_name(&marker);
    assert!(
        found.contains(&child.id()),
        "expected {} in {found:?}",
        child.id()
    );

    child.kill().unwrap();
    child.wait().unwrap();
}

#[test]
#[serial]
fn test_find_by_name_excludes_the_controller_itself() {
    // The needle matches our own command line and nothing else
    let own_exe = std::env::current_exe().unwrap().display().to_string();
    assert!(!process::find_by_name(&own_exe).contains(&std::process::id()));
}
