//! Report daemon state with a usage snapshot.
//!
//! Status never fails: both "Running" and "Not Running" are successful
//! reports, and the exit status is 0 either way.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::commands::resolve::resolve_targets;
use crate::paths::ControllerPaths;
use crate::process::{self, ProcessSnapshot};

/// What status observed.
#[derive(Debug)]
pub struct StatusReport {
    pub running: bool,
    pub processes: Vec<ProcessSnapshot>,
}

pub fn run(paths: &ControllerPaths) -> Result<StatusReport> {
    let targets = resolve_targets(paths);
    if targets.is_empty() {
        println!("{}", "Not Running".yellow().bold());
        return Ok(StatusReport {
            running: false,
            processes: Vec::new(),
        });
    }

    let processes = process::snapshot(&targets);
    // Every target exited between resolution and sampling
    if processes.is_empty() {
        println!("{}", "Not Running".yellow().bold());
        return Ok(StatusReport {
            running: false,
            processes,
        });
    }

    println!("{}", "Running".green().bold());
    for snapshot in &processes {
        println!("  PID {}  {}", snapshot.pid, snapshot.command.dimmed());
        println!(
            "    cpu {:.1}%  mem {:.1}%  up {}",
            snapshot.cpu_percent,
            snapshot.memory_percent,
            format_elapsed(snapshot.elapsed)
        );
    }
    Ok(StatusReport {
        running: true,
        processes,
    })
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}
