//! Install the collector package and its yum repository.
//!
//! Three steps, each aborting on failure: prerequisite package,
//! repository descriptor, daemon package. There is no rollback; a failed
//! final step leaves the prerequisite and the descriptor in place.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::paths::{ControllerPaths, DAEMON_PACKAGE, PREREQUISITE_PACKAGE};
use crate::pkg;

pub fn run(paths: &ControllerPaths) -> Result<()> {
    println!("Installing {DAEMON_PACKAGE}...");

    pkg::install(PREREQUISITE_PACKAGE).with_context(|| {
        format!("prerequisite package {PREREQUISITE_PACKAGE} failed to install")
    })?;
    println!(
        "{} Installed prerequisite {PREREQUISITE_PACKAGE}",
        "✓".green().bold()
    );

    pkg::write_repo_descriptor(&paths.repo_file)
        .context("failed to write repository descriptor")?;
    println!(
        "{} Wrote repository descriptor {}",
        "✓".green().bold(),
        paths.repo_file.display().to_string().dimmed()
    );

    pkg::install(DAEMON_PACKAGE)
        .with_context(|| format!("package {DAEMON_PACKAGE} failed to install"))?;
    println!("{} Installed {DAEMON_PACKAGE}", "✓".green().bold());

    println!(
        "\nNext: edit {} and run 'collectorctl start'",
        paths.config_file.display()
    );
    Ok(())
}
