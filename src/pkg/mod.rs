//! Package-manager collaborator (yum).
//!
//! install/remove stream yum's own output to the terminal; the
//! installed-query is silent. The repository descriptor is rewritten
//! unconditionally on every install, so local edits do not survive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Contents of the yum repository descriptor written during install.
const REPO_DESCRIPTOR: &str = "\
[telemetry-collector]
name=Telemetry Collector
baseurl=https://rpm.telemetry-collector.dev/release/$basearch
gpgcheck=1
gpgkey=https://rpm.telemetry-collector.dev/release/gpg.key
enabled=1
";

#[derive(Debug, Error)]
pub enum PkgError {
    #[error("yum not found on PATH")]
    YumMissing(#[source] which::Error),

    #[error("failed to run yum: {0}")]
    Spawn(#[source] io::Error),

    #[error("yum {action} {package} failed with {status}")]
    CommandFailed {
        action: &'static str,
        package: String,
        status: std::process::ExitStatus,
    },

    #[error("failed to write repository descriptor {path}: {source}")]
    RepoWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// `yum install -y <package>`.
pub fn install(package: &str) -> Result<(), PkgError> {
    run_yum("install", package)
}

/// `yum remove -y <package>`.
pub fn remove(package: &str) -> Result<(), PkgError> {
    run_yum("remove", package)
}

/// Whether `package` is currently installed.
pub fn is_installed(package: &str) -> Result<bool, PkgError> {
    let yum = locate_yum()?;
    let output = Command::new(yum)
        .args(["list", "installed", package])
        .output()
        .map_err(PkgError::Spawn)?;
    Ok(output.status.success())
}

/// Write the repository descriptor to `path`, overwriting whatever is
/// there.
pub fn write_repo_descriptor(path: &Path) -> Result<(), PkgError> {
    fs::write(path, REPO_DESCRIPTOR).map_err(|source| PkgError::RepoWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn locate_yum() -> Result<PathBuf, PkgError> {
    which::which("yum").map_err(PkgError::YumMissing)
}

fn run_yum(action: &'static str, package: &str) -> Result<(), PkgError> {
    let yum = locate_yum()?;
    debug!(action, package, "invoking yum");
    let status = Command::new(yum)
        .args([action, "-y", package])
        .status()
        .map_err(PkgError::Spawn)?;
    if !status.success() {
        return Err(PkgError::CommandFailed {
            action,
            package: package.to_string(),
            status,
        });
    }
    Ok(())
}
