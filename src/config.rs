//! Typed collector configuration.
//!
//! The config file is a set of shell-style `KEY=value` assignments
//! (optional `export ` prefix, `#` comments, optional quotes). It is
//! parsed into [`CollectorConfig`] and validated before anything is
//! spawned; the keys reach the daemon only through its child environment,
//! never by mutating the controller's own.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Names the daemon's own detailed configuration.
pub const KEY_CONFIG: &str = "COLLECTOR_CONFIG";
/// Credential authenticating to the telemetry backend.
pub const KEY_ACCESS_TOKEN: &str = "COLLECTOR_ACCESS_TOKEN";
/// Telemetry backend tenant.
pub const KEY_REALM: &str = "COLLECTOR_REALM";
/// Optional memory ceiling forwarded to the daemon, in MiB.
pub const KEY_MEMORY_TOTAL_MIB: &str = "COLLECTOR_MEMORY_TOTAL_MIB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config line {line}: expected KEY=value, got '{content}'")]
    Malformed { line: usize, content: String },

    #[error("config line {line}: {key} is not a whole number: '{value}'")]
    InvalidNumber {
        line: usize,
        key: &'static str,
        value: String,
    },

    #[error("required config key {0} is missing or empty")]
    MissingKey(&'static str),
}

/// Validated collector configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub config: String,
    pub access_token: String,
    pub realm: String,
    pub memory_total_mib: Option<u64>,
}

impl CollectorConfig {
    /// Load and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse the file content. Unknown keys are ignored; a non-comment
    /// line without `=` is an error.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = None;
        let mut access_token = None;
        let mut realm = None;
        let mut memory_total_mib = None;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line).trim_start();

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Malformed {
                    line: idx + 1,
                    content: raw.to_string(),
                });
            };
            let key = key.trim();
            let value = unquote(value.trim());

            match key {
                KEY_CONFIG => config = Some(value.to_string()),
                KEY_ACCESS_TOKEN => access_token = Some(value.to_string()),
                KEY_REALM => realm = Some(value.to_string()),
                KEY_MEMORY_TOTAL_MIB => {
                    let parsed =
                        value
                            .parse::<u64>()
                            .map_err(|_| ConfigError::InvalidNumber {
                                line: idx + 1,
                                key: KEY_MEMORY_TOTAL_MIB,
                                value: value.to_string(),
                            })?;
                    memory_total_mib = Some(parsed);
                }
                _ => {}
            }
        }

        Ok(Self {
            config: required(config, KEY_CONFIG)?,
            access_token: required(access_token, KEY_ACCESS_TOKEN)?,
            realm: required(realm, KEY_REALM)?,
            memory_total_mib,
        })
    }

    /// Environment variables placed on the spawned daemon's environment.
    pub fn child_env(&self) -> Vec<(&'static str, String)> {
        let mut env = vec![
            (KEY_CONFIG, self.config.clone()),
            (KEY_ACCESS_TOKEN, self.access_token.clone()),
            (KEY_REALM, self.realm.clone()),
        ];
        if let Some(mib) = self.memory_total_mib {
            env.push((KEY_MEMORY_TOTAL_MIB, mib.to_string()));
        }
        env
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingKey(key)),
    }
}

/// Strip one pair of matching single or double quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
