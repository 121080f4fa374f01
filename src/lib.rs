//! Library core of collectorctl, the lifecycle controller for the
//! telemetry collector daemon.
//!
//! The controller is stateless: every operation derives the daemon's
//! current state from the process table (and the PID record written at
//! spawn time) at call time. The binary in `main.rs` is a thin clap
//! dispatcher over [`commands`].

pub mod commands;
pub mod config;
pub mod paths;
pub mod pidfile;
pub mod pkg;
pub mod process;
