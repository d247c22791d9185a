//! Connection layer for device communication.
//!
//! This module provides the raw command channel to a network device. A
//! [`Connection`] takes an ordered batch of CLI commands, runs them on the
//! device and hands back one text output per command. It knows nothing about
//! configuration mode, running-config or resources; [`crate::node::Node`]
//! builds those on top.
//!
//! # Supported Transports
//!
//! - **eAPI** (HTTP/HTTPS JSON-RPC): [`eapi::EapiConnection`]
//!
//! # Example
//!
//! ```rust,ignore
//! use eapictl::connection::{Command, Connection, EapiConnection};
//!
//! let conn = EapiConnection::builder("veos01")
//!     .credentials("admin", "admin")
//!     .build()?;
//!
//! let output = conn.execute(&[Command::from("show version")])?;
//! println!("{}", output[0]);
//! ```

/// eAPI JSON-RPC connection implementation.
pub mod eapi;

use serde::Serialize;
use thiserror::Error;

pub use eapi::{EapiConnection, EapiConnectionBuilder, EapiTransport};

/// Errors that can occur while talking to a device.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Failed to reach the device at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Credentials were rejected by the device.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The device answered with a non-success HTTP status.
    #[error("Device returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The device refused one of the commands in the batch.
    ///
    /// Commands before the rejected one may already be committed.
    #[error("Command rejected ({code}): {message}{}", format_errors(.errors))]
    CommandRejected {
        /// Device error code
        code: i64,
        /// Device error message
        message: String,
        /// Per-command error detail
        errors: Vec<String>,
    },

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The device response could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Connection settings are invalid or incomplete.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

fn format_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(" [{}]", errors.join(", "))
    }
}

/// Result type for connection operations.
pub type ConnectionResult<T> = std::result::Result<T, ConnectionError>;

/// A single CLI command.
///
/// Most commands are plain strings; `enable` with a password is sent with
/// its interactive input attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Command {
    /// Plain command line
    Simple(String),
    /// Command answered with interactive input
    WithInput {
        /// Command line
        cmd: String,
        /// Input supplied at the prompt
        input: String,
    },
}

impl Command {
    /// The command line without its input.
    pub fn as_str(&self) -> &str {
        match self {
            Command::Simple(cmd) => cmd,
            Command::WithInput { cmd, .. } => cmd,
        }
    }
}

impl From<String> for Command {
    fn from(s: String) -> Self {
        Command::Simple(s)
    }
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        Command::Simple(s.to_string())
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the input, it is usually a password.
        write!(f, "{}", self.as_str())
    }
}

/// A command channel to one device.
///
/// Implementations run the whole batch in order within one round trip and
/// report success only if every command was accepted.
#[cfg_attr(test, mockall::automock)]
pub trait Connection: Send + Sync {
    /// Run `commands` in order, returning one output per command.
    fn execute(&self, commands: &[Command]) -> ConnectionResult<Vec<String>>;
}
