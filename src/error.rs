//! Error types for eapictl.
//!
//! Every failure in the library is reported to the immediate caller as a
//! value. Nothing is retried and nothing is rolled back: when a multi-command
//! sequence is rejected part way, the commands the device accepted before the
//! failure stay applied.

use thiserror::Error;

use crate::connection::ConnectionError;

/// Result type alias for eapictl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for eapictl.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Identifier outside the resource's valid space (e.g. VLAN 4095).
    ///
    /// Raised before any command reaches the device.
    #[error("Invalid {resource} identifier '{id}'")]
    InvalidIdentifier {
        /// Resource class (e.g. "vlan")
        resource: &'static str,
        /// Identifier as supplied by the caller
        id: String,
    },

    /// Attribute value the device command language cannot carry.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // ========================================================================
    // Device Errors
    // ========================================================================
    /// Transport failure or command rejection reported by the device.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// No connection profile with the given name.
    #[error("Connection '{0}' not found in configuration")]
    ConnectionNotFound(String),
}

impl Error {
    /// Build an [`Error::InvalidIdentifier`] for a VLAN id.
    pub fn invalid_vlan(id: impl Into<String>) -> Self {
        Error::InvalidIdentifier {
            resource: "vlan",
            id: id.into(),
        }
    }

    /// True when the device refused one of the submitted commands.
    pub fn is_command_rejected(&self) -> bool {
        matches!(
            self,
            Error::Connection(ConnectionError::CommandRejected { .. })
        )
    }

    /// True when the call failed validation before contacting the device.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidIdentifier { .. } | Error::InvalidParameter(_)
        )
    }
}
