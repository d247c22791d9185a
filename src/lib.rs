//! # eapictl - Switch configuration resources over eAPI
//!
//! eapictl reads and changes configuration resources on a network switch
//! whose only interfaces are a textual running-configuration and a
//! line-oriented command channel.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Resource Manager (Vlans)                         │
//! │     get / get_all / get_section / create / delete / set_* / ...      │
//! └─────────────────────────────────────────────────────────────────────┘
//!          │ read path                                  │ write path
//!          ▼                                            ▼
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────────┐
//! │ Section         │──▶│ Attribute       │   │ Reconciler (find_diff)  │
//! │ Extractor       │   │ Parser          │   │ + command synthesis     │
//! └─────────────────┘   └─────────────────┘   └─────────────────────────┘
//!          ▲                                            │
//!          │ running_config()                  config() │
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              Node                                    │
//! │                 (Connection: eAPI JSON-RPC, mocks)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use eapictl::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = eapictl::config::Config::load(None)?;
//!     let node = Node::connect_to("veos01", &config)?;
//!     let vlans = node.vlans();
//!
//!     vlans.create("10")?;
//!     vlans.set_name("10", "BIGDATA")?;
//!     vlans.set_trunk_group("10", &["mlag-peer"])?;
//!
//!     if let Some(vlan) = vlans.get("10")? {
//!         println!("{:?}", vlan.attributes());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    // Connection types
    pub use crate::connection::{
        Command, Connection, ConnectionError, ConnectionResult, EapiConnection,
        EapiConnectionBuilder, EapiTransport,
    };

    // Error handling
    pub use crate::error::{Error, Result};

    // Device and resources
    pub use crate::node::Node;
    pub use crate::resources::{find_diff, ListChanges, VlanConfig, VlanId, VlanState, Vlans};
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases for eapictl operations.
pub mod error;

/// Connection profile configuration loading.
pub mod config;

// ============================================================================
// Infrastructure
// ============================================================================

/// Transport layer for talking to a switch.
///
/// Provides the [`Connection`](connection::Connection) trait and the eAPI
/// (JSON-RPC over HTTP/HTTPS) implementation.
pub mod connection;

/// A managed device: running-config retrieval and configuration apply.
pub mod node;

// ============================================================================
// Resources
// ============================================================================

/// Configuration resources built on section extraction, attribute parsing
/// and list reconciliation.
pub mod resources;

pub use error::{Error, Result};
