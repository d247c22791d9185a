//! Configuration resources.
//!
//! A resource is one addressable object in the device configuration (a
//! VLAN, an interface, ...). Reads go through three stages over a freshly
//! fetched running-config:
//!
//! ```text
//! running-config --> section::find_section --> parse::parse_* --> typed config
//! ```
//!
//! Writes synthesize command lists (reconciling list attributes with
//! [`reconcile::find_diff`]) and hand them to [`Node::config`].
//!
//! # Supported Resources
//!
//! - **VLAN**: [`vlan::Vlans`]

pub mod parse;
pub mod reconcile;
pub mod section;
pub mod vlan;

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::node::Node;

pub use reconcile::{find_diff, ListChanges};
pub use section::{find_headers, find_section, find_sections, get_section, Section};
pub use vlan::{VlanConfig, VlanId, VlanState, Vlans};

/// Build an attribute command.
///
/// - `default` set: `default <cmd>`
/// - a value: `<cmd> <value>`
/// - no value: `no <cmd>`
pub fn command_builder(cmd: &str, value: Option<&str>, default: bool) -> String {
    if default {
        format!("default {}", cmd)
    } else {
        match value {
            Some(value) => format!("{} {}", cmd, value),
            None => format!("no {}", cmd),
        }
    }
}

/// Reject values that would break out of a single command line.
pub(crate) fn validate_token(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(Error::InvalidParameter(format!(
            "{} '{}' must be a single non-empty word",
            kind,
            value.escape_debug()
        )));
    }
    Ok(())
}

/// Plumbing shared by every resource manager.
#[derive(Debug, Clone)]
pub struct EntityBase {
    node: Node,
}

impl EntityBase {
    /// Bind to `node`.
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    /// The node commands are sent to.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Fresh copy of the running configuration.
    pub fn config(&self) -> Result<String> {
        self.node.running_config()
    }

    /// Section for `header` in a freshly fetched running configuration.
    pub fn get_block(&self, header: &Regex) -> Result<String> {
        let config = self.config()?;
        Ok(get_section(&config, header))
    }

    /// Run `commands` as `<context>`, commands..., `exit` in one request.
    pub fn configure_in(&self, context: &str, commands: &[String]) -> Result<()> {
        let mut batch = Vec::with_capacity(commands.len() + 2);
        batch.push(context.to_string());
        batch.extend(commands.iter().cloned());
        batch.push("exit".to_string());
        self.configure(&batch)
    }

    /// Apply configuration commands.
    pub fn configure(&self, commands: &[String]) -> Result<()> {
        debug!(node = %self.node.name(), commands = ?commands, "Applying configuration");
        self.node.config(commands)
    }
}
