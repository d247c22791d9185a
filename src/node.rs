//! A managed device.
//!
//! [`Node`] turns a raw [`Connection`] into the two operations resources are
//! built on: fetching the running configuration and applying configuration
//! commands. Nothing is cached; every call is a fresh round trip so callers
//! never act on stale device state.

use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::connection::{Command, Connection, EapiConnection};
use crate::error::{Error, Result};
use crate::resources::vlan::Vlans;

/// Command that dumps the running configuration including defaults.
const SHOW_RUNNING_CONFIG: &str = "show running-config all";

/// A device reachable through a [`Connection`].
///
/// Cloning a `Node` shares the underlying connection. Mutating calls against
/// one device must be serialized by the caller.
#[derive(Clone)]
pub struct Node {
    name: String,
    connection: Arc<dyn Connection>,
    enable_password: Option<String>,
}

impl Node {
    /// Wrap an existing connection.
    pub fn new(name: impl Into<String>, connection: Arc<dyn Connection>) -> Self {
        Self {
            name: name.into(),
            connection,
            enable_password: None,
        }
    }

    /// Build a node from the named connection profile in `config`.
    pub fn connect_to(name: &str, config: &Config) -> Result<Self> {
        let profile = config
            .connection(name)
            .ok_or_else(|| Error::ConnectionNotFound(name.to_string()))?;

        let mut builder = EapiConnection::builder(profile.host_or(name))
            .transport(profile.transport.unwrap_or(config.defaults.transport))
            .credentials(
                profile.username.clone().unwrap_or_else(|| "admin".to_string()),
                profile.password.clone().unwrap_or_default(),
            )
            .timeout(profile.timeout.unwrap_or(config.defaults.timeout))
            .validate_certs(profile.validate_certs.unwrap_or(config.defaults.validate_certs));
        if let Some(port) = profile.port.or(config.defaults.port) {
            builder = builder.port(port);
        }

        debug!(connection = %name, "Connecting to node");
        let mut node = Node::new(name, Arc::new(builder.build()?));
        node.enable_password = profile.enable_password.clone();
        Ok(node)
    }

    /// Password answered to `enable`, if the device asks for one.
    pub fn with_enable_password(mut self, password: impl Into<String>) -> Self {
        self.enable_password = Some(password.into());
        self
    }

    /// Name this node was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn enable_command(&self) -> Command {
        match &self.enable_password {
            Some(password) => Command::WithInput {
                cmd: "enable".to_string(),
                input: password.clone(),
            },
            None => Command::from("enable"),
        }
    }

    /// Run privileged exec commands, returning one output per command.
    pub fn enable<S: AsRef<str>>(&self, commands: &[S]) -> Result<Vec<String>> {
        let mut batch = Vec::with_capacity(commands.len() + 1);
        batch.push(self.enable_command());
        batch.extend(commands.iter().map(|c| Command::from(c.as_ref())));

        debug!(node = %self.name, commands = ?commands.iter().map(AsRef::as_ref).collect::<Vec<_>>(), "enable");
        let outputs = self.connection.execute(&batch)?;
        // Drop the output of `enable` itself.
        Ok(outputs.into_iter().skip(1).collect())
    }

    /// Fetch the current running configuration.
    pub fn running_config(&self) -> Result<String> {
        let outputs = self.enable(&[SHOW_RUNNING_CONFIG])?;
        Ok(outputs.into_iter().next().unwrap_or_default())
    }

    /// Apply configuration commands in order within one request.
    ///
    /// Succeeds only if the device accepted every command. On rejection the
    /// commands accepted before the failing one remain applied. An empty
    /// list is a successful no-op that never reaches the device.
    pub fn config<S: AsRef<str>>(&self, commands: &[S]) -> Result<()> {
        if commands.is_empty() {
            return Ok(());
        }

        let mut batch = Vec::with_capacity(commands.len() + 2);
        batch.push(self.enable_command());
        batch.push(Command::from("configure terminal"));
        batch.extend(commands.iter().map(|c| Command::from(c.as_ref())));

        debug!(node = %self.name, commands = ?commands.iter().map(AsRef::as_ref).collect::<Vec<_>>(), "config");
        self.connection.execute(&batch)?;
        Ok(())
    }

    /// Persist the running configuration to startup.
    pub fn save(&self) -> Result<()> {
        self.enable(&["write memory"])?;
        Ok(())
    }

    /// VLAN resource manager for this node.
    pub fn vlans(&self) -> Vlans {
        Vlans::new(self.clone())
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("enable_password", &self.enable_password.as_ref().map(|_| "****"))
            .finish_non_exhaustive()
    }
}
