//! Subcommands module for eapictl CLI
//!
//! This module contains all the subcommand implementations.

pub mod vlan;

use crate::cli::output::OutputFormatter;
use anyhow::{bail, Result};
use eapictl::config::Config;
use eapictl::connection::EapiTransport;
use eapictl::node::Node;
use serde::Serialize;

/// Exit code for a successful command
pub const EXIT_OK: i32 = 0;
/// Exit code for a failed command
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a read that found nothing
pub const EXIT_NOT_FOUND: i32 = 2;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Selected connection profile
    pub connection: Option<String>,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let output = OutputFormatter::new(!cli.no_color, cli.is_json(), cli.verbosity());

        Self {
            config,
            output,
            connection: cli.connection.clone(),
        }
    }

    /// Name of the connection profile to use
    pub fn connection_name(&self) -> Result<String> {
        if let Some(name) = &self.connection {
            return Ok(name.clone());
        }
        match self.config.connection_names().first() {
            Some(name) => Ok(name.to_string()),
            None => bail!("No connections configured; add one to eapi.toml or pass --config"),
        }
    }

    /// Build the node for the selected connection profile
    pub fn node(&self) -> Result<Node> {
        let name = self.connection_name()?;
        self.output.info(&format!("Using connection '{}'", name));
        Ok(Node::connect_to(&name, &self.config)?)
    }
}

/// One line of `connections` output. Credentials are never included.
#[derive(Debug, Serialize)]
struct ConnectionRow<'a> {
    name: &'a str,
    host: String,
    transport: EapiTransport,
    port: u16,
}

/// List configured connection profiles
pub fn list_connections(ctx: &CommandContext) -> Result<i32> {
    let defaults = &ctx.config.defaults;
    let rows: Vec<ConnectionRow<'_>> = ctx
        .config
        .connections
        .iter()
        .map(|(name, profile)| {
            let transport = profile.transport.unwrap_or(defaults.transport);
            ConnectionRow {
                name,
                host: profile.host_or(name),
                transport,
                port: profile
                    .port
                    .or(defaults.port)
                    .unwrap_or_else(|| transport.default_port()),
            }
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(EXIT_OK);
    }

    if rows.is_empty() {
        ctx.output.warning("No connections configured");
        return Ok(EXIT_OK);
    }

    for row in &rows {
        println!("{:<20} {}://{}:{}", row.name, row.transport, row.host, row.port);
    }
    Ok(EXIT_OK)
}
