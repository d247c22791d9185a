//! VLAN commands
//!
//! This module implements the `vlan` subcommand family.

use super::{CommandContext, EXIT_FAILURE, EXIT_NOT_FOUND, EXIT_OK};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use eapictl::resources::{VlanState, Vlans};

/// Arguments for the vlan command
#[derive(Parser, Debug, Clone)]
pub struct VlanArgs {
    /// VLAN operation
    #[command(subcommand)]
    pub command: VlanCommand,

    /// Write the running configuration to startup after a successful change
    #[arg(long, global = true)]
    pub save: bool,
}

/// State accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    /// Forwarding
    Active,
    /// Configured but not forwarding
    Suspend,
}

impl From<StateArg> for VlanState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Active => VlanState::Active,
            StateArg::Suspend => VlanState::Suspend,
        }
    }
}

/// VLAN operations
#[derive(Subcommand, Debug, Clone)]
pub enum VlanCommand {
    /// Show one VLAN
    Get { id: String },

    /// Show every configured VLAN
    List,

    /// Print the raw configuration section of a VLAN
    Section { id: String },

    /// Create a VLAN
    Create { id: String },

    /// Delete a VLAN
    Delete { id: String },

    /// Return a VLAN to its default configuration
    Default { id: String },

    /// Set the VLAN name
    #[command(name = "set-name")]
    SetName { id: String, name: String },

    /// Reset the VLAN name to its default
    #[command(name = "set-name-default")]
    SetNameDefault { id: String },

    /// Set the VLAN state
    #[command(name = "set-state")]
    SetState {
        id: String,
        #[arg(value_enum)]
        state: StateArg,
    },

    /// Reset the VLAN state to its default
    #[command(name = "set-state-default")]
    SetStateDefault { id: String },

    /// Show the trunk groups of a VLAN
    #[command(name = "trunk-groups")]
    TrunkGroups { id: String },

    /// Replace the trunk groups of a VLAN (none clears them)
    #[command(name = "set-trunk-groups")]
    SetTrunkGroups { id: String, groups: Vec<String> },

    /// Add one trunk group
    #[command(name = "add-trunk-group")]
    AddTrunkGroup { id: String, group: String },

    /// Remove one trunk group
    #[command(name = "remove-trunk-group")]
    RemoveTrunkGroup { id: String, group: String },

    /// Remove every trunk group
    #[command(name = "trunk-groups-default")]
    TrunkGroupsDefault { id: String },
}

impl VlanCommand {
    /// True for operations that change the device
    fn is_write(&self) -> bool {
        !matches!(
            self,
            VlanCommand::Get { .. }
                | VlanCommand::List
                | VlanCommand::Section { .. }
                | VlanCommand::TrunkGroups { .. }
        )
    }
}

impl VlanArgs {
    /// Execute the vlan command
    pub fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        let node = match ctx.node() {
            Ok(node) => node,
            Err(e) => {
                ctx.output.error(&format!("{:#}", e));
                return Ok(EXIT_FAILURE);
            }
        };
        let vlans = node.vlans();

        let code = match self.run(&vlans, ctx) {
            Ok(code) => code,
            Err(e) => {
                ctx.output.error(&e.to_string());
                return Ok(EXIT_FAILURE);
            }
        };

        if code == EXIT_OK && self.save && self.command.is_write() {
            if let Err(e) = node.save() {
                ctx.output.error(&format!("Failed to save configuration: {}", e));
                return Ok(EXIT_FAILURE);
            }
            ctx.output.info("Configuration saved");
        }
        Ok(code)
    }

    fn run(&self, vlans: &Vlans, ctx: &CommandContext) -> eapictl::Result<i32> {
        let out = &ctx.output;
        match &self.command {
            VlanCommand::Get { id } => match vlans.get(id)? {
                Some(vlan) => {
                    out.vlan(&vlan);
                    Ok(EXIT_OK)
                }
                None => {
                    out.warning(&format!("VLAN {} not found", id));
                    Ok(EXIT_NOT_FOUND)
                }
            },
            VlanCommand::List => {
                out.vlans(&vlans.get_all()?);
                Ok(EXIT_OK)
            }
            VlanCommand::Section { id } => {
                let section = vlans.get_section(id)?;
                if section.is_empty() {
                    out.warning(&format!("VLAN {} not found", id));
                    return Ok(EXIT_NOT_FOUND);
                }
                out.text(&section);
                Ok(EXIT_OK)
            }
            VlanCommand::TrunkGroups { id } => match vlans.get(id)? {
                Some(vlan) => {
                    out.list(&vlan.trunk_groups);
                    Ok(EXIT_OK)
                }
                None => {
                    out.warning(&format!("VLAN {} not found", id));
                    Ok(EXIT_NOT_FOUND)
                }
            },
            VlanCommand::Create { id } => {
                vlans.create(id)?;
                out.changed(&format!("created vlan {}", id));
                Ok(EXIT_OK)
            }
            VlanCommand::Delete { id } => {
                vlans.delete(id)?;
                out.changed(&format!("deleted vlan {}", id));
                Ok(EXIT_OK)
            }
            VlanCommand::Default { id } => {
                vlans.default(id)?;
                out.changed(&format!("defaulted vlan {}", id));
                Ok(EXIT_OK)
            }
            VlanCommand::SetName { id, name } => {
                vlans.set_name(id, name)?;
                out.changed(&format!("vlan {} name {}", id, name));
                Ok(EXIT_OK)
            }
            VlanCommand::SetNameDefault { id } => {
                vlans.set_name_default(id)?;
                out.changed(&format!("vlan {} name defaulted", id));
                Ok(EXIT_OK)
            }
            VlanCommand::SetState { id, state } => {
                let state = VlanState::from(*state);
                vlans.set_state(id, state)?;
                out.changed(&format!("vlan {} state {}", id, state));
                Ok(EXIT_OK)
            }
            VlanCommand::SetStateDefault { id } => {
                vlans.set_state_default(id)?;
                out.changed(&format!("vlan {} state defaulted", id));
                Ok(EXIT_OK)
            }
            VlanCommand::SetTrunkGroups { id, groups } => {
                vlans.set_trunk_group(id, groups.as_slice())?;
                out.changed(&format!("vlan {} trunk groups [{}]", id, groups.join(", ")));
                Ok(EXIT_OK)
            }
            VlanCommand::AddTrunkGroup { id, group } => {
                vlans.add_trunk_group(id, group)?;
                out.changed(&format!("vlan {} trunk group {} added", id, group));
                Ok(EXIT_OK)
            }
            VlanCommand::RemoveTrunkGroup { id, group } => {
                vlans.remove_trunk_group(id, group)?;
                out.changed(&format!("vlan {} trunk group {} removed", id, group));
                Ok(EXIT_OK)
            }
            VlanCommand::TrunkGroupsDefault { id } => {
                vlans.set_trunk_group_default(id)?;
                out.changed(&format!("vlan {} trunk groups defaulted", id));
                Ok(EXIT_OK)
            }
        }
    }
}
