//! Shared test utilities and fixtures for the eapictl test suite.
//!
//! This module provides:
//! - A simulated switch implementing [`Connection`] that understands the
//!   VLAN command vocabulary and renders `show running-config all`
//! - Helpers to build nodes and config files around it
//!
//! # Usage
//!
//! Include this module in your integration tests:
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;
use tempfile::TempDir;

use eapictl::connection::{Command, Connection, ConnectionError, ConnectionResult};
use eapictl::node::Node;

// ============================================================================
// Simulated Switch
// ============================================================================

/// One VLAN as the simulated switch stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimVlan {
    pub name: String,
    pub state: String,
    pub trunk_groups: IndexSet<String>,
}

impl SimVlan {
    fn new(id: u16) -> Self {
        Self {
            name: default_name(id),
            state: "active".to_string(),
            trunk_groups: IndexSet::new(),
        }
    }
}

fn default_name(id: u16) -> String {
    if id == 1 {
        "default".to_string()
    } else {
        format!("VLAN{:04}", id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Exec,
    Config,
    Vlan(u16),
}

/// An in-memory switch.
///
/// Commands are applied one at a time in request order. A rejected command
/// aborts the rest of the request; everything before it stays applied.
///
/// # Example
///
/// ```rust,ignore
/// let (switch, node) = sim_node();
/// node.vlans().create("10").unwrap();
/// assert!(switch.vlan(10).is_some());
/// ```
#[derive(Debug)]
pub struct SimulatedSwitch {
    vlans: RwLock<BTreeMap<u16, SimVlan>>,
    requests: RwLock<Vec<Vec<String>>>,
    reject: RwLock<Vec<String>>,
}

impl Default for SimulatedSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSwitch {
    /// A switch with only VLAN 1 configured.
    pub fn new() -> Self {
        let mut vlans = BTreeMap::new();
        vlans.insert(1, SimVlan::new(1));
        Self {
            vlans: RwLock::new(vlans),
            requests: RwLock::new(Vec::new()),
            reject: RwLock::new(Vec::new()),
        }
    }

    /// Refuse `command` whenever it is sent.
    pub fn reject_command(&self, command: impl Into<String>) {
        self.reject.write().push(command.into());
    }

    /// Stored state of one VLAN.
    pub fn vlan(&self, id: u16) -> Option<SimVlan> {
        self.vlans.read().get(&id).cloned()
    }

    /// Every request received, as command text.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.read().clone()
    }

    /// Requests that entered configuration mode.
    pub fn config_requests(&self) -> Vec<Vec<String>> {
        self.requests()
            .into_iter()
            .filter(|req| req.iter().any(|c| c == "configure terminal"))
            .collect()
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        self.requests.write().clear();
    }

    /// Apply configuration directly, bypassing the request log.
    pub fn preload(&self, commands: &[&str]) {
        let mut batch = vec![
            Command::from("enable"),
            Command::from("configure terminal"),
        ];
        batch.extend(commands.iter().map(|c| Command::from(*c)));
        if let Err(e) = self.run(&batch) {
            panic!("preload failed: {}", e);
        }
    }

    /// Text of `show running-config all`.
    pub fn running_config(&self) -> String {
        let mut out = String::from("! Command: show running-config all\n");
        out.push_str("! device: sim01 (vEOS, EOS-4.30.0F)\n!\n");
        out.push_str("hostname sim01\n!\n");
        out.push_str("spanning-tree mode mstp\n!\n");
        out.push_str("no aaa root\n!\n");

        for (id, vlan) in self.vlans.read().iter() {
            out.push_str(&format!("vlan {}\n", id));
            out.push_str(&format!("   name {}\n", vlan.name));
            out.push_str(&format!("   state {}\n", vlan.state));
            out.push_str("   no private-vlan\n");
            for group in &vlan.trunk_groups {
                out.push_str(&format!("   trunk group {}\n", group));
            }
            out.push_str("!\n");
        }

        out.push_str("interface Ethernet1\n");
        out.push_str("   switchport mode trunk\n");
        out.push_str("   switchport trunk allowed vlan 1-4094\n");
        out.push_str("!\n");
        out.push_str("router bgp 65000\n");
        out.push_str("   vlan 10\n");
        out.push_str("      rd auto\n");
        out.push_str("      route-target both 10:10\n");
        out.push_str("!\n");
        out.push_str("end\n");
        out
    }

    fn run(&self, commands: &[Command]) -> ConnectionResult<Vec<String>> {
        let mut mode = Mode::Exec;
        let mut outputs = Vec::with_capacity(commands.len());

        for (idx, command) in commands.iter().enumerate() {
            let text = command.as_str().trim();
            let rejected = self.reject.read().iter().any(|r| r == text);
            let result = if rejected {
                Err("rejected by test")
            } else {
                self.apply(&mut mode, text)
            };

            match result {
                Ok(output) => outputs.push(output),
                Err(reason) => {
                    return Err(ConnectionError::CommandRejected {
                        code: 1002,
                        message: format!(
                            "CLI command {} of {} '{}' failed: invalid command",
                            idx + 1,
                            commands.len(),
                            text
                        ),
                        errors: vec![reason.to_string()],
                    })
                }
            }
        }
        Ok(outputs)
    }

    fn apply(&self, mode: &mut Mode, text: &str) -> Result<String, &'static str> {
        match text {
            "enable" => return Ok(String::new()),
            "configure terminal" | "configure" => {
                *mode = Mode::Config;
                return Ok(String::new());
            }
            "show running-config all" => return Ok(self.running_config()),
            "write memory" => return Ok("Copy completed successfully.\n".to_string()),
            "end" => {
                *mode = Mode::Exec;
                return Ok(String::new());
            }
            _ => {}
        }

        if *mode == Mode::Exec {
            return Err("Invalid input (privileged mode required)");
        }

        if let Some(ids) = text.strip_prefix("vlan ") {
            let ids = parse_vlan_list(ids)?;
            let mut vlans = self.vlans.write();
            for id in &ids {
                vlans.entry(*id).or_insert_with(|| SimVlan::new(*id));
            }
            *mode = match ids.as_slice() {
                [id] => Mode::Vlan(*id),
                _ => Mode::Config,
            };
            return Ok(String::new());
        }

        let removal = text
            .strip_prefix("no vlan ")
            .or_else(|| text.strip_prefix("default vlan "));
        if let Some(ids) = removal {
            let ids = parse_vlan_list(ids)?;
            let mut vlans = self.vlans.write();
            for id in ids {
                vlans.remove(&id);
            }
            *mode = Mode::Config;
            return Ok(String::new());
        }

        let Mode::Vlan(id) = *mode else {
            return Err("Invalid input");
        };
        if text == "exit" {
            *mode = Mode::Config;
            return Ok(String::new());
        }

        let mut vlans = self.vlans.write();
        let vlan = vlans.get_mut(&id).ok_or("VLAN vanished")?;
        match text {
            "no name" | "default name" => vlan.name = default_name(id),
            "no state" | "default state" => vlan.state = "active".to_string(),
            "no trunk group" | "default trunk group" => vlan.trunk_groups.clear(),
            _ => {
                if let Some(name) = text.strip_prefix("name ") {
                    vlan.name = single_word(name)?;
                } else if let Some(state) = text.strip_prefix("state ") {
                    match state {
                        "active" | "suspend" => vlan.state = state.to_string(),
                        _ => return Err("Invalid input (at token 1)"),
                    }
                } else if let Some(group) = text.strip_prefix("no trunk group ") {
                    vlan.trunk_groups.shift_remove(group);
                } else if let Some(group) = text.strip_prefix("trunk group ") {
                    vlan.trunk_groups.insert(single_word(group)?);
                } else {
                    return Err("Invalid input");
                }
            }
        }
        Ok(String::new())
    }
}

fn single_word(value: &str) -> Result<String, &'static str> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        Err("Invalid input (extra tokens)")
    } else {
        Ok(value.to_string())
    }
}

/// Parse `10`, `1-4094` or `1,5,7-9`.
fn parse_vlan_list(list: &str) -> Result<Vec<u16>, &'static str> {
    let mut ids = Vec::new();
    for part in list.split(',') {
        let (lo, hi) = match part.split_once('-') {
            Some((lo, hi)) => (lo, hi),
            None => (part, part),
        };
        let lo: u16 = lo.trim().parse().map_err(|_| "Invalid input (vlan id)")?;
        let hi: u16 = hi.trim().parse().map_err(|_| "Invalid input (vlan id)")?;
        if lo == 0 || hi > 4094 || lo > hi {
            return Err("Invalid input (vlan id out of range)");
        }
        ids.extend(lo..=hi);
    }
    Ok(ids)
}

impl Connection for SimulatedSwitch {
    fn execute(&self, commands: &[Command]) -> ConnectionResult<Vec<String>> {
        self.requests
            .write()
            .push(commands.iter().map(|c| c.as_str().to_string()).collect());
        self.run(commands)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// A fresh simulated switch and a node talking to it.
pub fn sim_node() -> (Arc<SimulatedSwitch>, Node) {
    let switch = Arc::new(SimulatedSwitch::new());
    let node = Node::new("sim01", switch.clone());
    (switch, node)
}

/// Write `content` to `name` inside a new temporary directory.
pub fn temp_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write config file");
    (dir, path)
}
