//! VLAN resource.
//!
//! Reads fetch the running-config once per call and parse the `vlan <id>`
//! sections out of it. Writes are emitted inside the VLAN context:
//!
//! ```text
//! vlan 10
//!    name BIGDATA
//!    state active
//!    trunk group mlag-peer
//! !
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::parse::{parse_list, parse_scalar};
use super::reconcile::ListChanges;
use super::section::find_sections;
use super::{command_builder, validate_token, EntityBase};
use crate::error::{Error, Result};
use crate::node::Node;

/// Name line inside a VLAN section
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*name\s+(\S+)\s*$").expect("Invalid VLAN name regex"));

/// State line inside a VLAN section
static STATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*state\s+(\S+)\s*$").expect("Invalid VLAN state regex"));

/// Trunk group line inside a VLAN section
static TRUNK_GROUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*trunk group\s+(\S+)\s*$").expect("Invalid trunk group regex")
});

/// Top-level VLAN header, capturing the id
static VLAN_HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^vlan (\d+)$").expect("Invalid VLAN header regex"));

// ============================================================================
// Types
// ============================================================================

/// IEEE 802.1Q VLAN identifier (1-4094).
///
/// Parsed from decimal text only. 0 and 4095 are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    /// Lowest usable VLAN id.
    pub const MIN: u16 = 1;
    /// Highest usable VLAN id.
    pub const MAX: u16 = 4094;

    /// Validate a numeric id.
    pub fn new(id: u16) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(VlanId(id))
        } else {
            Err(Error::invalid_vlan(id.to_string()))
        }
    }

    /// The numeric id.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Header line of this VLAN's section.
    fn header(&self) -> Result<Regex> {
        Regex::new(&format!("^vlan {}$", self.0))
            .map_err(|e| Error::InvalidParameter(format!("VLAN {} header: {}", self.0, e)))
    }

    /// Command that enters (and creates) the VLAN context.
    fn context(&self) -> String {
        format!("vlan {}", self.0)
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VlanId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_vlan(s));
        }
        let id: u16 = s.parse().map_err(|_| Error::invalid_vlan(s))?;
        VlanId::new(id).map_err(|_| Error::invalid_vlan(s))
    }
}

impl TryFrom<u16> for VlanId {
    type Error = Error;

    fn try_from(id: u16) -> Result<Self> {
        VlanId::new(id)
    }
}

impl From<VlanId> for u16 {
    fn from(vlan: VlanId) -> u16 {
        vlan.0
    }
}

/// Administrative state of a VLAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VlanState {
    /// Forwarding
    #[default]
    Active,
    /// Configured but not forwarding
    Suspend,
}

impl VlanState {
    /// Keyword used in the device command language.
    pub fn as_str(&self) -> &'static str {
        match self {
            VlanState::Active => "active",
            VlanState::Suspend => "suspend",
        }
    }
}

impl fmt::Display for VlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VlanState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "active" => Ok(VlanState::Active),
            "suspend" => Ok(VlanState::Suspend),
            other => Err(Error::InvalidParameter(format!(
                "VLAN state must be 'active' or 'suspend', got '{}'",
                other
            ))),
        }
    }
}

/// Observed configuration of one VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanConfig {
    /// VLAN id
    pub vlan_id: VlanId,
    /// Name, empty when the section carries none
    pub name: String,
    /// State, `None` when the section carries none
    pub state: Option<VlanState>,
    /// Trunk groups in the order they appear in the section
    pub trunk_groups: Vec<String>,
}

impl VlanConfig {
    /// Parse a VLAN section.
    pub fn from_section(vlan_id: VlanId, section: &str) -> Self {
        let state = parse_state(section);
        let config = VlanConfig {
            vlan_id,
            name: parse_name(section),
            state: state.parse().ok(),
            trunk_groups: parse_trunk_groups(section),
        };
        trace!(vlan = %vlan_id, name = %config.name, state = %state, trunk_groups = ?config.trunk_groups, "Parsed VLAN section");
        config
    }

    /// Flat string attribute map.
    ///
    /// Keys are always present. Unset attributes are empty strings and trunk
    /// groups are comma-joined.
    pub fn attributes(&self) -> IndexMap<String, String> {
        IndexMap::from([
            ("vlan_id".to_string(), self.vlan_id.to_string()),
            ("name".to_string(), self.name.clone()),
            (
                "state".to_string(),
                self.state.map(|s| s.to_string()).unwrap_or_default(),
            ),
            ("trunk_groups".to_string(), self.trunk_groups.join(",")),
        ])
    }
}

// ============================================================================
// Attribute parsers
// ============================================================================

/// VLAN name within a section, or `""`.
pub fn parse_name(section: &str) -> String {
    parse_scalar(section, &NAME_REGEX)
}

/// VLAN state keyword within a section, or `""`.
pub fn parse_state(section: &str) -> String {
    parse_scalar(section, &STATE_REGEX)
}

/// Trunk groups within a section, in file order.
pub fn parse_trunk_groups(section: &str) -> Vec<String> {
    parse_list(section, &TRUNK_GROUP_REGEX)
}

// ============================================================================
// Resource manager
// ============================================================================

/// VLAN operations against one node.
///
/// Ids are the decimal text used in the device configuration. Ids outside
/// 1-4094 never reach the device: reads report them as absent, writes fail
/// with [`Error::InvalidIdentifier`].
///
/// A multi-command write is sent in one request. If the device rejects a
/// command part way, the commands before it stay applied; re-read with
/// [`Vlans::get`] before retrying.
#[derive(Debug, Clone)]
pub struct Vlans {
    base: EntityBase,
}

impl Vlans {
    /// Bind to `node`.
    pub fn new(node: Node) -> Self {
        Self {
            base: EntityBase::new(node),
        }
    }

    /// The node this manager talks to.
    pub fn node(&self) -> &Node {
        self.base.node()
    }

    fn parse_id(id: &str) -> Result<VlanId> {
        id.parse().inspect_err(|_| {
            warn!(vlan = %id, "Rejected invalid VLAN id");
        })
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Configuration of VLAN `id`, or `None` when it has no section.
    pub fn get(&self, id: &str) -> Result<Option<VlanConfig>> {
        let Ok(vlan_id) = Self::parse_id(id) else {
            return Ok(None);
        };
        let section = self.base.get_block(&vlan_id.header()?)?;
        if section.is_empty() {
            debug!(vlan = %vlan_id, "VLAN not configured");
            return Ok(None);
        }
        Ok(Some(VlanConfig::from_section(vlan_id, &section)))
    }

    /// Every configured VLAN keyed by id text, in configuration order.
    pub fn get_all(&self) -> Result<IndexMap<String, VlanConfig>> {
        let config = self.base.config()?;
        let mut vlans = IndexMap::new();
        for (id, section) in find_sections(&config, &VLAN_HEADER_REGEX) {
            // Headers that fail validation (e.g. `vlan 0`) are skipped.
            let Ok(vlan_id) = id.parse::<VlanId>() else {
                continue;
            };
            vlans.insert(id, VlanConfig::from_section(vlan_id, &section.content));
        }
        debug!(count = vlans.len(), "Collected VLANs");
        Ok(vlans)
    }

    /// Raw section text of VLAN `id`; empty when absent.
    pub fn get_section(&self, id: &str) -> Result<String> {
        match Self::parse_id(id) {
            Ok(vlan_id) => self.base.get_block(&vlan_id.header()?),
            Err(_) => Ok(String::new()),
        }
    }

    /// Trunk groups of VLAN `id` in configuration order; empty when absent.
    pub fn get_trunk_groups(&self, id: &str) -> Result<Vec<String>> {
        Ok(self
            .get(id)?
            .map(|vlan| vlan.trunk_groups)
            .unwrap_or_default())
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Declare VLAN `id`. Creating an existing VLAN is not an error.
    pub fn create(&self, id: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        self.base.configure(&[vlan_id.context()])
    }

    /// Remove VLAN `id`.
    pub fn delete(&self, id: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        self.base.configure(&[format!("no vlan {}", vlan_id)])
    }

    /// Return VLAN `id` to its default configuration.
    pub fn default(&self, id: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        self.base.configure(&[format!("default vlan {}", vlan_id)])
    }

    // ------------------------------------------------------------------------
    // Scalar attributes
    // ------------------------------------------------------------------------

    fn configure_vlan(&self, vlan_id: VlanId, commands: &[String]) -> Result<()> {
        debug!(vlan = %vlan_id, commands = ?commands, "Configuring VLAN");
        self.base.configure_in(&vlan_id.context(), commands)
    }

    /// Set the name of VLAN `id`. The name must be a single word.
    pub fn set_name(&self, id: &str, name: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        validate_token("VLAN name", name)?;
        self.configure_vlan(vlan_id, &[command_builder("name", Some(name), false)])
    }

    /// Reset the name of VLAN `id` to the device default.
    pub fn set_name_default(&self, id: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        self.configure_vlan(vlan_id, &[command_builder("name", None, true)])
    }

    /// Set the state of VLAN `id`.
    pub fn set_state(&self, id: &str, state: VlanState) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        self.configure_vlan(
            vlan_id,
            &[command_builder("state", Some(state.as_str()), false)],
        )
    }

    /// Reset the state of VLAN `id` to the device default.
    pub fn set_state_default(&self, id: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        self.configure_vlan(vlan_id, &[command_builder("state", None, true)])
    }

    // ------------------------------------------------------------------------
    // Trunk groups
    // ------------------------------------------------------------------------

    /// Make the trunk groups of VLAN `id` equal to `desired` (as a set).
    ///
    /// Groups not in `desired` are removed before missing ones are added, all
    /// in one request. Nothing is sent when the VLAN already matches.
    pub fn set_trunk_group<S: AsRef<str>>(&self, id: &str, desired: &[S]) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        let desired: IndexSet<&str> = desired.iter().map(AsRef::as_ref).collect();
        for group in &desired {
            validate_token("trunk group", group)?;
        }
        let desired: Vec<&str> = desired.into_iter().collect();

        let current = self.get_trunk_groups(id)?;
        let current: Vec<&str> = current.iter().map(String::as_str).collect();
        let changes = ListChanges::between(&current, &desired);
        if changes.is_empty() {
            debug!(vlan = %vlan_id, "Trunk groups already match");
            return Ok(());
        }

        let commands: Vec<String> = changes
            .remove
            .iter()
            .map(|group| format!("no trunk group {}", group))
            .chain(
                changes
                    .add
                    .iter()
                    .map(|group| command_builder("trunk group", Some(group), false)),
            )
            .collect();
        self.configure_vlan(vlan_id, &commands)
    }

    /// Add one trunk group to VLAN `id`.
    pub fn add_trunk_group(&self, id: &str, group: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        validate_token("trunk group", group)?;
        self.configure_vlan(vlan_id, &[format!("trunk group {}", group)])
    }

    /// Remove one trunk group from VLAN `id`.
    pub fn remove_trunk_group(&self, id: &str, group: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        validate_token("trunk group", group)?;
        self.configure_vlan(vlan_id, &[format!("no trunk group {}", group)])
    }

    /// Remove every trunk group from VLAN `id`.
    pub fn set_trunk_group_default(&self, id: &str) -> Result<()> {
        let vlan_id = Self::parse_id(id)?;
        self.configure_vlan(vlan_id, &[command_builder("trunk group", None, true)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Command, ConnectionError, MockConnection};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const RUNNING_CONFIG: &str = "\
hostname veos01
!
vlan 1
   name default
   state active
!
vlan 10
   name BIGDATA
   state suspend
   trunk group mlag-peer
   trunk group tg2
!
vlan 100
   name VLAN0100
   state active
!
interface Ethernet1
   switchport trunk allowed vlan 10,100
!
end
";

    const INVALID_IDS: &[&str] = &["0", "4095", "5000", "65535", "70000", "abc", "", "-1", "+10"];

    fn lines(cmds: &[Command]) -> Vec<&str> {
        cmds.iter().map(Command::as_str).collect()
    }

    fn expect_show(mock: &mut MockConnection, config: &'static str) {
        mock.expect_execute()
            .withf(|cmds| lines(cmds) == ["enable", "show running-config all"])
            .times(1)
            .returning(move |_| Ok(vec![String::new(), config.to_string()]));
    }

    fn expect_config(mock: &mut MockConnection, want: &'static [&'static str]) {
        mock.expect_execute()
            .withf(move |cmds| {
                let got = lines(cmds);
                got.len() == want.len() + 2
                    && got[..2] == ["enable", "configure terminal"]
                    && got[2..] == *want
            })
            .times(1)
            .returning(|cmds| Ok(vec![String::new(); cmds.len()]));
    }

    fn vlans(mock: MockConnection) -> Vlans {
        Node::new("veos01", Arc::new(mock)).vlans()
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    #[test]
    fn test_vlan_id_range() {
        assert_eq!("1".parse::<VlanId>().unwrap().as_u16(), 1);
        assert_eq!("4094".parse::<VlanId>().unwrap().as_u16(), 4094);
        for id in INVALID_IDS {
            assert!(id.parse::<VlanId>().is_err(), "{:?} should be invalid", id);
        }
    }

    #[test]
    fn test_vlan_id_serde() {
        let id: VlanId = serde_json::from_str("42").unwrap();
        assert_eq!(id.to_string(), "42");
        assert!(serde_json::from_str::<VlanId>("4095").is_err());
    }

    #[test]
    fn test_vlan_state_parse() {
        assert_eq!("active".parse::<VlanState>().unwrap(), VlanState::Active);
        assert_eq!("SUSPEND".parse::<VlanState>().unwrap(), VlanState::Suspend);
        let err = "shutdown".parse::<VlanState>().unwrap_err();
        assert!(err.is_validation());
    }

    // ------------------------------------------------------------------------
    // Parsers
    // ------------------------------------------------------------------------

    fn short_conf(line: &str) -> String {
        format!(
            "\n        vlan 10\n            {}\n            state active\n            no private-vlan\n            trunk group tg1\n            ",
            line
        )
    }

    #[test]
    fn test_parse_name() {
        let cases = [
            ("", ""),
            ("name BIGDATA", "BIGDATA"),
            ("name VSAN0200", "VSAN0200"),
            ("name default", "default"),
            ("name test", "test"),
            ("name 42", "42"),
            ("name VLAN0400", "VLAN0400"),
            ("name 12df", "12df"),
            ("name back-end", "back-end"),
        ];
        for (line, want) in cases {
            assert_eq!(parse_name(&short_conf(line)), want, "line {:?}", line);
        }
        assert_eq!(parse_name(""), "");
    }

    #[test]
    fn test_parse_state() {
        let section = "vlan 10\n  name BIGDATA\n  state active\n";
        assert_eq!(parse_name(section), "BIGDATA");
        assert_eq!(parse_state(section), "active");
        assert_eq!(parse_state("vlan 10\n  state suspend\n"), "suspend");
        assert_eq!(parse_state("vlan 10\n  name x\n"), "");
        assert_eq!(parse_state(""), "");
    }

    #[test]
    fn test_parse_trunk_groups_in_order() {
        let section = "\
        vlan 10
            name VSAN0100
            state active
            no private-vlan
            trunk group zz
            trunk group aa
            trunk group mm
";
        assert_eq!(parse_trunk_groups(section), vec!["zz", "aa", "mm"]);
        assert_eq!(
            VlanConfig::from_section(VlanId(10), section).attributes()["trunk_groups"],
            "zz,aa,mm"
        );
    }

    #[test]
    fn test_attributes_empty_values() {
        let config = VlanConfig::from_section(VlanId(7), "vlan 7\n");
        let attrs = config.attributes();
        assert_eq!(
            attrs.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["vlan_id", "name", "state", "trunk_groups"]
        );
        assert_eq!(attrs["vlan_id"], "7");
        assert_eq!(attrs["name"], "");
        assert_eq!(attrs["state"], "");
        assert_eq!(attrs["trunk_groups"], "");
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    #[test]
    fn test_get() {
        let mut mock = MockConnection::new();
        expect_show(&mut mock, RUNNING_CONFIG);

        let vlan = vlans(mock).get("10").unwrap().unwrap();
        assert_eq!(
            vlan,
            VlanConfig {
                vlan_id: VlanId(10),
                name: "BIGDATA".to_string(),
                state: Some(VlanState::Suspend),
                trunk_groups: vec!["mlag-peer".to_string(), "tg2".to_string()],
            }
        );
    }

    #[test]
    fn test_get_absent() {
        let mut mock = MockConnection::new();
        expect_show(&mut mock, RUNNING_CONFIG);
        assert_eq!(vlans(mock).get("20").unwrap(), None);
    }

    #[test]
    fn test_get_invalid_never_fetches() {
        let mut mock = MockConnection::new();
        mock.expect_execute().times(0);
        let vlans = vlans(mock);
        for id in INVALID_IDS {
            assert_eq!(vlans.get(id).unwrap(), None);
            assert_eq!(vlans.get_section(id).unwrap(), "");
            assert!(vlans.get_trunk_groups(id).unwrap().is_empty());
        }
    }

    #[test]
    fn test_get_all_in_discovery_order() {
        let mut mock = MockConnection::new();
        expect_show(&mut mock, RUNNING_CONFIG);

        let all = vlans(mock).get_all().unwrap();
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["1", "10", "100"]);
        assert_eq!(all["1"].name, "default");
        assert_eq!(all["100"].state, Some(VlanState::Active));
    }

    #[test]
    fn test_get_section() {
        let mut mock = MockConnection::new();
        expect_show(&mut mock, RUNNING_CONFIG);
        assert_eq!(
            vlans(mock).get_section("100").unwrap(),
            "vlan 100\n   name VLAN0100\n   state active\n"
        );
    }

    #[test]
    fn test_get_propagates_transport_error() {
        let mut mock = MockConnection::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(ConnectionError::Timeout(30)));
        assert!(vlans(mock).get("10").is_err());
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    #[test]
    fn test_lifecycle_commands() {
        let mut mock = MockConnection::new();
        expect_config(&mut mock, &["vlan 100"]);
        expect_config(&mut mock, &["no vlan 100"]);
        expect_config(&mut mock, &["default vlan 100"]);

        let vlans = vlans(mock);
        vlans.create("100").unwrap();
        vlans.delete("100").unwrap();
        vlans.default("100").unwrap();
    }

    #[test]
    fn test_attribute_commands() {
        let mut mock = MockConnection::new();
        expect_config(&mut mock, &["vlan 10", "name BIGDATA", "exit"]);
        expect_config(&mut mock, &["vlan 10", "default name", "exit"]);
        expect_config(&mut mock, &["vlan 10", "state suspend", "exit"]);
        expect_config(&mut mock, &["vlan 10", "default state", "exit"]);
        expect_config(&mut mock, &["vlan 10", "trunk group tg1", "exit"]);
        expect_config(&mut mock, &["vlan 10", "no trunk group tg1", "exit"]);
        expect_config(&mut mock, &["vlan 10", "default trunk group", "exit"]);

        let vlans = vlans(mock);
        vlans.set_name("10", "BIGDATA").unwrap();
        vlans.set_name_default("10").unwrap();
        vlans.set_state("10", VlanState::Suspend).unwrap();
        vlans.set_state_default("10").unwrap();
        vlans.add_trunk_group("10", "tg1").unwrap();
        vlans.remove_trunk_group("10", "tg1").unwrap();
        vlans.set_trunk_group_default("10").unwrap();
    }

    #[test]
    fn test_invalid_id_never_reaches_device() {
        let mut mock = MockConnection::new();
        mock.expect_execute().times(0);
        let vlans = vlans(mock);

        for id in INVALID_IDS {
            let results = [
                vlans.create(id),
                vlans.delete(id),
                vlans.default(id),
                vlans.set_name(id, "x"),
                vlans.set_name_default(id),
                vlans.set_state(id, VlanState::Active),
                vlans.set_state_default(id),
                vlans.set_trunk_group(id, &["tg1"]),
                vlans.add_trunk_group(id, "tg1"),
                vlans.remove_trunk_group(id, "tg1"),
                vlans.set_trunk_group_default(id),
            ];
            for result in results {
                assert!(
                    matches!(result, Err(Error::InvalidIdentifier { .. })),
                    "id {:?}",
                    id
                );
            }
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut mock = MockConnection::new();
        mock.expect_execute().times(0);
        let vlans = vlans(mock);

        assert!(vlans.set_name("10", "two words").unwrap_err().is_validation());
        assert!(vlans.set_name("10", "").unwrap_err().is_validation());
        assert!(vlans
            .add_trunk_group("10", "tg1\nno vlan 10")
            .unwrap_err()
            .is_validation());
        assert!(vlans
            .set_trunk_group("10", &["ok", "not ok"])
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_set_trunk_group_reconciles() {
        let mut mock = MockConnection::new();
        expect_show(&mut mock, RUNNING_CONFIG);
        expect_config(
            &mut mock,
            &["vlan 10", "no trunk group tg2", "trunk group tg3", "exit"],
        );

        vlans(mock)
            .set_trunk_group("10", &["mlag-peer", "tg3"])
            .unwrap();
    }

    #[test]
    fn test_set_trunk_group_noop_when_matching() {
        let mut mock = MockConnection::new();
        expect_show(&mut mock, RUNNING_CONFIG);

        vlans(mock)
            .set_trunk_group("10", &["tg2", "mlag-peer", "tg2"])
            .unwrap();
    }

    #[test]
    fn test_set_trunk_group_on_absent_vlan_adds_all() {
        let mut mock = MockConnection::new();
        expect_show(&mut mock, RUNNING_CONFIG);
        expect_config(&mut mock, &["vlan 20", "trunk group a", "trunk group b", "exit"]);

        vlans(mock).set_trunk_group("20", &["a", "b"]).unwrap();
    }

    #[test]
    fn test_rejection_is_failure() {
        let mut mock = MockConnection::new();
        mock.expect_execute().times(1).returning(|_| {
            Err(ConnectionError::CommandRejected {
                code: 1002,
                message: "CLI command 4 of 5 'state bogus' failed: invalid command".to_string(),
                errors: vec![],
            })
        });

        let err = vlans(mock).set_name("10", "x").unwrap_err();
        assert!(err.is_command_rejected());
    }
}
