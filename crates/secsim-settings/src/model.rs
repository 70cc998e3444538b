use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `secsim.toml` schema v1.
///
/// This is a *user-facing* model: enum-like values stay strings here and are
/// validated during resolution so errors can name the offending table entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScenarioConfigV1 {
    /// Optional schema string. When present it must be `secsim.scenario.v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Starting point: `classroom` (default) or `empty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default)]
    pub access: AccessConfig,

    #[serde(default)]
    pub firewall: FirewallConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AccessConfig {
    /// Active model: `dac`, `mac`, or `rbac`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Info events present before the first interaction (newest first).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_events: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dac: Option<DacConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<MacConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbac: Option<RbacConfig>,
}

/// A table that is present replaces the preset's table wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DacConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<DacUserConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<DacResourceConfig>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DacUserConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub owner: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DacResourceConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub permissions: PermissionsConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PermissionsConfig {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub execute: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MacConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<MacUserConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<MacResourceConfig>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MacUserConfig {
    pub id: u32,
    pub name: String,
    /// `unclassified`, `confidential`, `secret`, or `top_secret`.
    pub clearance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MacResourceConfig {
    pub id: u32,
    pub name: String,
    pub classification: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RbacConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<RbacUserConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<RbacResourceConfig>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RbacUserConfig {
    pub id: u32,
    pub name: String,
    /// Role names; names without a matching role are kept and simply grant nothing.
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoleConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RbacResourceConfig {
    pub id: u32,
    pub name: String,
    pub required_permission: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FirewallConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// `packet`, `stateful`, or `application`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Disposition of unmatched packets: `allow` or `block`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<String>,

    /// Cap on retained traffic log entries. Absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_traffic_logs: Option<u32>,

    /// How long an attack simulation stays active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_window_secs: Option<u32>,

    /// Ordered rule table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleConfig>>,

    /// Traffic log entries present at start, newest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_traffic: Option<Vec<TrafficSeedConfig>>,
}

fn any_endpoint() -> String {
    secsim_types::ids::ANY.to_string()
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    pub id: u32,
    pub name: String,
    /// `tcp`, `udp`, or `icmp`.
    pub protocol: String,
    pub port: u16,
    #[serde(default = "any_endpoint")]
    pub source: String,
    #[serde(default = "any_endpoint")]
    pub destination: String,
    /// `allow` or `block`.
    pub action: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrafficSeedConfig {
    pub source: String,
    pub destination: String,
    pub protocol: String,
    pub port: u16,
    /// `allowed` or `blocked`.
    pub action: String,
    pub reason: String,
}
