use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Active access-control policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccessModel {
    Dac,
    Mac,
    Rbac,
}

impl AccessModel {
    pub const ALL: [AccessModel; 3] = [AccessModel::Dac, AccessModel::Mac, AccessModel::Rbac];

    /// Upper-case tag used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            AccessModel::Dac => "DAC",
            AccessModel::Mac => "MAC",
            AccessModel::Rbac => "RBAC",
        }
    }
}

/// Totally ordered MAC security level. Comparison is by ordinal.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceLevel {
    Unclassified,
    Confidential,
    Secret,
    TopSecret,
}

impl ClearanceLevel {
    pub const ALL: [ClearanceLevel; 4] = [
        ClearanceLevel::Unclassified,
        ClearanceLevel::Confidential,
        ClearanceLevel::Secret,
        ClearanceLevel::TopSecret,
    ];

    pub fn index(self) -> usize {
        match self {
            ClearanceLevel::Unclassified => 0,
            ClearanceLevel::Confidential => 1,
            ClearanceLevel::Secret => 2,
            ClearanceLevel::TopSecret => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClearanceLevel::Unclassified => "Unclassified",
            ClearanceLevel::Confidential => "Confidential",
            ClearanceLevel::Secret => "Secret",
            ClearanceLevel::TopSecret => "Top Secret",
        }
    }
}

/// Firewall inspection depth. Only changes which attacks can be detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FirewallMode {
    Packet,
    Stateful,
    Application,
}

impl FirewallMode {
    pub fn label(self) -> &'static str {
        match self {
            FirewallMode::Packet => "Packet Filtering",
            FirewallMode::Stateful => "Stateful Inspection",
            FirewallMode::Application => "Application Firewall",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Block,
}

/// Scripted attack generators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Ddos,
    PortScan,
    SqlInjection,
}

impl AttackKind {
    pub fn headline(self) -> &'static str {
        match self {
            AttackKind::Ddos => "DDoS Attack in Progress",
            AttackKind::PortScan => "Port Scan Detected",
            AttackKind::SqlInjection => "SQL Injection Attempt",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            AttackKind::Ddos => "Multiple connection attempts from different sources",
            AttackKind::PortScan => "Sequential port probing from single source",
            AttackKind::SqlInjection => "Malicious SQL payload detected in HTTP request",
        }
    }
}

/// Returned when a string does not name any variant of a closed enum.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value} (expected {expected})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Case-, space- and separator-insensitive key: `"Top Secret"`, `"top_secret"`
/// and `"TopSecret"` all fold to `"topsecret"`.
fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn unknown(kind: &'static str, value: &str, expected: &'static str) -> UnknownVariant {
    UnknownVariant {
        kind,
        value: value.to_string(),
        expected,
    }
}

impl FromStr for AccessModel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "dac" => Ok(AccessModel::Dac),
            "mac" => Ok(AccessModel::Mac),
            "rbac" => Ok(AccessModel::Rbac),
            _ => Err(unknown("access model", s, "dac|mac|rbac")),
        }
    }
}

impl FromStr for ClearanceLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "unclassified" => Ok(ClearanceLevel::Unclassified),
            "confidential" => Ok(ClearanceLevel::Confidential),
            "secret" => Ok(ClearanceLevel::Secret),
            "topsecret" => Ok(ClearanceLevel::TopSecret),
            _ => Err(unknown(
                "clearance level",
                s,
                "unclassified|confidential|secret|top_secret",
            )),
        }
    }
}

impl FromStr for FirewallMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "packet" => Ok(FirewallMode::Packet),
            "stateful" => Ok(FirewallMode::Stateful),
            "application" => Ok(FirewallMode::Application),
            _ => Err(unknown(
                "firewall mode",
                s,
                "packet|stateful|application",
            )),
        }
    }
}

impl FromStr for Protocol {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "icmp" => Ok(Protocol::Icmp),
            _ => Err(unknown("protocol", s, "tcp|udp|icmp")),
        }
    }
}

impl FromStr for RuleAction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "allow" => Ok(RuleAction::Allow),
            "block" | "deny" => Ok(RuleAction::Block),
            _ => Err(unknown("rule action", s, "allow|block")),
        }
    }
}

impl FromStr for AttackKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "ddos" => Ok(AttackKind::Ddos),
            "portscan" => Ok(AttackKind::PortScan),
            "sqlinjection" => Ok(AttackKind::SqlInjection),
            _ => Err(unknown("attack", s, "ddos|port_scan|sql_injection")),
        }
    }
}

impl fmt::Display for AccessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ClearanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for FirewallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Icmp => "ICMP",
        })
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleAction::Allow => "Allow",
            RuleAction::Block => "Block",
        })
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttackKind::Ddos => "ddos",
            AttackKind::PortScan => "port_scan",
            AttackKind::SqlInjection => "sql_injection",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearance_order_matches_ordinal() {
        let mut levels = ClearanceLevel::ALL.to_vec();
        levels.reverse();
        levels.sort();
        assert_eq!(levels, ClearanceLevel::ALL.to_vec());
        for (i, level) in ClearanceLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn clearance_parses_display_and_config_spellings() {
        assert_eq!("Top Secret".parse(), Ok(ClearanceLevel::TopSecret));
        assert_eq!("top_secret".parse(), Ok(ClearanceLevel::TopSecret));
        assert_eq!("TopSecret".parse(), Ok(ClearanceLevel::TopSecret));
        assert!("cosmic".parse::<ClearanceLevel>().is_err());
    }

    #[test]
    fn unknown_variant_message_lists_expected_values() {
        let err = "nope".parse::<FirewallMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown firewall mode: nope (expected packet|stateful|application)"
        );
    }

    #[test]
    fn attack_kind_accepts_cli_spelling() {
        assert_eq!("port-scan".parse(), Ok(AttackKind::PortScan));
        assert_eq!("sql_injection".parse(), Ok(AttackKind::SqlInjection));
    }

    #[test]
    fn protocol_serializes_uppercase() {
        let json = serde_json::to_string(&Protocol::Udp).unwrap();
        assert_eq!(json, "\"UDP\"");
    }
}
