//! Stable identifiers for explainable concepts.
//!
//! Identifiers are dotted namespaces: `access.*`, `firewall.mode.*`, `attack.*`.

// Access-control models
pub const ACCESS_DAC: &str = "access.dac";
pub const ACCESS_MAC: &str = "access.mac";
pub const ACCESS_RBAC: &str = "access.rbac";

// Firewall
pub const FIREWALL_RULES: &str = "firewall.rules";
pub const FIREWALL_MODE_PACKET: &str = "firewall.mode.packet";
pub const FIREWALL_MODE_STATEFUL: &str = "firewall.mode.stateful";
pub const FIREWALL_MODE_APPLICATION: &str = "firewall.mode.application";

// Attacks
pub const ATTACK_DDOS: &str = "attack.ddos";
pub const ATTACK_PORT_SCAN: &str = "attack.port_scan";
pub const ATTACK_SQL_INJECTION: &str = "attack.sql_injection";

// Toys
pub const CIPHER_CAESAR: &str = "cipher.caesar";

// Traffic reasons
pub const REASON_FIREWALL_DISABLED: &str = "Firewall disabled";
pub const REASON_DDOS_PROTECTION: &str = "DDoS protection";
pub const REASON_PORT_SCAN_DETECTION: &str = "Port scan detection";
pub const REASON_SQL_INJECTION_DETECTED: &str = "Application firewall: SQL injection detected";
pub const REASON_SQL_INJECTION_MISSED: &str =
    "Packet/Stateful firewall cannot detect application layer attacks";
pub const REASON_DEFAULT_DENY: &str = "No matching rule (default deny)";
pub const REASON_DEFAULT_ALLOW: &str = "No matching rule (default allow)";

/// Prefix for traffic entries decided by an explicit rule.
pub const REASON_MATCHED_RULE_PREFIX: &str = "Matched rule: ";

/// Wildcard accepted in rule `source` / `destination` fields.
pub const ANY: &str = "Any";
