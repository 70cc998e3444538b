use crate::resolve::{FirewallOptions, ResolvedScenario};
use secsim_domain::access::{
    AccessTables, DacResource, DacTables, DacUser, MacResource, MacTables, MacUser, Permissions,
    RbacResource, RbacTables, RbacUser, Role,
};
use secsim_domain::firewall::{DEFAULT_ATTACK_WINDOW, PacketDisposition};
use secsim_domain::{DefaultPolicy, FirewallRule, Packet};
use secsim_types::{
    AccessModel, ClearanceLevel, FirewallMode, Protocol, RuleAction, TrafficAction,
};

pub const PRESET_CLASSROOM: &str = "classroom";
pub const PRESET_EMPTY: &str = "empty";

/// Built-in starting points. Returns `None` for unknown names.
///
/// Keep these small and readable. Anything bespoke belongs in a scenario file.
pub fn preset(name: &str) -> Option<ResolvedScenario> {
    match name {
        PRESET_CLASSROOM => Some(classroom()),
        PRESET_EMPTY => Some(empty()),
        _ => None,
    }
}

fn empty() -> ResolvedScenario {
    ResolvedScenario {
        preset: PRESET_EMPTY.to_string(),
        model: AccessModel::Dac,
        tables: AccessTables::default(),
        initial_events: Vec::new(),
        firewall: FirewallOptions {
            enabled: true,
            mode: FirewallMode::Stateful,
            default_policy: DefaultPolicy::Block,
            max_traffic_logs: None,
            attack_window: DEFAULT_ATTACK_WINDOW,
            rules: Vec::new(),
            initial_traffic: Vec::new(),
        },
    }
}

fn classroom() -> ResolvedScenario {
    ResolvedScenario {
        preset: PRESET_CLASSROOM.to_string(),
        model: AccessModel::Dac,
        tables: AccessTables {
            dac: classroom_dac(),
            mac: classroom_mac(),
            rbac: classroom_rbac(),
        },
        initial_events: vec![
            "System initialized with DAC model".to_string(),
            "Default permissions applied to all resources".to_string(),
        ],
        firewall: FirewallOptions {
            enabled: true,
            mode: FirewallMode::Stateful,
            default_policy: DefaultPolicy::Block,
            max_traffic_logs: None,
            attack_window: DEFAULT_ATTACK_WINDOW,
            rules: classroom_rules(),
            initial_traffic: classroom_traffic(),
        },
    }
}

const RESOURCES: [&str; 3] = ["Document1.txt", "Application.exe", "ConfigFile.cfg"];

fn classroom_dac() -> DacTables {
    let perms = [
        Permissions::new(true, true, false),
        Permissions::new(true, false, true),
        Permissions::new(true, true, false),
    ];
    DacTables {
        users: [("Alice", true), ("Bob", false), ("Charlie", false)]
            .iter()
            .zip(1..)
            .map(|((name, owner), id)| DacUser {
                id,
                name: name.to_string(),
                owner: *owner,
            })
            .collect(),
        resources: RESOURCES
            .iter()
            .zip(perms)
            .zip(1..)
            .map(|((name, permissions), id)| DacResource {
                id,
                name: name.to_string(),
                permissions,
            })
            .collect(),
    }
}

fn classroom_mac() -> MacTables {
    use ClearanceLevel::*;
    MacTables {
        users: [("Alice", TopSecret), ("Bob", Secret), ("Charlie", Confidential)]
            .into_iter()
            .zip(1..)
            .map(|((name, clearance), id)| MacUser {
                id,
                name: name.to_string(),
                clearance,
            })
            .collect(),
        resources: RESOURCES
            .into_iter()
            .zip([Secret, Confidential, TopSecret])
            .zip(1..)
            .map(|((name, classification), id)| MacResource {
                id,
                name: name.to_string(),
                classification,
            })
            .collect(),
    }
}

fn classroom_rbac() -> RbacTables {
    let role = |id: u32, name: &str, permissions: &[&str]| Role {
        id,
        name: name.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    };
    let user = |id: u32, name: &str, roles: &[&str]| RbacUser {
        id,
        name: name.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    };
    RbacTables {
        users: vec![
            user(1, "Alice", &["Admin", "User"]),
            user(2, "Bob", &["User"]),
            user(3, "Charlie", &["Guest"]),
        ],
        roles: vec![
            role(1, "Admin", &["read", "write", "execute", "modify"]),
            role(2, "User", &["read", "write"]),
            role(3, "Guest", &["read"]),
        ],
        resources: RESOURCES
            .into_iter()
            .zip(["read", "execute", "write"])
            .zip(1..)
            .map(|((name, required), id)| RbacResource {
                id,
                name: name.to_string(),
                required_permission: required.to_string(),
            })
            .collect(),
    }
}

fn classroom_rules() -> Vec<FirewallRule> {
    let rule = |id: u32, name: &str, port: u16, source: &str, destination: &str, action| {
        FirewallRule {
            id,
            name: name.to_string(),
            protocol: Protocol::Tcp,
            port,
            source: source.to_string(),
            destination: destination.to_string(),
            action,
            enabled: true,
        }
    };
    vec![
        rule(1, "Allow HTTP", 80, "Any", "Internal Web Server", RuleAction::Allow),
        rule(2, "Allow HTTPS", 443, "Any", "Internal Web Server", RuleAction::Allow),
        rule(3, "Block Telnet", 23, "Any", "Any", RuleAction::Block),
        rule(4, "Allow SSH", 22, "Admin Network", "Any", RuleAction::Allow),
        rule(5, "Block FTP", 21, "Any", "Any", RuleAction::Block),
    ]
}

/// Newest first, so the entry that gets id 1 is listed first.
fn classroom_traffic() -> Vec<PacketDisposition> {
    let seen = |source: &str, destination: &str, port: u16, action, rule: &str| {
        PacketDisposition {
            packet: Packet::new(Protocol::Tcp, port, source, destination),
            action,
            reason: format!("{}{rule}", secsim_types::ids::REASON_MATCHED_RULE_PREFIX),
        }
    };
    vec![
        seen("192.168.1.100", "10.0.0.5", 80, TrafficAction::Allowed, "Allow HTTP"),
        seen("192.168.1.105", "10.0.0.5", 443, TrafficAction::Allowed, "Allow HTTPS"),
        seen("203.0.113.42", "10.0.0.10", 23, TrafficAction::Blocked, "Block Telnet"),
        seen("10.1.1.5", "10.0.0.15", 22, TrafficAction::Allowed, "Allow SSH"),
        seen("198.51.100.75", "10.0.0.20", 21, TrafficAction::Blocked, "Block FTP"),
    ]
}
