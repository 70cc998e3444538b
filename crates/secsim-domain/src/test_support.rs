use crate::access::{
    AccessTables, DacResource, DacTables, DacUser, MacResource, MacTables, MacUser, Permissions,
    RbacResource, RbacTables, RbacUser, Role,
};
use crate::firewall::FirewallRule;
use secsim_types::{ClearanceLevel, Protocol, RuleAction};
use std::collections::BTreeSet;

pub fn dac_user(id: u32, name: &str, owner: bool) -> DacUser {
    DacUser {
        id,
        name: name.to_string(),
        owner,
    }
}

pub fn dac_resource(id: u32, name: &str, read: bool, write: bool, execute: bool) -> DacResource {
    DacResource {
        id,
        name: name.to_string(),
        permissions: Permissions::new(read, write, execute),
    }
}

pub fn role(id: u32, name: &str, permissions: &[&str]) -> Role {
    Role {
        id,
        name: name.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect::<BTreeSet<_>>(),
    }
}

pub fn rbac_user(id: u32, name: &str, roles: &[&str]) -> RbacUser {
    RbacUser {
        id,
        name: name.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Mirrors the seeded classroom scenario.
pub fn classroom_tables() -> AccessTables {
    AccessTables {
        dac: DacTables {
            users: vec![
                dac_user(1, "Alice", true),
                dac_user(2, "Bob", false),
                dac_user(3, "Charlie", false),
            ],
            resources: vec![
                dac_resource(1, "Document1.txt", true, true, false),
                dac_resource(2, "Application.exe", true, false, true),
                dac_resource(3, "ConfigFile.cfg", true, true, false),
            ],
        },
        mac: MacTables {
            users: vec![
                MacUser {
                    id: 1,
                    name: "Alice".to_string(),
                    clearance: ClearanceLevel::TopSecret,
                },
                MacUser {
                    id: 2,
                    name: "Bob".to_string(),
                    clearance: ClearanceLevel::Secret,
                },
                MacUser {
                    id: 3,
                    name: "Charlie".to_string(),
                    clearance: ClearanceLevel::Confidential,
                },
            ],
            resources: vec![
                MacResource {
                    id: 1,
                    name: "Document1.txt".to_string(),
                    classification: ClearanceLevel::Secret,
                },
                MacResource {
                    id: 2,
                    name: "Application.exe".to_string(),
                    classification: ClearanceLevel::Confidential,
                },
                MacResource {
                    id: 3,
                    name: "ConfigFile.cfg".to_string(),
                    classification: ClearanceLevel::TopSecret,
                },
            ],
        },
        rbac: RbacTables {
            users: vec![
                rbac_user(1, "Alice", &["Admin", "User"]),
                rbac_user(2, "Bob", &["User"]),
                rbac_user(3, "Charlie", &["Guest"]),
            ],
            roles: vec![
                role(1, "Admin", &["read", "write", "execute", "modify"]),
                role(2, "User", &["read", "write"]),
                role(3, "Guest", &["read"]),
            ],
            resources: vec![
                RbacResource {
                    id: 1,
                    name: "Document1.txt".to_string(),
                    required_permission: "read".to_string(),
                },
                RbacResource {
                    id: 2,
                    name: "Application.exe".to_string(),
                    required_permission: "execute".to_string(),
                },
                RbacResource {
                    id: 3,
                    name: "ConfigFile.cfg".to_string(),
                    required_permission: "write".to_string(),
                },
            ],
        },
    }
}

pub fn rule(
    id: u32,
    name: &str,
    port: u16,
    source: &str,
    destination: &str,
    action: RuleAction,
) -> FirewallRule {
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
}

pub fn classroom_rules() -> Vec<FirewallRule> {
    vec![
        rule(1, "Allow HTTP", 80, "Any", "Internal Web Server", RuleAction::Allow),
        rule(2, "Allow HTTPS", 443, "Any", "Internal Web Server", RuleAction::Allow),
        rule(3, "Block Telnet", 23, "Any", "Any", RuleAction::Block),
        rule(4, "Allow SSH", 22, "Admin Network", "Any", RuleAction::Allow),
        rule(5, "Block FTP", 21, "Any", "Any", RuleAction::Block),
    ]
}
