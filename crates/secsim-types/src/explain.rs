//! Explain registry for simulated concepts.
//!
//! Maps stable identifiers to short lessons with a worked example.

use crate::ids;

/// Explanation entry for a model, firewall mode, or attack.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short name of the concept.
    pub title: &'static str,
    /// What the concept is and how the simulator evaluates it.
    pub description: &'static str,
    /// Things to try in the simulator.
    pub try_it: &'static str,
    /// Worked example.
    pub example: ExamplePair,
}

/// A scenario and what the simulator reports for it.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    pub setup: &'static str,
    pub outcome: &'static str,
}

/// Look up an explanation by identifier.
///
/// Short aliases (`dac`, `ddos`, `application`, ...) are accepted as well as the
/// dotted identifiers. Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::ACCESS_DAC | "dac" => Some(explain_dac()),
        ids::ACCESS_MAC | "mac" => Some(explain_mac()),
        ids::ACCESS_RBAC | "rbac" => Some(explain_rbac()),

        ids::FIREWALL_RULES | "rules" => Some(explain_rules()),
        ids::FIREWALL_MODE_PACKET | "packet" => Some(explain_packet_mode()),
        ids::FIREWALL_MODE_STATEFUL | "stateful" => Some(explain_stateful_mode()),
        ids::FIREWALL_MODE_APPLICATION | "application" => Some(explain_application_mode()),

        ids::ATTACK_DDOS | "ddos" => Some(explain_ddos()),
        ids::ATTACK_PORT_SCAN | "port_scan" | "port-scan" => Some(explain_port_scan()),
        ids::ATTACK_SQL_INJECTION | "sql_injection" | "sql-injection" => {
            Some(explain_sql_injection())
        }

        ids::CIPHER_CAESAR | "caesar" => Some(explain_caesar()),

        _ => None,
    }
}

/// List all known identifiers.
pub fn all_identifiers() -> &'static [&'static str] {
    &[
        ids::ACCESS_DAC,
        ids::ACCESS_MAC,
        ids::ACCESS_RBAC,
        ids::FIREWALL_RULES,
        ids::FIREWALL_MODE_PACKET,
        ids::FIREWALL_MODE_STATEFUL,
        ids::FIREWALL_MODE_APPLICATION,
        ids::ATTACK_DDOS,
        ids::ATTACK_PORT_SCAN,
        ids::ATTACK_SQL_INJECTION,
        ids::CIPHER_CAESAR,
    ]
}

fn explain_dac() -> Explanation {
    Explanation {
        title: "Discretionary Access Control (DAC)",
        description: "\
The owner of a resource decides who may use it. Each resource carries read,
write and execute flags.

An access is granted when the user owns the resource OR the requested
permission flag is set. Any action other than read, write or execute is
simply not permitted.",
        try_it: "\
- Toggle Bob's owner flag and retry a write on Application.exe
- Clear the read flag on Document1.txt and compare Alice with Bob",
        example: ExamplePair {
            setup: "Bob (not owner) requests write on Application.exe (r-x)",
            outcome: "Access denied: Bob does not have write permission for Application.exe",
        },
    }
}

fn explain_mac() -> Explanation {
    Explanation {
        title: "Mandatory Access Control (MAC)",
        description: "\
The system, not the owner, decides. Users hold a clearance and resources a
classification drawn from Unclassified < Confidential < Secret < Top Secret.

An access is granted when the user's clearance dominates (is at least) the
resource's classification. The simulator uses this single dominance check
for every action; it does not model the separate no-read-up / no-write-down
properties of Bell-LaPadula.",
        try_it: "\
- Lower Alice to Confidential and access ConfigFile.cfg
- Raise Document1.txt to Top Secret and watch Bob lose access",
        example: ExamplePair {
            setup: "Bob (Secret) accesses ConfigFile.cfg (Top Secret)",
            outcome: "Access denied: Bob's clearance (Secret) is insufficient for ConfigFile.cfg (Top Secret)",
        },
    }
}

fn explain_rbac() -> Explanation {
    Explanation {
        title: "Role-Based Access Control (RBAC)",
        description: "\
Permissions are attached to roles and users are assigned roles by name.

Each resource names the permission it requires. An access is granted when
at least one of the user's roles carries that permission. A role name with
no matching role contributes nothing.",
        try_it: "\
- Ask Charlie (Guest) to execute Application.exe
- Give Bob the Admin role and retry",
        example: ExamplePair {
            setup: "Charlie (Guest: read) accesses ConfigFile.cfg (requires write)",
            outcome: "Access denied: Charlie's roles do not have write permission required for ConfigFile.cfg",
        },
    }
}

fn explain_rules() -> Explanation {
    Explanation {
        title: "Ordered Firewall Rules",
        description: "\
Rules are evaluated top to bottom. The first enabled rule whose protocol,
port, source and destination all match decides the packet. `Any` in a rule's
source or destination matches every address.

When nothing matches, the configured default policy applies (block unless
configured otherwise). A disabled firewall lets everything through.",
        try_it: "\
- Disable \"Allow HTTP\" and probe TCP/80 again
- Move \"Block Telnet\" to the top; order only matters when rules overlap",
        example: ExamplePair {
            setup: "Probe TCP port 23 from 203.0.113.42",
            outcome: "Blocked - Matched rule: Block Telnet",
        },
    }
}

fn explain_packet_mode() -> Explanation {
    Explanation {
        title: "Packet Filtering",
        description: "\
Each packet is judged on its headers alone: protocol, port and addresses.
Fast and simple, but blind to connection state and payload.",
        try_it: "- Switch to packet mode and launch the SQL injection attack",
        example: ExamplePair {
            setup: "SQL injection over TCP/80 in packet mode",
            outcome: "Allowed - Packet/Stateful firewall cannot detect application layer attacks",
        },
    }
}

fn explain_stateful_mode() -> Explanation {
    Explanation {
        title: "Stateful Inspection",
        description: "\
Tracks connections so replies to permitted traffic are recognised. Still
judges headers, not payloads.",
        try_it: "- Compare the SQL injection outcome with application mode",
        example: ExamplePair {
            setup: "SQL injection over TCP/80 in stateful mode",
            outcome: "Allowed - Packet/Stateful firewall cannot detect application layer attacks",
        },
    }
}

fn explain_application_mode() -> Explanation {
    Explanation {
        title: "Application Firewall",
        description: "\
Inspects application-layer payloads (HTTP bodies, queries). Only this mode
can recognise payload-borne attacks such as SQL injection.",
        try_it: "- Switch to application mode and launch the SQL injection attack",
        example: ExamplePair {
            setup: "SQL injection over TCP/80 in application mode",
            outcome: "Blocked - Application firewall: SQL injection detected",
        },
    }
}

fn explain_ddos() -> Explanation {
    Explanation {
        title: "Distributed Denial of Service",
        description: "\
A flood of UDP packets to port 80 from many random sources. An enabled
firewall blocks the burst through out-of-band rate limiting, independent of
the rule table.",
        try_it: "- Launch it with the firewall enabled, then disabled",
        example: ExamplePair {
            setup: "5 UDP/80 packets from 203.0.113.x, firewall enabled",
            outcome: "Blocked - DDoS protection (x5)",
        },
    }
}

fn explain_port_scan() -> Explanation {
    Explanation {
        title: "Port Scan",
        description: "\
One source probes ports 22, 23, 80, 443 and 3389 in sequence. An enabled
firewall recognises the pattern and blocks every probe.",
        try_it: "- Launch it with the firewall disabled to see every probe succeed",
        example: ExamplePair {
            setup: "198.51.100.42 probes 5 ports, firewall enabled",
            outcome: "Blocked - Port scan detection (x5)",
        },
    }
}

fn explain_sql_injection() -> Explanation {
    Explanation {
        title: "SQL Injection",
        description: "\
A single HTTP request on TCP/80 whose payload carries SQL. Header-based
inspection cannot see it; only an enabled application firewall blocks it.",
        try_it: "- Try every firewall mode with the firewall enabled",
        example: ExamplePair {
            setup: "SQL injection in application mode, firewall enabled",
            outcome: "Blocked - Application firewall: SQL injection detected",
        },
    }
}

fn explain_caesar() -> Explanation {
    Explanation {
        title: "Caesar Cipher",
        description: "\
Every letter is rotated by a fixed shift within its case; everything else is
left alone. The shift is the first key character's code modulo 26, or 3 when
no key is given. Trivially broken: there are only 26 keys.",
        try_it: "- Encrypt with key `a` (shift 19) and decrypt again",
        example: ExamplePair {
            setup: "encrypt \"Hello, World\" without a key",
            outcome: "Khoor, Zruog",
        },
    }
}
