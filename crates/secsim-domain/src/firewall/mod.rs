//! Ordered rule matching and scripted attack traffic.

mod attack;
mod engine;
pub mod model;
mod monitor;

pub use attack::{
    DDOS_BURST, DDOS_SOURCE_PREFIX, DDOS_TARGET, PORT_SCAN_PORTS, PORT_SCAN_SOURCE,
    PORT_SCAN_TARGET, SQL_INJECTION_SOURCE, SQL_INJECTION_TARGET, synthesize_attack,
};
pub use engine::{decide, match_rule, move_rule, toggle_rule};
pub use model::{
    DefaultPolicy, FirewallRule, FirewallVerdict, MoveDirection, Packet, PacketDisposition,
};
pub use monitor::{AttackError, AttackMonitor, AttackTicket, DEFAULT_ATTACK_WINDOW};
