//! Pure policy evaluation (no IO).
//!
//! Input: snapshots of the access tables or the firewall rule list, plus the
//! requested action or packet.
//! Output: a decision and the log entry the caller should append.

#![forbid(unsafe_code)]

pub mod access;
pub mod cipher;
pub mod firewall;
pub mod log;

pub use access::{AccessDecision, AccessRequest, AccessTables, evaluate};
pub use firewall::{
    AttackError, AttackMonitor, AttackTicket, DefaultPolicy, FirewallRule, FirewallVerdict,
    MoveDirection, Packet, decide, match_rule, move_rule, synthesize_attack, toggle_rule,
};
pub use log::{ACCESS_EVENT_CAPACITY, BoundedLog, EventLog, TrafficLedger};

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_support;
