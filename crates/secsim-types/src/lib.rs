//! Stable DTOs and IDs used across the secsim workspace.
//!
//! This crate is intentionally boring:
//! - closed enums for models, levels, modes and actions
//! - security events and traffic log entries
//! - the serialized session report
//! - explain registry for the simulated concepts

#![forbid(unsafe_code)]

pub mod event;
pub mod explain;
pub mod ids;
pub mod level;
pub mod report;

pub use event::{EventKind, SecurityEvent, TrafficAction, TrafficLog};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use level::{
    AccessModel, AttackKind, ClearanceLevel, FirewallMode, Protocol, RuleAction, UnknownVariant,
};
pub use report::{
    AccessOutcome, DecisionRecord, ProbeOutcome, SCHEMA_SCENARIO_V1, SCHEMA_SESSION_REPORT_V1,
    SessionReport, SessionSummary, ToolMeta,
};
