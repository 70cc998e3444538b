use crate::event::{SecurityEvent, TrafficAction, TrafficLog};
use crate::level::{AccessModel, AttackKind, FirewallMode, Protocol};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifiers.
pub const SCHEMA_SESSION_REPORT_V1: &str = "secsim.session_report.v1";
pub const SCHEMA_SCENARIO_V1: &str = "secsim.scenario.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AccessOutcome {
    pub model: AccessModel,
    pub user_id: u32,
    pub resource_id: u32,
    pub action: String,
    pub granted: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProbeOutcome {
    pub protocol: Protocol,
    pub port: u16,
    pub source: String,
    pub destination: String,
    pub action: TrafficAction,
    /// Rule that decided the packet; absent when the default policy applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<u32>,
    pub reason: String,
}

/// What happened for one scripted or interactive step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DecisionRecord {
    Access(AccessOutcome),
    Probe(ProbeOutcome),
    Attack {
        attack: AttackKind,
        entries: u32,
        blocked: u32,
    },
    /// The step referenced something that does not exist or was not allowed.
    Skipped { step: String, reason: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_model: Option<AccessModel>,
    pub firewall_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_mode: Option<FirewallMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_attack: Option<AttackKind>,

    pub granted: u32,
    pub denied: u32,
    pub allowed: u32,
    pub blocked: u32,
    pub skipped: u32,
}

/// Serialized outcome of a session run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub summary: SessionSummary,
    pub decisions: Vec<DecisionRecord>,
    /// Newest first.
    pub events: Vec<SecurityEvent>,
    /// Newest first.
    pub traffic: Vec<TrafficLog>,
}

impl SessionReport {
    /// True when any access was denied or any probe was blocked.
    pub fn has_refusals(&self) -> bool {
        self.summary.denied > 0 || self.summary.blocked > 0
    }
}
