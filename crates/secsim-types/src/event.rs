use crate::level::Protocol;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Info,
    Success,
    Error,
}

/// One line of the access-control activity log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SecurityEvent {
    pub kind: EventKind,
    pub message: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl SecurityEvent {
    pub fn info(message: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            kind: EventKind::Info,
            message: message.into(),
            timestamp,
        }
    }
}

/// Disposition recorded for a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TrafficAction {
    Allowed,
    Blocked,
}

/// One line of the firewall traffic log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrafficLog {
    pub id: u32,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub source: String,
    pub destination: String,
    pub protocol: Protocol,
    pub port: u16,
    pub action: TrafficAction,
    pub reason: String,
}
