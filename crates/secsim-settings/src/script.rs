//! Script files: an ordered list of session operations.

use crate::resolve::{parse_mode, parse_model};
use anyhow::Context;
use schemars::JsonSchema;
use secsim_domain::MoveDirection;
use secsim_domain::access::DacPermission;
use secsim_types::{AccessModel, AttackKind, ClearanceLevel, FirewallMode, Protocol, ids};
use serde::{Deserialize, Serialize};
use time::Duration;

/// `secsim` script schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScriptV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// One step as written in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepConfig {
    Access {
        /// Defaults to the session's active model.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        user: u32,
        resource: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action: Option<String>,
    },
    SwitchModel {
        model: String,
    },
    SetOwner {
        user: u32,
        owner: bool,
    },
    SetPermission {
        resource: u32,
        permission: String,
        value: bool,
    },
    SetClearance {
        user: u32,
        level: String,
    },
    SetClassification {
        resource: u32,
        level: String,
    },
    AssignRole {
        user: u32,
        role: String,
    },
    RevokeRole {
        user: u32,
        role: String,
    },
    Probe {
        protocol: String,
        port: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination: Option<String>,
    },
    ToggleRule {
        rule: u32,
    },
    MoveRule {
        rule: u32,
        direction: String,
    },
    SetEnabled {
        enabled: bool,
    },
    SetMode {
        mode: String,
    },
    Attack {
        attack: String,
    },
    Wait {
        secs: u32,
    },
}

/// A validated step.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Access {
        model: Option<AccessModel>,
        user: u32,
        resource: u32,
        action: Option<String>,
    },
    SwitchModel(AccessModel),
    SetOwner {
        user: u32,
        owner: bool,
    },
    SetPermission {
        resource: u32,
        permission: DacPermission,
        value: bool,
    },
    SetClearance {
        user: u32,
        level: ClearanceLevel,
    },
    SetClassification {
        resource: u32,
        level: ClearanceLevel,
    },
    AssignRole {
        user: u32,
        role: String,
    },
    RevokeRole {
        user: u32,
        role: String,
    },
    Probe {
        protocol: Protocol,
        port: u16,
        source: String,
        destination: String,
    },
    ToggleRule(u32),
    MoveRule {
        rule: u32,
        direction: MoveDirection,
    },
    SetEnabled(bool),
    SetMode(FirewallMode),
    Attack(AttackKind),
    Wait(Duration),
}

impl Step {
    /// Short operation name, matching the `op` tag in script files.
    pub fn op(&self) -> &'static str {
        match self {
            Step::Access { .. } => "access",
            Step::SwitchModel(_) => "switch_model",
            Step::SetOwner { .. } => "set_owner",
            Step::SetPermission { .. } => "set_permission",
            Step::SetClearance { .. } => "set_clearance",
            Step::SetClassification { .. } => "set_classification",
            Step::AssignRole { .. } => "assign_role",
            Step::RevokeRole { .. } => "revoke_role",
            Step::Probe { .. } => "probe",
            Step::ToggleRule(_) => "toggle_rule",
            Step::MoveRule { .. } => "move_rule",
            Step::SetEnabled(_) => "set_enabled",
            Step::SetMode(_) => "set_mode",
            Step::Attack(_) => "attack",
            Step::Wait(_) => "wait",
        }
    }
}

pub fn resolve_script(script: ScriptV1) -> anyhow::Result<Vec<Step>> {
    script
        .steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| resolve_step(step).with_context(|| format!("invalid step {}", i + 1)))
        .collect()
}

fn resolve_step(step: StepConfig) -> anyhow::Result<Step> {
    Ok(match step {
        StepConfig::Access {
            model,
            user,
            resource,
            action,
        } => Step::Access {
            model: model.as_deref().map(parse_model).transpose()?,
            user,
            resource,
            action,
        },
        StepConfig::SwitchModel { model } => Step::SwitchModel(parse_model(&model)?),
        StepConfig::SetOwner { user, owner } => Step::SetOwner { user, owner },
        StepConfig::SetPermission {
            resource,
            permission,
            value,
        } => Step::SetPermission {
            resource,
            permission: parse_permission(&permission)?,
            value,
        },
        StepConfig::SetClearance { user, level } => Step::SetClearance {
            user,
            level: level.parse()?,
        },
        StepConfig::SetClassification { resource, level } => Step::SetClassification {
            resource,
            level: level.parse()?,
        },
        StepConfig::AssignRole { user, role } => Step::AssignRole { user, role },
        StepConfig::RevokeRole { user, role } => Step::RevokeRole { user, role },
        StepConfig::Probe {
            protocol,
            port,
            source,
            destination,
        } => Step::Probe {
            protocol: protocol.parse()?,
            port,
            source: source.unwrap_or_else(|| ids::ANY.to_string()),
            destination: destination.unwrap_or_else(|| ids::ANY.to_string()),
        },
        StepConfig::ToggleRule { rule } => Step::ToggleRule(rule),
        StepConfig::MoveRule { rule, direction } => Step::MoveRule {
            rule,
            direction: parse_direction(&direction)?,
        },
        StepConfig::SetEnabled { enabled } => Step::SetEnabled(enabled),
        StepConfig::SetMode { mode } => Step::SetMode(parse_mode(&mode)?),
        StepConfig::Attack { attack } => Step::Attack(attack.parse()?),
        StepConfig::Wait { secs } => Step::Wait(Duration::seconds(i64::from(secs))),
    })
}

fn parse_permission(v: &str) -> anyhow::Result<DacPermission> {
    match DacPermission::from_action(v) {
        Some(p) => Ok(p),
        None => anyhow::bail!("unknown permission: {v} (expected read|write|execute)"),
    }
}

fn parse_direction(v: &str) -> anyhow::Result<MoveDirection> {
    match v {
        "up" => Ok(MoveDirection::Up),
        "down" => Ok(MoveDirection::Down),
        other => anyhow::bail!("unknown direction: {other} (expected 'up' or 'down')"),
    }
}
