use crate::model::{
    AccessConfig, DacConfig, FirewallConfig, MacConfig, RbacConfig, RuleConfig, ScenarioConfigV1,
    TrafficSeedConfig,
};
use crate::presets;
use anyhow::Context;
use secsim_domain::access::{
    AccessTables, DacResource, DacUser, MacResource, MacUser, Permissions, RbacResource, RbacUser,
    Role,
};
use secsim_domain::firewall::PacketDisposition;
use secsim_domain::{DefaultPolicy, FirewallRule, Packet};
use secsim_types::{
    AccessModel, FirewallMode, Protocol, RuleAction, SCHEMA_SCENARIO_V1, TrafficAction,
};
use std::collections::BTreeSet;
use time::Duration;

/// CLI-level overrides applied on top of the scenario file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub preset: Option<String>,
    pub model: Option<String>,
    pub firewall_enabled: Option<bool>,
    pub mode: Option<String>,
}

/// Firewall settings after preset and file resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct FirewallOptions {
    pub enabled: bool,
    pub mode: FirewallMode,
    pub default_policy: DefaultPolicy,
    pub max_traffic_logs: Option<usize>,
    pub attack_window: Duration,
    pub rules: Vec<FirewallRule>,
    /// Newest first.
    pub initial_traffic: Vec<PacketDisposition>,
}

/// Everything a session needs to start.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedScenario {
    pub preset: String,
    pub model: AccessModel,
    pub tables: AccessTables,
    /// Newest first.
    pub initial_events: Vec<String>,
    pub firewall: FirewallOptions,
}

pub fn resolve_scenario(
    cfg: ScenarioConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedScenario> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_SCENARIO_V1
    {
        anyhow::bail!("unsupported scenario schema: {schema} (expected {SCHEMA_SCENARIO_V1})");
    }

    let preset_name = overrides
        .preset
        .clone()
        .or(cfg.preset.clone())
        .unwrap_or_else(|| presets::PRESET_CLASSROOM.to_string());

    let Some(mut scenario) = presets::preset(&preset_name) else {
        anyhow::bail!(
            "unknown preset: {preset_name} (expected '{}' or '{}')",
            presets::PRESET_CLASSROOM,
            presets::PRESET_EMPTY
        );
    };

    apply_access(&mut scenario, cfg.access)?;
    apply_firewall(&mut scenario.firewall, cfg.firewall)?;

    if let Some(model) = overrides.model.as_deref() {
        scenario.model = parse_model(model).context("--access-model")?;
    }
    if let Some(enabled) = overrides.firewall_enabled {
        scenario.firewall.enabled = enabled;
    }
    if let Some(mode) = overrides.mode.as_deref() {
        scenario.firewall.mode = parse_mode(mode)?;
    }

    Ok(scenario)
}

fn apply_access(scenario: &mut ResolvedScenario, access: AccessConfig) -> anyhow::Result<()> {
    if let Some(model) = access.model.as_deref() {
        scenario.model = parse_model(model).context("access.model")?;
    }
    if let Some(events) = access.initial_events {
        scenario.initial_events = events;
    }
    if let Some(dac) = access.dac {
        apply_dac(&mut scenario.tables, dac)?;
    }
    if let Some(mac) = access.mac {
        apply_mac(&mut scenario.tables, mac)?;
    }
    if let Some(rbac) = access.rbac {
        apply_rbac(&mut scenario.tables, rbac)?;
    }
    Ok(())
}

fn apply_dac(tables: &mut AccessTables, dac: DacConfig) -> anyhow::Result<()> {
    if let Some(users) = dac.users {
        ensure_unique_ids("access.dac.users", users.iter().map(|u| u.id))?;
        tables.dac.users = users
            .into_iter()
            .map(|u| DacUser {
                id: u.id,
                name: u.name,
                owner: u.owner,
            })
            .collect();
    }
    if let Some(resources) = dac.resources {
        ensure_unique_ids("access.dac.resources", resources.iter().map(|r| r.id))?;
        tables.dac.resources = resources
            .into_iter()
            .map(|r| DacResource {
                id: r.id,
                name: r.name,
                permissions: Permissions::new(
                    r.permissions.read,
                    r.permissions.write,
                    r.permissions.execute,
                ),
            })
            .collect();
    }
    Ok(())
}

fn apply_mac(tables: &mut AccessTables, mac: MacConfig) -> anyhow::Result<()> {
    if let Some(users) = mac.users {
        ensure_unique_ids("access.mac.users", users.iter().map(|u| u.id))?;
        let mut out = Vec::with_capacity(users.len());
        for u in users {
            let clearance = u
                .clearance
                .parse()
                .with_context(|| format!("invalid clearance for access.mac.users id {}", u.id))?;
            out.push(MacUser {
                id: u.id,
                name: u.name,
                clearance,
            });
        }
        tables.mac.users = out;
    }
    if let Some(resources) = mac.resources {
        ensure_unique_ids("access.mac.resources", resources.iter().map(|r| r.id))?;
        let mut out = Vec::with_capacity(resources.len());
        for r in resources {
            let classification = r.classification.parse().with_context(|| {
                format!("invalid classification for access.mac.resources id {}", r.id)
            })?;
            out.push(MacResource {
                id: r.id,
                name: r.name,
                classification,
            });
        }
        tables.mac.resources = out;
    }
    Ok(())
}

fn apply_rbac(tables: &mut AccessTables, rbac: RbacConfig) -> anyhow::Result<()> {
    if let Some(users) = rbac.users {
        ensure_unique_ids("access.rbac.users", users.iter().map(|u| u.id))?;
        tables.rbac.users = users
            .into_iter()
            .map(|u| RbacUser {
                id: u.id,
                name: u.name,
                roles: u.roles,
            })
            .collect();
    }
    if let Some(roles) = rbac.roles {
        ensure_unique_ids("access.rbac.roles", roles.iter().map(|r| r.id))?;
        let mut names = BTreeSet::new();
        for r in &roles {
            if !names.insert(r.name.as_str()) {
                anyhow::bail!("duplicate role name in access.rbac.roles: {}", r.name);
            }
        }
        tables.rbac.roles = roles
            .into_iter()
            .map(|r| Role {
                id: r.id,
                name: r.name,
                permissions: r.permissions.into_iter().collect(),
            })
            .collect();
    }
    if let Some(resources) = rbac.resources {
        ensure_unique_ids("access.rbac.resources", resources.iter().map(|r| r.id))?;
        tables.rbac.resources = resources
            .into_iter()
            .map(|r| RbacResource {
                id: r.id,
                name: r.name,
                required_permission: r.required_permission,
            })
            .collect();
    }
    Ok(())
}

fn apply_firewall(fw: &mut FirewallOptions, cfg: FirewallConfig) -> anyhow::Result<()> {
    if let Some(enabled) = cfg.enabled {
        fw.enabled = enabled;
    }
    if let Some(mode) = cfg.mode.as_deref() {
        fw.mode = parse_mode(mode).context("firewall.mode")?;
    }
    if let Some(policy) = cfg.default_policy.as_deref() {
        fw.default_policy = parse_default_policy(policy)?;
    }
    if let Some(cap) = cfg.max_traffic_logs {
        if cap == 0 {
            anyhow::bail!("firewall.max_traffic_logs must be at least 1");
        }
        fw.max_traffic_logs = Some(cap as usize);
    }
    if let Some(secs) = cfg.attack_window_secs {
        fw.attack_window = Duration::seconds(i64::from(secs));
    }
    if let Some(rules) = cfg.rules {
        ensure_unique_ids("firewall.rules", rules.iter().map(|r| r.id))?;
        fw.rules = rules
            .into_iter()
            .map(resolve_rule)
            .collect::<anyhow::Result<_>>()?;
    }
    if let Some(traffic) = cfg.initial_traffic {
        fw.initial_traffic = traffic
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                resolve_traffic_seed(t)
                    .with_context(|| format!("invalid firewall.initial_traffic entry {}", i + 1))
            })
            .collect::<anyhow::Result<_>>()?;
    }
    Ok(())
}

fn resolve_rule(rule: RuleConfig) -> anyhow::Result<FirewallRule> {
    let id = rule.id;
    let protocol: Protocol = rule
        .protocol
        .parse()
        .with_context(|| format!("invalid protocol for firewall rule {id}"))?;
    let action: RuleAction = rule
        .action
        .parse()
        .with_context(|| format!("invalid action for firewall rule {id}"))?;
    Ok(FirewallRule {
        id,
        name: rule.name,
        protocol,
        port: rule.port,
        source: rule.source,
        destination: rule.destination,
        action,
        enabled: rule.enabled,
    })
}

fn resolve_traffic_seed(seed: TrafficSeedConfig) -> anyhow::Result<PacketDisposition> {
    let protocol: Protocol = seed.protocol.parse()?;
    Ok(PacketDisposition {
        packet: Packet::new(protocol, seed.port, seed.source, seed.destination),
        action: parse_traffic_action(&seed.action)?,
        reason: seed.reason,
    })
}

fn ensure_unique_ids(table: &str, ids: impl Iterator<Item = u32>) -> anyhow::Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("duplicate id {id} in {table}");
        }
    }
    Ok(())
}

pub(crate) fn parse_model(v: &str) -> anyhow::Result<AccessModel> {
    Ok(v.parse::<AccessModel>()?)
}

pub(crate) fn parse_mode(v: &str) -> anyhow::Result<FirewallMode> {
    Ok(v.parse::<FirewallMode>()?)
}

fn parse_default_policy(v: &str) -> anyhow::Result<DefaultPolicy> {
    match v {
        "allow" => Ok(DefaultPolicy::Allow),
        "block" | "deny" => Ok(DefaultPolicy::Block),
        other => anyhow::bail!("unknown default_policy: {other} (expected 'allow' or 'block')"),
    }
}

fn parse_traffic_action(v: &str) -> anyhow::Result<TrafficAction> {
    match v.to_ascii_lowercase().as_str() {
        "allowed" => Ok(TrafficAction::Allowed),
        "blocked" => Ok(TrafficAction::Blocked),
        other => anyhow::bail!("unknown traffic action: {other} (expected allowed|blocked)"),
    }
}
