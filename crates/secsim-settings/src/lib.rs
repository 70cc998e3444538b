//! Scenario and script parsing plus preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;
mod script;

pub use model::{
    AccessConfig, DacConfig, DacResourceConfig, DacUserConfig, FirewallConfig, MacConfig,
    MacResourceConfig, MacUserConfig, PermissionsConfig, RbacConfig, RbacResourceConfig,
    RbacUserConfig, RoleConfig, RuleConfig, ScenarioConfigV1, TrafficSeedConfig,
};
pub use presets::{PRESET_CLASSROOM, PRESET_EMPTY};
pub use resolve::{FirewallOptions, Overrides, ResolvedScenario};
pub use script::{ScriptV1, Step, StepConfig};

/// Parse `secsim.toml` (or equivalent) into a typed model.
pub fn parse_scenario_toml(input: &str) -> anyhow::Result<ScenarioConfigV1> {
    let cfg: ScenarioConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the starting state of a session (preset + scenario file + overrides).
pub fn resolve_scenario(
    cfg: ScenarioConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedScenario> {
    resolve::resolve_scenario(cfg, overrides)
}

/// Parse a script file into its raw step list.
pub fn parse_script_toml(input: &str) -> anyhow::Result<ScriptV1> {
    let script: ScriptV1 = toml::from_str(input)?;
    Ok(script)
}

/// Validate every step of a script, naming the first invalid one.
pub fn resolve_script(script: ScriptV1) -> anyhow::Result<Vec<Step>> {
    script::resolve_script(script)
}
