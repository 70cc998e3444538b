//! The scenario-loading use case.

use anyhow::Context;
use secsim_settings::{Overrides, ResolvedScenario, Step, parse_scenario_toml, parse_script_toml};

/// Resolve a scenario from optional file contents plus overrides. `None`
/// means "no file": the preset alone decides.
pub fn load_scenario(text: Option<&str>, overrides: Overrides) -> anyhow::Result<ResolvedScenario> {
    let cfg = match text {
        Some(text) => parse_scenario_toml(text).context("parse scenario")?,
        None => Default::default(),
    };
    let scenario = secsim_settings::resolve_scenario(cfg, overrides).context("resolve scenario")?;
    tracing::info!(
        preset = %scenario.preset,
        model = %scenario.model,
        firewall_enabled = scenario.firewall.enabled,
        mode = %scenario.firewall.mode,
        rules = scenario.firewall.rules.len(),
        "scenario resolved"
    );
    Ok(scenario)
}

pub fn load_script(text: &str) -> anyhow::Result<Vec<Step>> {
    let script = parse_script_toml(text).context("parse script")?;
    let steps = secsim_settings::resolve_script(script)?;
    tracing::debug!(steps = steps.len(), "script loaded");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secsim_types::AccessModel;

    #[test]
    fn no_file_means_classroom() {
        let s = load_scenario(None, Overrides::default()).expect("load");
        assert_eq!(s.preset, "classroom");
        assert_eq!(s.tables.dac.users.len(), 3);
    }

    #[test]
    fn overrides_apply_without_a_file() {
        let s = load_scenario(
            None,
            Overrides {
                model: Some("rbac".to_string()),
                ..Overrides::default()
            },
        )
        .expect("load");
        assert_eq!(s.model, AccessModel::Rbac);
    }

    #[test]
    fn parse_errors_carry_context() {
        let err = load_scenario(Some("preset = ["), Overrides::default()).expect_err("bad toml");
        assert!(format!("{err:#}").starts_with("parse scenario"));
    }

    #[test]
    fn load_script_resolves_steps() {
        let steps = load_script("[[steps]]\nop = \"toggle_rule\"\nrule = 3\n").expect("load");
        assert_eq!(steps, vec![Step::ToggleRule(3)]);
    }
}
