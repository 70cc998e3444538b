use secsim_settings::{Overrides, ResolvedScenario, ScenarioConfigV1, resolve_scenario};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn t0() -> OffsetDateTime {
    datetime!(2024-05-01 09:30:00 UTC)
}

pub fn classroom() -> ResolvedScenario {
    resolve_scenario(ScenarioConfigV1::default(), Overrides::default()).expect("classroom preset")
}
