//! Fuzz target for scenario and script TOML parsing.
//!
//! Goal: parsing and resolution should **never panic** on any input.
//! Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_scenario_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use secsim_settings::{
    Overrides, parse_scenario_toml, parse_script_toml, resolve_scenario, resolve_script,
};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(cfg) = parse_scenario_toml(text) {
        let _ = resolve_scenario(cfg, Overrides::default());
    }
    if let Ok(script) = parse_script_toml(text) {
        let _ = resolve_script(script);
    }
});
