//! Fuzz target for running arbitrary step sequences against the classroom preset.
//!
//! Goal: a session never panics, whatever ids, roles or timings a script uses,
//! and its logs keep their shape.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_script_run
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;
use secsim_domain::MoveDirection;
use secsim_domain::access::DacPermission;
use secsim_settings::{Overrides, Step, resolve_scenario};
use secsim_types::{AccessModel, AttackKind, ClearanceLevel, FirewallMode, Protocol};
use std::collections::HashSet;
use time::{Duration, OffsetDateTime};

#[derive(Arbitrary, Debug)]
enum FuzzStep {
    Access { model: u8, user: u8, resource: u8, action: Option<String> },
    SwitchModel(u8),
    SetOwner { user: u8, owner: bool },
    SetPermission { resource: u8, permission: u8, value: bool },
    SetClearance { user: u8, level: u8 },
    SetClassification { resource: u8, level: u8 },
    AssignRole { user: u8, role: String },
    RevokeRole { user: u8, role: String },
    Probe { protocol: u8, port: u16, source: String, destination: String },
    ToggleRule(u8),
    MoveRule { rule: u8, up: bool },
    SetEnabled(bool),
    SetMode(u8),
    Attack(u8),
    Wait(u32),
}

#[derive(Arbitrary, Debug)]
struct Input {
    seed: u64,
    steps: Vec<FuzzStep>,
}

fn pick<T: Copy>(items: &[T], i: u8) -> T {
    items[usize::from(i) % items.len()]
}

fn to_step(s: FuzzStep) -> Step {
    const MODELS: [AccessModel; 3] = AccessModel::ALL;
    const MODES: [FirewallMode; 3] = [
        FirewallMode::Packet,
        FirewallMode::Stateful,
        FirewallMode::Application,
    ];
    const ATTACKS: [AttackKind; 3] = [
        AttackKind::Ddos,
        AttackKind::PortScan,
        AttackKind::SqlInjection,
    ];
    const PROTOCOLS: [Protocol; 3] = [Protocol::Tcp, Protocol::Udp, Protocol::Icmp];
    const PERMISSIONS: [DacPermission; 3] = [
        DacPermission::Read,
        DacPermission::Write,
        DacPermission::Execute,
    ];

    match s {
        FuzzStep::Access {
            model,
            user,
            resource,
            action,
        } => Step::Access {
            model: Some(pick(&MODELS, model)),
            user: user.into(),
            resource: resource.into(),
            action,
        },
        FuzzStep::SwitchModel(m) => Step::SwitchModel(pick(&MODELS, m)),
        FuzzStep::SetOwner { user, owner } => Step::SetOwner {
            user: user.into(),
            owner,
        },
        FuzzStep::SetPermission {
            resource,
            permission,
            value,
        } => Step::SetPermission {
            resource: resource.into(),
            permission: pick(&PERMISSIONS, permission),
            value,
        },
        FuzzStep::SetClearance { user, level } => Step::SetClearance {
            user: user.into(),
            level: pick(&ClearanceLevel::ALL, level),
        },
        FuzzStep::SetClassification { resource, level } => Step::SetClassification {
            resource: resource.into(),
            level: pick(&ClearanceLevel::ALL, level),
        },
        FuzzStep::AssignRole { user, role } => Step::AssignRole {
            user: user.into(),
            role,
        },
        FuzzStep::RevokeRole { user, role } => Step::RevokeRole {
            user: user.into(),
            role,
        },
        FuzzStep::Probe {
            protocol,
            port,
            source,
            destination,
        } => Step::Probe {
            protocol: pick(&PROTOCOLS, protocol),
            port,
            source,
            destination,
        },
        FuzzStep::ToggleRule(id) => Step::ToggleRule(id.into()),
        FuzzStep::MoveRule { rule, up } => Step::MoveRule {
            rule: rule.into(),
            direction: if up {
                MoveDirection::Up
            } else {
                MoveDirection::Down
            },
        },
        FuzzStep::SetEnabled(on) => Step::SetEnabled(on),
        FuzzStep::SetMode(m) => Step::SetMode(pick(&MODES, m)),
        FuzzStep::Attack(a) => Step::Attack(pick(&ATTACKS, a)),
        FuzzStep::Wait(secs) => Step::Wait(Duration::seconds(secs.into())),
    }
}

fuzz_target!(|input: Input| {
    if input.steps.len() > 64 {
        return;
    }
    let Ok(scenario) = resolve_scenario(Default::default(), Overrides::default()) else {
        return;
    };
    let steps: Vec<Step> = input.steps.into_iter().map(to_step).collect();
    let mut rng = StdRng::seed_from_u64(input.seed);

    let report = secsim_app::run_script(&scenario, &steps, OffsetDateTime::UNIX_EPOCH, &mut rng);

    assert!(report.events.len() <= 10);
    let mut ids = HashSet::new();
    for entry in &report.traffic {
        assert!(ids.insert(entry.id), "duplicate traffic id {}", entry.id);
    }
    assert!(report.finished_at >= report.started_at);
});
