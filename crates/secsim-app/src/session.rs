//! The `run` use case: drive one access session and one firewall session
//! through a list of steps and collect a report.

use crate::access::AccessSession;
use crate::firewall::FirewallSession;
use rand::Rng;
use secsim_domain::Packet;
use secsim_settings::{ResolvedScenario, Step};
use secsim_types::{
    AccessOutcome, DecisionRecord, ProbeOutcome, SCHEMA_SESSION_REPORT_V1, SessionReport,
    SessionSummary, ToolMeta, TrafficAction,
};
use time::OffsetDateTime;

/// Both simulators plus the decisions recorded so far.
#[derive(Clone, Debug)]
pub struct Session {
    pub access: AccessSession,
    pub firewall: FirewallSession,
    decisions: Vec<DecisionRecord>,
    started_at: OffsetDateTime,
    clock: OffsetDateTime,
}

impl Session {
    pub fn start(scenario: &ResolvedScenario, now: OffsetDateTime) -> Self {
        tracing::info!(
            preset = %scenario.preset,
            model = %scenario.model,
            rules = scenario.firewall.rules.len(),
            "session started"
        );
        Self {
            access: AccessSession::from_scenario(scenario, now),
            firewall: FirewallSession::from_options(&scenario.firewall, now),
            decisions: Vec::new(),
            started_at: now,
            clock: now,
        }
    }

    /// Simulated time. Only `wait` steps move it.
    pub fn now(&self) -> OffsetDateTime {
        self.clock
    }

    pub fn decisions(&self) -> &[DecisionRecord] {
        &self.decisions
    }

    /// Applies one step at the current simulated time. Returns the decision
    /// it recorded, if any; mutations that succeed record nothing.
    pub fn apply<R: Rng + ?Sized>(&mut self, step: &Step, rng: &mut R) -> Option<&DecisionRecord> {
        self.firewall.poll(self.clock);
        let now = self.clock;

        let record = match step {
            Step::Access {
                model,
                user,
                resource,
                action,
            } => {
                let model = model.unwrap_or(self.access.model());
                let action = action
                    .clone()
                    .unwrap_or_else(|| self.access.default_action(model, *resource));
                match self.access.attempt(model, *user, *resource, &action, now) {
                    Some(decision) => Some(DecisionRecord::Access(AccessOutcome {
                        model,
                        user_id: *user,
                        resource_id: *resource,
                        action,
                        granted: decision.granted,
                        message: decision.message,
                    })),
                    None => skipped(
                        step,
                        format!("unknown user {user} or resource {resource} for {model}"),
                    ),
                }
            }
            Step::SwitchModel(model) => {
                self.access.switch_model(*model, now);
                None
            }
            Step::SetOwner { user, owner } => {
                unless(self.access.set_owner(*user, *owner), step, || {
                    format!("unknown DAC user {user}")
                })
            }
            Step::SetPermission {
                resource,
                permission,
                value,
            } => unless(
                self.access.set_permission(*resource, *permission, *value),
                step,
                || format!("unknown DAC resource {resource}"),
            ),
            Step::SetClearance { user, level } => {
                unless(self.access.set_clearance(*user, *level), step, || {
                    format!("unknown MAC user {user}")
                })
            }
            Step::SetClassification { resource, level } => unless(
                self.access.set_classification(*resource, *level),
                step,
                || format!("unknown MAC resource {resource}"),
            ),
            Step::AssignRole { user, role } => {
                unless(self.access.assign_role(*user, role), step, || {
                    format!("unknown RBAC user {user}")
                })
            }
            Step::RevokeRole { user, role } => {
                unless(self.access.revoke_role(*user, role), step, || {
                    format!("unknown RBAC user {user}")
                })
            }
            Step::Probe {
                protocol,
                port,
                source,
                destination,
            } => {
                let result = self.firewall.probe(
                    Packet::new(*protocol, *port, source.as_str(), destination.as_str()),
                    now,
                );
                Some(DecisionRecord::Probe(ProbeOutcome {
                    protocol: *protocol,
                    port: *port,
                    source: source.clone(),
                    destination: destination.clone(),
                    action: result.verdict.action,
                    matched_rule: result.verdict.matched_rule,
                    reason: result.verdict.reason,
                }))
            }
            Step::ToggleRule(id) => unless(self.firewall.toggle_rule(*id).is_some(), step, || {
                format!("unknown firewall rule {id}")
            }),
            Step::MoveRule { rule, direction } => {
                let known = self.firewall.rules().iter().any(|r| r.id == *rule);
                if known {
                    // Moving past either end is a silent no-op.
                    self.firewall.move_rule(*rule, *direction);
                    None
                } else {
                    skipped(step, format!("unknown firewall rule {rule}"))
                }
            }
            Step::SetEnabled(enabled) => {
                self.firewall.set_enabled(*enabled);
                None
            }
            Step::SetMode(mode) => {
                self.firewall.set_mode(*mode);
                None
            }
            Step::Attack(kind) => match self.firewall.launch_attack(*kind, now, rng) {
                Ok(launch) => Some(DecisionRecord::Attack {
                    attack: *kind,
                    entries: launch.entries.len() as u32,
                    blocked: launch.blocked() as u32,
                }),
                Err(err) => skipped(step, err.to_string()),
            },
            Step::Wait(duration) => match self.clock.checked_add(*duration) {
                Some(later) => {
                    self.clock = later;
                    self.firewall.poll(later);
                    None
                }
                None => skipped(
                    step,
                    format!("waiting {duration} would move the clock past the last supported date"),
                ),
            },
        };

        let record = record?;
        self.decisions.push(record);
        self.decisions.last()
    }

    /// Snapshot of the session as a serializable report.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            schema: SCHEMA_SESSION_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "secsim".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            started_at: self.started_at,
            finished_at: self.clock,
            summary: self.summary(),
            decisions: self.decisions.clone(),
            events: self.access.events().to_vec(),
            traffic: self.firewall.traffic().entries().to_vec(),
        }
    }

    fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary {
            access_model: Some(self.access.model()),
            firewall_enabled: self.firewall.enabled(),
            firewall_mode: Some(self.firewall.mode()),
            active_attack: self.firewall.active_attack(),
            ..SessionSummary::default()
        };
        for d in &self.decisions {
            match d {
                DecisionRecord::Access(a) if a.granted => summary.granted += 1,
                DecisionRecord::Access(_) => summary.denied += 1,
                DecisionRecord::Probe(p) if p.action == TrafficAction::Allowed => {
                    summary.allowed += 1
                }
                DecisionRecord::Probe(_) => summary.blocked += 1,
                DecisionRecord::Attack { .. } => {}
                DecisionRecord::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }
}

fn skipped(step: &Step, reason: String) -> Option<DecisionRecord> {
    tracing::warn!(op = step.op(), %reason, "step skipped");
    Some(DecisionRecord::Skipped {
        step: step.op().to_string(),
        reason,
    })
}

fn unless(applied: bool, step: &Step, reason: impl FnOnce() -> String) -> Option<DecisionRecord> {
    if applied { None } else { skipped(step, reason()) }
}

/// Runs every step in order starting at `start` and returns the final report.
pub fn run_script<R: Rng + ?Sized>(
    scenario: &ResolvedScenario,
    steps: &[Step],
    start: OffsetDateTime,
    rng: &mut R,
) -> SessionReport {
    let mut session = Session::start(scenario, start);
    for step in steps {
        session.apply(step, rng);
    }
    session.firewall.poll(session.now());
    session.report()
}
