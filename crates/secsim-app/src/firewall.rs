//! Firewall session: ordered rules, options, traffic log, and the attack window.

use rand::Rng;
use secsim_domain::{
    AttackError, AttackMonitor, AttackTicket, DefaultPolicy, FirewallRule, FirewallVerdict,
    MoveDirection, Packet, TrafficLedger, decide, move_rule, synthesize_attack, toggle_rule,
};
use secsim_domain::firewall::PacketDisposition;
use secsim_settings::FirewallOptions;
use secsim_types::{AttackKind, FirewallMode, TrafficAction, TrafficLog};
use time::OffsetDateTime;

/// Result of one probe: the verdict and the log entry it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeResult {
    pub verdict: FirewallVerdict,
    pub entry: TrafficLog,
}

/// Result of launching an attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackLaunch {
    pub ticket: AttackTicket,
    /// In send order; the log shows them as one newest block.
    pub entries: Vec<TrafficLog>,
}

impl AttackLaunch {
    pub fn blocked(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.action == TrafficAction::Blocked)
            .count()
    }
}

#[derive(Clone, Debug)]
pub struct FirewallSession {
    rules: Vec<FirewallRule>,
    enabled: bool,
    mode: FirewallMode,
    default_policy: DefaultPolicy,
    traffic: TrafficLedger,
    monitor: AttackMonitor,
}

impl FirewallSession {
    /// Starts from resolved options. Seed traffic is stamped with `now` and
    /// numbered from 1 in listed order.
    pub fn from_options(options: &FirewallOptions, now: OffsetDateTime) -> Self {
        let mut traffic = TrafficLedger::new(options.max_traffic_logs);
        traffic.record_batch(options.initial_traffic.clone(), now);
        Self {
            rules: options.rules.clone(),
            enabled: options.enabled,
            mode: options.mode,
            default_policy: options.default_policy,
            traffic,
            monitor: AttackMonitor::new(options.attack_window),
        }
    }

    /// In evaluation order.
    pub fn rules(&self) -> &[FirewallRule] {
        &self.rules
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> FirewallMode {
        self.mode
    }

    pub fn default_policy(&self) -> DefaultPolicy {
        self.default_policy
    }

    pub fn traffic(&self) -> &TrafficLedger {
        &self.traffic
    }

    /// The attack whose window is still open. Call [`FirewallSession::poll`]
    /// first to apply elapsed deadlines.
    pub fn active_attack(&self) -> Option<AttackKind> {
        self.monitor.active()
    }

    pub fn probe(&mut self, packet: Packet, now: OffsetDateTime) -> ProbeResult {
        let verdict = decide(&self.rules, &packet, self.enabled, self.default_policy);
        tracing::debug!(
            protocol = %packet.protocol,
            port = packet.port,
            source = %packet.source,
            destination = %packet.destination,
            action = ?verdict.action,
            rule = ?verdict.matched_rule,
            "probe decision"
        );
        let entry = self.traffic.record(
            PacketDisposition {
                packet,
                action: verdict.action,
                reason: verdict.reason.clone(),
            },
            now,
        );
        ProbeResult { verdict, entry }
    }

    /// Returns the rule's new enabled state, or `None` for an unknown id.
    pub fn toggle_rule(&mut self, id: u32) -> Option<bool> {
        let state = toggle_rule(&mut self.rules, id);
        if let Some(enabled) = state {
            tracing::debug!(rule = id, enabled, "rule toggled");
        }
        state
    }

    pub fn move_rule(&mut self, id: u32, direction: MoveDirection) -> bool {
        move_rule(&mut self.rules, id, direction)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            tracing::info!(enabled, "firewall state changed");
        }
        self.enabled = enabled;
    }

    pub fn set_mode(&mut self, mode: FirewallMode) {
        if self.mode != mode {
            tracing::info!(%mode, "firewall mode changed");
        }
        self.mode = mode;
    }

    /// Opens an attack window and logs the synthetic traffic. Rejected while
    /// another window is still open.
    pub fn launch_attack<R: Rng + ?Sized>(
        &mut self,
        kind: AttackKind,
        now: OffsetDateTime,
        rng: &mut R,
    ) -> Result<AttackLaunch, AttackError> {
        let ticket = self.monitor.launch(kind, now)?;
        let batch = synthesize_attack(kind, self.enabled, self.mode, rng);
        let entries = self.traffic.record_batch(batch, now);
        tracing::info!(
            attack = %kind,
            entries = entries.len(),
            expires_at = %ticket.expires_at,
            "attack simulation launched"
        );
        Ok(AttackLaunch { ticket, entries })
    }

    /// Closes an elapsed window. Returns the attack that ended.
    pub fn poll(&mut self, now: OffsetDateTime) -> Option<AttackKind> {
        let ended = self.monitor.poll(now);
        if let Some(attack) = ended {
            tracing::info!(%attack, "attack simulation ended");
        }
        ended
    }

    /// Closes the window named by `ticket`; stale tickets do nothing.
    pub fn expire(&mut self, ticket: &AttackTicket) -> bool {
        self.monitor.expire(ticket)
    }
}
