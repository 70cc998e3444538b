use secsim_types::{Protocol, RuleAction, TrafficAction, ids};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirewallRule {
    pub id: u32,
    pub name: String,
    pub protocol: Protocol,
    pub port: u16,
    /// Address or network label; `"Any"` matches everything.
    pub source: String,
    /// Address or network label; `"Any"` matches everything.
    pub destination: String,
    pub action: RuleAction,
    pub enabled: bool,
}

impl FirewallRule {
    pub fn traffic_action(&self) -> TrafficAction {
        match self.action {
            RuleAction::Allow => TrafficAction::Allowed,
            RuleAction::Block => TrafficAction::Blocked,
        }
    }
}

/// A simulated packet presented to the rule table.
///
/// Endpoints are plain labels. `"Any"` here has no wildcard meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    pub protocol: Protocol,
    pub port: u16,
    pub source: String,
    pub destination: String,
}

impl Packet {
    pub fn new(
        protocol: Protocol,
        port: u16,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            protocol,
            port,
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Disposition for packets that no enabled rule matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultPolicy {
    Allow,
    #[default]
    Block,
}

impl DefaultPolicy {
    pub fn action(self) -> TrafficAction {
        match self {
            DefaultPolicy::Allow => TrafficAction::Allowed,
            DefaultPolicy::Block => TrafficAction::Blocked,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            DefaultPolicy::Allow => ids::REASON_DEFAULT_ALLOW,
            DefaultPolicy::Block => ids::REASON_DEFAULT_DENY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Outcome for one packet, before it is stamped with an id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirewallVerdict {
    pub action: TrafficAction,
    pub matched_rule: Option<u32>,
    pub reason: String,
}

/// A packet together with its disposition, ready to be appended to a
/// traffic log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketDisposition {
    pub packet: Packet,
    pub action: TrafficAction,
    pub reason: String,
}
