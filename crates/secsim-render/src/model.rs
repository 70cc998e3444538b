#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableTone {
    Info,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Granted,
    Denied,
    Allowed,
    Blocked,
    Attack,
    Skipped,
}

impl RenderableVerdict {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdict::Granted => "GRANTED",
            RenderableVerdict::Denied => "DENIED",
            RenderableVerdict::Allowed => "ALLOWED",
            RenderableVerdict::Blocked => "BLOCKED",
            RenderableVerdict::Attack => "ATTACK",
            RenderableVerdict::Skipped => "SKIPPED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableEvent {
    pub tone: RenderableTone,
    pub time: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTraffic {
    pub id: u32,
    pub time: String,
    pub protocol: String,
    pub source: String,
    pub destination: String,
    pub port: u16,
    pub blocked: bool,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRule {
    pub id: u32,
    pub name: String,
    pub protocol: String,
    pub port: u16,
    pub source: String,
    pub destination: String,
    pub action: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableDecision {
    pub verdict: RenderableVerdict,
    pub op: String,
    pub message: String,
}

/// A session in display order: summary lines, then decisions, then logs
/// (newest first).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableSession {
    pub title: String,
    pub summary: Vec<(String, String)>,
    pub decisions: Vec<RenderableDecision>,
    pub events: Vec<RenderableEvent>,
    pub traffic: Vec<RenderableTraffic>,
}
