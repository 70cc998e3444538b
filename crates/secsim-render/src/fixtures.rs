use crate::{
    RenderableDecision, RenderableEvent, RenderableRule, RenderableSession, RenderableTone,
    RenderableTraffic, RenderableVerdict,
};

const DENIED: &str = "Access denied: Bob does not have write permission for Application.exe";

pub fn sample_session() -> RenderableSession {
    RenderableSession {
        title: "Secsim session".to_string(),
        summary: vec![
            ("Access model".to_string(), "DAC".to_string()),
            (
                "Firewall".to_string(),
                "enabled (Stateful Inspection)".to_string(),
            ),
        ],
        decisions: vec![
            RenderableDecision {
                verdict: RenderableVerdict::Denied,
                op: "access".to_string(),
                message: DENIED.to_string(),
            },
            RenderableDecision {
                verdict: RenderableVerdict::Blocked,
                op: "probe".to_string(),
                message: "Matched rule: Block Telnet".to_string(),
            },
        ],
        events: vec![
            RenderableEvent {
                tone: RenderableTone::Error,
                time: "12:00:00".to_string(),
                message: DENIED.to_string(),
            },
            RenderableEvent {
                tone: RenderableTone::Info,
                time: "11:59:00".to_string(),
                message: "System initialized with DAC model".to_string(),
            },
        ],
        traffic: vec![RenderableTraffic {
            id: 6,
            time: "12:00:01".to_string(),
            protocol: "TCP".to_string(),
            source: "203.0.113.42".to_string(),
            destination: "10.0.0.10".to_string(),
            port: 23,
            blocked: true,
            reason: "Matched rule: Block Telnet".to_string(),
        }],
    }
}

pub fn sample_rules() -> Vec<RenderableRule> {
    let rule = |id: u32, name: &str, port: u16, destination: &str, action: &str, enabled| {
        RenderableRule {
            id,
            name: name.to_string(),
            protocol: "TCP".to_string(),
            port,
            source: "Any".to_string(),
            destination: destination.to_string(),
            action: action.to_string(),
            enabled,
        }
    };
    vec![
        rule(3, "Block Telnet", 23, "Any", "Block", true),
        rule(1, "Allow HTTP", 80, "Internal Web Server", "Allow", false),
    ]
}
