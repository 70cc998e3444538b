//! Render use cases: text, Markdown, and JSON from in-memory reports.

use anyhow::Context;
use camino::Utf8Path;
use secsim_domain::FirewallRule;
use secsim_render::{
    RenderableDecision, RenderableEvent, RenderableRule, RenderableSession, RenderableTone,
    RenderableTraffic, RenderableVerdict,
};
use secsim_types::{DecisionRecord, EventKind, SessionReport, TrafficAction};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const CLOCK: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

fn clock(at: OffsetDateTime) -> String {
    at.format(CLOCK).unwrap_or_default()
}

pub fn to_renderable(report: &SessionReport) -> RenderableSession {
    let s = &report.summary;
    let mut summary = Vec::new();
    if let Some(model) = s.access_model {
        summary.push(("Access model".to_string(), model.label().to_string()));
    }
    let firewall = match (s.firewall_enabled, s.firewall_mode) {
        (true, Some(mode)) => format!("enabled ({})", mode.label()),
        (true, None) => "enabled".to_string(),
        (false, _) => "disabled".to_string(),
    };
    summary.push(("Firewall".to_string(), firewall));
    if let Some(attack) = s.active_attack {
        summary.push((
            "Active attack".to_string(),
            format!("{} ({})", attack.headline(), attack.detail()),
        ));
    }

    RenderableSession {
        title: "Secsim session".to_string(),
        summary,
        decisions: report.decisions.iter().map(renderable_decision).collect(),
        events: report
            .events
            .iter()
            .map(|e| RenderableEvent {
                tone: match e.kind {
                    EventKind::Info => RenderableTone::Info,
                    EventKind::Success => RenderableTone::Success,
                    EventKind::Error => RenderableTone::Error,
                },
                time: clock(e.timestamp),
                message: e.message.clone(),
            })
            .collect(),
        traffic: report
            .traffic
            .iter()
            .map(|t| RenderableTraffic {
                id: t.id,
                time: clock(t.timestamp),
                protocol: t.protocol.to_string(),
                source: t.source.clone(),
                destination: t.destination.clone(),
                port: t.port,
                blocked: t.action == TrafficAction::Blocked,
                reason: t.reason.clone(),
            })
            .collect(),
    }
}

fn renderable_decision(record: &DecisionRecord) -> RenderableDecision {
    match record {
        DecisionRecord::Access(a) => RenderableDecision {
            verdict: if a.granted {
                RenderableVerdict::Granted
            } else {
                RenderableVerdict::Denied
            },
            op: "access".to_string(),
            message: a.message.clone(),
        },
        DecisionRecord::Probe(p) => RenderableDecision {
            verdict: match p.action {
                TrafficAction::Allowed => RenderableVerdict::Allowed,
                TrafficAction::Blocked => RenderableVerdict::Blocked,
            },
            op: "probe".to_string(),
            message: format!(
                "{} {} -> {}:{}: {}",
                p.protocol, p.source, p.destination, p.port, p.reason
            ),
        },
        DecisionRecord::Attack {
            attack,
            entries,
            blocked,
        } => RenderableDecision {
            verdict: RenderableVerdict::Attack,
            op: "attack".to_string(),
            message: format!(
                "{}: {} packets, {} blocked",
                attack.headline(),
                entries,
                blocked
            ),
        },
        DecisionRecord::Skipped { step, reason } => RenderableDecision {
            verdict: RenderableVerdict::Skipped,
            op: step.clone(),
            message: reason.clone(),
        },
    }
}

pub fn rules_to_renderable(rules: &[FirewallRule]) -> Vec<RenderableRule> {
    rules
        .iter()
        .map(|r| RenderableRule {
            id: r.id,
            name: r.name.clone(),
            protocol: r.protocol.to_string(),
            port: r.port,
            source: r.source.clone(),
            destination: r.destination.clone(),
            action: r.action.to_string(),
            enabled: r.enabled,
        })
        .collect()
}

pub fn render_text(report: &SessionReport) -> String {
    secsim_render::render_text(&to_renderable(report))
}

pub fn render_markdown(report: &SessionReport) -> String {
    secsim_render::render_markdown(&to_renderable(report))
}

pub fn serialize_report(report: &SessionReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize session report")
}

/// Write a JSON report, creating parent directories as needed.
pub fn write_report(path: &Utf8Path, report: &SessionReport) -> anyhow::Result<()> {
    let bytes = serialize_report(report)?;
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create dir {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write report {path}"))?;
    Ok(())
}
