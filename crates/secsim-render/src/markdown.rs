use crate::{RenderableRule, RenderableSession, RenderableTone};

pub fn render_markdown(session: &RenderableSession) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", session.title));
    for (key, value) in &session.summary {
        out.push_str(&format!("- {}: **{}**\n", key, value));
    }
    if !session.summary.is_empty() {
        out.push('\n');
    }

    out.push_str("## Decisions\n\n");
    if session.decisions.is_empty() {
        out.push_str("No decisions.\n\n");
    } else {
        out.push_str("| # | Verdict | Op | Detail |\n|---|---|---|---|\n");
        for (i, d) in session.decisions.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | `{}` | {} |\n",
                i + 1,
                d.verdict.label(),
                d.op,
                cell(&d.message)
            ));
        }
        out.push('\n');
    }

    out.push_str("## Security events\n\n");
    if session.events.is_empty() {
        out.push_str("No events.\n\n");
    } else {
        for e in &session.events {
            let tone = match e.tone {
                RenderableTone::Info => "INFO",
                RenderableTone::Success => "SUCCESS",
                RenderableTone::Error => "ERROR",
            };
            out.push_str(&format!("- **{}** `{}` {}\n", tone, e.time, e.message));
        }
        out.push('\n');
    }

    out.push_str("## Traffic\n\n");
    if session.traffic.is_empty() {
        out.push_str("No traffic.\n");
        return out;
    }
    out.push_str("| ID | Time | Protocol | Source | Destination | Port | Action | Reason |\n");
    out.push_str("|---|---|---|---|---|---|---|---|\n");
    for t in &session.traffic {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            t.id,
            t.time,
            t.protocol,
            cell(&t.source),
            cell(&t.destination),
            t.port,
            if t.blocked { "Blocked" } else { "Allowed" },
            cell(&t.reason)
        ));
    }

    out
}

/// Rule table in evaluation order.
pub fn render_rules_markdown(rules: &[RenderableRule]) -> String {
    if rules.is_empty() {
        return "No firewall rules.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("| # | ID | Name | Protocol | Port | Source | Destination | Action | Enabled |\n");
    out.push_str("|---|---|---|---|---|---|---|---|---|\n");
    for (i, r) in rules.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            r.id,
            cell(&r.name),
            r.protocol,
            r.port,
            cell(&r.source),
            cell(&r.destination),
            r.action,
            if r.enabled { "yes" } else { "no" }
        ));
    }
    out
}

fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}
