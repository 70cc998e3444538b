use crate::{RenderableRule, RenderableSession, RenderableTone};

/// Plain terminal output. Logs are listed newest first.
pub fn render_text(session: &RenderableSession) -> String {
    let mut out = String::new();

    heading(&mut out, &session.title, '=');
    for (key, value) in &session.summary {
        out.push_str(&format!("{key}: {value}\n"));
    }

    if !session.decisions.is_empty() {
        out.push('\n');
        heading(&mut out, "Decisions", '-');
        for (i, d) in session.decisions.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. [{}] {}: {}\n",
                i + 1,
                d.verdict.label(),
                d.op,
                d.message
            ));
        }
    }

    if !session.events.is_empty() {
        out.push('\n');
        heading(&mut out, "Security events", '-');
        for e in &session.events {
            let tone = match e.tone {
                RenderableTone::Info => "INFO",
                RenderableTone::Success => "SUCCESS",
                RenderableTone::Error => "ERROR",
            };
            out.push_str(&format!("[{tone}] {} {}\n", e.time, e.message));
        }
    }

    if !session.traffic.is_empty() {
        out.push('\n');
        heading(&mut out, "Traffic", '-');
        for t in &session.traffic {
            out.push_str(&format!(
                "#{} {} {} {} {} -> {}:{} ({})\n",
                t.id,
                t.time,
                if t.blocked { "BLOCKED" } else { "ALLOWED" },
                t.protocol,
                t.source,
                t.destination,
                t.port,
                t.reason
            ));
        }
    }

    out
}

pub fn render_rules_text(rules: &[RenderableRule]) -> String {
    if rules.is_empty() {
        return "No firewall rules.\n".to_string();
    }

    rules
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{:>2}. [{}] #{} {}: {} {}/{} {} -> {}\n",
                i + 1,
                if r.enabled { "on " } else { "off" },
                r.id,
                r.name,
                r.action,
                r.protocol,
                r.port,
                r.source,
                r.destination
            )
        })
        .collect()
}

fn heading(out: &mut String, title: &str, underline: char) {
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat_n(underline, title.chars().count()));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_rules, sample_session};

    #[test]
    fn session_snapshot() {
        insta::assert_snapshot!(render_text(&sample_session()), @r"
        Secsim session
        ==============
        Access model: DAC
        Firewall: enabled (Stateful Inspection)

        Decisions
        ---------
          1. [DENIED] access: Access denied: Bob does not have write permission for Application.exe
          2. [BLOCKED] probe: Matched rule: Block Telnet

        Security events
        ---------------
        [ERROR] 12:00:00 Access denied: Bob does not have write permission for Application.exe
        [INFO] 11:59:00 System initialized with DAC model

        Traffic
        -------
        #6 12:00:01 BLOCKED TCP 203.0.113.42 -> 10.0.0.10:23 (Matched rule: Block Telnet)
        ");
    }

    #[test]
    fn rules_list_in_evaluation_order() {
        let text = render_rules_text(&sample_rules());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                " 1. [on ] #3 Block Telnet: Block TCP/23 Any -> Any",
                " 2. [off] #1 Allow HTTP: Allow TCP/80 Any -> Internal Web Server",
            ]
        );
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut session = sample_session();
        session.decisions.clear();
        session.traffic.clear();
        let text = render_text(&session);
        assert!(!text.contains("Decisions"));
        assert!(!text.contains("Traffic"));
        assert!(text.contains("Security events"));
    }
}
