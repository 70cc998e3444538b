//! The `explain` use case: look up a short lesson for a model, mode, or attack.

use secsim_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// Unknown identifier; includes the identifiers that do exist.
    NotFound {
        identifier: String,
        available: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: explain::all_identifiers(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Try it\n");
    out.push_str("------\n");
    out.push_str(exp.try_it);
    out.push_str("\n\n");
    out.push_str("Example\n");
    out.push_str("-------\n\n");
    out.push_str("Setup:\n");
    out.push_str(exp.example.setup);
    out.push_str("\n\n");
    out.push_str("Outcome:\n");
    out.push_str(exp.example.outcome);
    out.push('\n');

    out
}

pub fn format_not_found(identifier: &str, available: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown concept: {}\n\n", identifier));
    out.push_str("Available identifiers:\n");
    for id in available {
        out.push_str(&format!("  - {}\n", id));
    }

    out
}
