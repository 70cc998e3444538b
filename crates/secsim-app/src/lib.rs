//! Use case orchestration for secsim.
//!
//! This crate provides the application layer: sessions that own the mutable tables and logs,
//! the script runner, and the explain/cipher/render use cases. It delegates every decision to
//! the domain crate.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod access;
mod cipher;
mod explain;
mod firewall;
mod render;
mod scenario;
mod session;

pub use access::{AccessSession, DAC_DEFAULT_ACTION, MAC_ACTION};
pub use cipher::{CipherDirection, run_cipher};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use firewall::{AttackLaunch, FirewallSession, ProbeResult};
pub use render::{
    render_markdown, render_text, rules_to_renderable, serialize_report, to_renderable,
    write_report,
};
pub use scenario::{load_scenario, load_script};
pub use session::{Session, run_script};

#[cfg(test)]
mod test_support;
