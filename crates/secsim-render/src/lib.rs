//! Rendering utilities for terminal and Markdown surfaces.
//!
//! Renderers take already-formatted view models so output is byte-stable for a given input.

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod text;

pub use markdown::{render_markdown, render_rules_markdown};
pub use model::{
    RenderableDecision, RenderableEvent, RenderableRule, RenderableSession, RenderableTone,
    RenderableTraffic, RenderableVerdict,
};
pub use text::{render_rules_text, render_text};

#[cfg(test)]
mod fixtures;
