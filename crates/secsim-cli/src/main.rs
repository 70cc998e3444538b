//! CLI entry point for secsim.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All simulation logic lives in the `secsim-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use secsim_app::{
    CipherDirection, ExplainOutput, load_scenario, load_script, render_markdown, render_text,
    rules_to_renderable, run_cipher, run_explain, run_script, serialize_report, write_report,
};
use secsim_settings::{Overrides, ResolvedScenario, Step};
use secsim_types::{AccessModel, AttackKind, Protocol, SessionReport, ids};
use std::io::Write;
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code when an access is denied or a probe is blocked.
const EXIT_REFUSED: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "secsim",
    version,
    about = "Deterministic simulator for access-control models and firewall rules"
)]
struct Cli {
    /// Path to a scenario TOML. Without it the preset alone is used.
    #[arg(long, global = true)]
    scenario: Option<Utf8PathBuf>,

    /// Override the preset (classroom|empty).
    #[arg(long, global = true)]
    preset: Option<String>,

    /// Override the starting access model (dac|mac|rbac).
    #[arg(long, global = true)]
    access_model: Option<String>,

    /// Override the firewall mode (packet|stateful|application).
    #[arg(long, global = true)]
    mode: Option<String>,

    /// Start with the firewall disabled.
    #[arg(long, global = true)]
    firewall_off: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log at info level unless SECSIM_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Md,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CipherOp {
    Encrypt,
    Decrypt,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one access attempt. Exits 2 when denied.
    Access {
        /// Model to evaluate under (dac|mac|rbac). Defaults to the scenario's active model.
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        user: u32,
        #[arg(long)]
        resource: u32,
        /// Requested action (DAC: read|write|execute).
        #[arg(long)]
        action: Option<String>,
    },

    /// Send one packet through the rule table. Exits 2 when blocked.
    Probe {
        /// tcp|udp|icmp
        #[arg(long)]
        protocol: String,
        #[arg(long)]
        port: u16,
        /// Source label. "Any" only meets rules whose source is "Any".
        #[arg(long, default_value = ids::ANY)]
        source: String,
        /// Destination label, e.g. "Internal Web Server".
        #[arg(long, default_value = ids::ANY)]
        destination: String,
    },

    /// Launch a synthetic attack and show the resulting traffic.
    Attack {
        /// ddos|port-scan|sql-injection
        kind: String,
        /// Seed for randomized source addresses.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Execute a script of steps and report every decision. Exits 2 on any refusal.
    Run {
        script: Utf8PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the JSON report to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// List firewall rules in evaluation order.
    Rules,

    /// Caesar cipher toy.
    Cipher {
        #[arg(value_enum)]
        op: CipherOp,
        #[arg(long, default_value = "")]
        key: String,
        text: String,
    },

    /// Explain a model, firewall mode, or attack.
    Explain {
        /// e.g. "access.mac", "rbac", "firewall.mode.application", "ddos"
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.cmd {
        Commands::Access {
            model,
            user,
            resource,
            action,
        } => {
            let model = model
                .as_deref()
                .map(str::parse::<AccessModel>)
                .transpose()
                .context("invalid --model")?;
            let step = Step::Access {
                model,
                user: *user,
                resource: *resource,
                action: action.clone(),
            };
            cmd_session(&cli, vec![step], None, None, true)
        }
        Commands::Probe {
            protocol,
            port,
            source,
            destination,
        } => {
            let protocol: Protocol = protocol.parse().context("invalid --protocol")?;
            let step = Step::Probe {
                protocol,
                port: *port,
                source: source.clone(),
                destination: destination.clone(),
            };
            cmd_session(&cli, vec![step], None, None, true)
        }
        Commands::Attack { kind, seed } => {
            let kind: AttackKind = kind.parse().context("invalid attack")?;
            cmd_session(&cli, vec![Step::Attack(kind)], *seed, None, false)
        }
        Commands::Run {
            script,
            seed,
            report_out,
        } => {
            let text = std::fs::read_to_string(script)
                .with_context(|| format!("read script: {}", script))?;
            let steps = load_script(&text).with_context(|| format!("load script: {}", script))?;
            cmd_session(&cli, steps, *seed, report_out.as_deref(), true)
        }
        Commands::Rules => cmd_rules(&cli),
        Commands::Cipher { op, key, text } => {
            let direction = match op {
                CipherOp::Encrypt => CipherDirection::Encrypt,
                CipherOp::Decrypt => CipherDirection::Decrypt,
            };
            println!("{}", run_cipher(direction, key, text));
            Ok(())
        }
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_env("SECSIM_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_env("SECSIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn load(cli: &Cli) -> anyhow::Result<ResolvedScenario> {
    let text = match &cli.scenario {
        Some(path) => Some(
            std::fs::read_to_string(path).with_context(|| format!("read scenario: {}", path))?,
        ),
        None => None,
    };
    let overrides = Overrides {
        preset: cli.preset.clone(),
        model: cli.access_model.clone(),
        firewall_enabled: cli.firewall_off.then_some(false),
        mode: cli.mode.clone(),
    };
    load_scenario(text.as_deref(), overrides)
}

fn cmd_session(
    cli: &Cli,
    steps: Vec<Step>,
    seed: Option<u64>,
    report_out: Option<&Utf8Path>,
    exit_on_refusal: bool,
) -> anyhow::Result<()> {
    let scenario = load(cli)?;

    let seed = seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "attack rng seeded");
    let mut rng = StdRng::seed_from_u64(seed);

    let report = run_script(&scenario, &steps, OffsetDateTime::now_utc(), &mut rng);

    if let Some(path) = report_out {
        write_report(path, &report)?;
    }
    emit_report(cli.format, &report)?;

    if exit_on_refusal && report.has_refusals() {
        std::process::exit(EXIT_REFUSED);
    }
    Ok(())
}

fn emit_report(format: OutputFormat, report: &SessionReport) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(report)),
        OutputFormat::Md => print!("{}", render_markdown(report)),
        OutputFormat::Json => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&serialize_report(report)?)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn cmd_rules(cli: &Cli) -> anyhow::Result<()> {
    let scenario = load(cli)?;
    let rules = rules_to_renderable(&scenario.firewall.rules);
    match cli.format {
        OutputFormat::Text => print!("{}", secsim_render::render_rules_text(&rules)),
        OutputFormat::Md => print!("{}", secsim_render::render_rules_markdown(&rules)),
        OutputFormat::Json => {
            let value: Vec<serde_json::Value> = rules
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "name": r.name,
                        "protocol": r.protocol,
                        "port": r.port,
                        "source": r.source,
                        "destination": r.destination,
                        "action": r.action,
                        "enabled": r.enabled,
                    })
                })
                .collect();
            let text = serde_json::to_string_pretty(&value).context("serialize rules")?;
            println!("{text}");
        }
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", secsim_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available,
        } => {
            eprint!("{}", secsim_app::format_not_found(&identifier, available));
            std::process::exit(1);
        }
    }
}
