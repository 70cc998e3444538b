//! Developer tasks (schema generation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use secsim_types::AccessModel;
use secsim_types::explain::{all_identifiers, lookup_explanation};
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_scenario_schema() -> schemars::Schema {
    schema_for!(secsim_settings::ScenarioConfigV1)
}

fn generate_script_schema() -> schemars::Schema {
    schema_for!(secsim_settings::ScriptV1)
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(secsim_types::SessionReport)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "secsim.scenario.v1.json",
            generate: generate_scenario_schema,
        },
        SchemaSpec {
            filename: "secsim.script.v1.json",
            generate: generate_script_schema,
        },
        SchemaSpec {
            filename: "secsim.session_report.v1.json",
            generate: generate_report_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }
        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Every listed identifier, and every access model by its short name, must
/// resolve to a complete explanation.
fn explain_coverage_errors() -> Vec<String> {
    let models: Vec<String> = AccessModel::ALL
        .iter()
        .map(|m| m.label().to_ascii_lowercase())
        .collect();
    let names = all_identifiers()
        .iter()
        .copied()
        .chain(models.iter().map(String::as_str));

    let mut errors = Vec::new();
    for id in names {
        match lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("'{id}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("'{id}' has empty description"));
                }
                if exp.try_it.is_empty() {
                    errors.push(format!("'{id}' has empty try-it section"));
                }
                if exp.example.setup.is_empty() || exp.example.outcome.is_empty() {
                    errors.push(format!("'{id}' has an incomplete example"));
                }
            }
            None => errors.push(format!("'{id}' has no explanation")),
        }
    }
    errors
}

fn explain_coverage() -> anyhow::Result<()> {
    let errors = explain_coverage_errors();
    if errors.is_empty() {
        println!("{} identifiers have explanations", all_identifiers().len());
        return Ok(());
    }
    for e in &errors {
        eprintln!("  - {e}");
    }
    bail!("{} explain coverage errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  explain-coverage  Validate all identifiers have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_identifier_is_explained() {
        assert_eq!(explain_coverage_errors(), Vec::<String>::new());
    }

    #[test]
    fn schemas_serialize_with_trailing_newline() {
        for spec in schema_specs() {
            let json = serialize_schema(&(spec.generate)()).expect("serialize");
            assert!(json.ends_with("}\n"), "{}", spec.filename);
        }
    }
}
