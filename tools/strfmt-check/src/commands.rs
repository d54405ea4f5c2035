//! Subcommands.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use strfmt::{Decoded, Registry};
use tracing::debug;

use crate::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate values against a format.
    Check(CheckCommand),

    /// List registered formats.
    List,

    /// Decode fields of a JSON document through their formats.
    Decode(DecodeCommand),
}

impl Commands {
    /// Runs the command. Returns false when some input failed validation.
    pub fn run(self, registry: &Registry, format: OutputFormat) -> Result<bool> {
        match self {
            Commands::Check(cmd) => cmd.run(registry, format),
            Commands::List => {
                let names = registry.names();
                match format {
                    OutputFormat::Text => names.iter().for_each(|name| println!("{name}")),
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
                }
                Ok(true)
            }
            Commands::Decode(cmd) => cmd.run(registry, format),
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Format name, e.g. `email` or `date-time`.
    format: String,

    /// Values to check. Read one per line from stdin when omitted.
    values: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    value: &'a str,
    valid: bool,
}

impl CheckCommand {
    fn run(self, registry: &Registry, output: OutputFormat) -> Result<bool> {
        if !registry.contains_name(&self.format) {
            bail!("unknown format: {}", self.format);
        }

        let values = if self.values.is_empty() {
            read_stdin_lines()?
        } else {
            self.values
        };
        debug!(format = %self.format, count = values.len(), "checking values");

        let results: Vec<CheckResult<'_>> = values
            .iter()
            .map(|value| CheckResult {
                value,
                valid: registry.validates(&self.format, value),
            })
            .collect();

        match output {
            OutputFormat::Text => {
                for result in &results {
                    let verdict = if result.valid { "valid" } else { "invalid" };
                    println!("{verdict}\t{}", result.value);
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        }

        Ok(results.iter().all(|r| r.valid))
    }
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut values = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if !line.is_empty() {
            values.push(line);
        }
    }
    Ok(values)
}

/// A `field=format` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFormat {
    field: String,
    format: String,
}

fn parse_field_format(s: &str) -> Result<FieldFormat> {
    let (field, format) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected <field>=<format>, got {s:?}"))?;
    if field.is_empty() || format.is_empty() {
        bail!("expected <field>=<format>, got {s:?}");
    }
    Ok(FieldFormat {
        field: field.to_string(),
        format: format.to_string(),
    })
}

#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// JSON file holding a top-level object.
    file: PathBuf,

    /// Field to decode, as `<field>=<format>`. Repeatable.
    #[arg(long = "field", required = true, value_parser = parse_field_format)]
    fields: Vec<FieldFormat>,
}

#[derive(Debug, Serialize)]
struct DecodeResult {
    field: String,
    format: String,
    decoded: bool,
    value: Value,
}

impl DecodeCommand {
    fn run(self, registry: &Registry, output: OutputFormat) -> Result<bool> {
        let contents = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let document: Value = serde_json::from_str(&contents)
            .with_context(|| format!("invalid JSON: {}", self.file.display()))?;
        let Value::Object(mut object) = document else {
            bail!("expected JSON object at top-level: {}", self.file.display());
        };

        let mut results = Vec::with_capacity(self.fields.len());
        for FieldFormat { field, format } in self.fields {
            let source = object
                .remove(&field)
                .ok_or_else(|| anyhow!("missing field: {field}"))?;
            let decoded = registry
                .decode_hook(&format, source)
                .with_context(|| format!("field {field}"))?;
            let (decoded, value) = match decoded {
                Decoded::Format(value) => (true, Value::String(value.to_text())),
                Decoded::Passthrough(value) => (false, value),
            };
            results.push(DecodeResult {
                field,
                format,
                decoded,
                value,
            });
        }

        match output {
            OutputFormat::Text => {
                for result in &results {
                    match &result.value {
                        Value::String(text) if result.decoded => {
                            println!("{}\t{}", result.field, text)
                        }
                        other => println!("{}\t{}", result.field, other),
                    }
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        }
        Ok(true)
    }
}
