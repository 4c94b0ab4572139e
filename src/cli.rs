//! `cli` feature — a thin local-experimentation harness (spec §6.1), not a
//! server: reads a CSV file plus a `$`-chunked DSL string and prints the
//! resulting JSON to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::dispatch::Dispatcher;
use crate::types::{infer_metadata, infer_type, Culture, InferredType};
use crate::value::{Row, Value};

#[derive(Parser, Debug)]
#[command(name = "pivotql", about = "Evaluate a pivotql DSL query over a CSV file")]
pub struct Cli {
    /// Path to a CSV file; its header row supplies column names.
    #[arg(long)]
    pub data: PathBuf,

    /// A `$`-chunked transformation/action DSL string.
    #[arg(long, default_value = "")]
    pub query: String,

    /// Truncate the result to the first 10 rows before serialization.
    #[arg(long)]
    pub preview: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let (metadata, typed_rows) = load_csv(&cli.data)?;
    let dispatcher = Dispatcher::new(metadata, typed_rows);

    let flags: Vec<String> = if cli.preview {
        vec!["preview".to_string()]
    } else {
        Vec::new()
    };

    let json = dispatcher
        .dispatch(&cli.query, &flags)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn load_csv(path: &std::path::Path) -> Result<(crate::types::Metadata, Vec<Row>)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut text_rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), Value::String(cell.to_string())))
            .collect();
        text_rows.push(row);
    }

    let metadata = infer_metadata(&text_rows);
    let typed_rows = text_rows
        .into_iter()
        .map(|row| coerce_row(row, &metadata))
        .collect();
    Ok((metadata, typed_rows))
}

/// Converts a row of raw CSV text cells into typed [`Value`]s, per the
/// column types `infer_metadata` settled on.
fn coerce_row(row: Row, metadata: &crate::types::Metadata) -> Row {
    row.into_iter()
        .map(|(name, value)| {
            let text = value.as_string();
            let ty = metadata
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, t)| *t)
                .unwrap_or(InferredType::String);
            (name, coerce_cell(&text, ty))
        })
        .collect()
}

fn coerce_cell(text: &str, ty: InferredType) -> Value {
    match ty {
        InferredType::Bool | InferredType::OneZero => match infer_type(text) {
            InferredType::OneZero => Value::Bool(text.trim() == "1"),
            _ => Value::Bool(text.eq_ignore_ascii_case("true")),
        },
        InferredType::Int | InferredType::Float => text
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .unwrap_or(Value::String(text.to_string())),
        InferredType::Date(culture) => parse_for_culture(text, culture)
            .map(Value::Date)
            .unwrap_or_else(|| Value::String(text.to_string())),
        InferredType::String | InferredType::Any => Value::String(text.to_string()),
    }
}

fn parse_for_culture(
    text: &str,
    culture: Option<Culture>,
) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    let _ = culture;
    crate::types::parse_instant(text)
}
