//! `log-location` command line tool.
//!
//! Encodes and decodes caller locations in the canonical
//! `Class.Method(File:Line)` form, and rehydrates stored JSON log records.
//!
//! # Usage
//! ```text
//! log-location encode --class Program --method Main --file Program.cs --line 17
//! log-location decode 'Outer.Inner.Method(C:\path:42)'
//! log-location --config location.toml rehydrate records.jsonl
//! log-location fields
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use log_location::config::{load_config, LocationConfig, MalformedPolicy};
use log_location::location::{decode, encode, LocationRecord};
use log_location::observability::init_logging;
use log_location::record::LogMessage;

#[derive(Parser)]
#[command(name = "log-location")]
#[command(about = "Encode, decode and rehydrate caller locations in log records", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a location
    Encode {
        #[arg(long)]
        class: String,
        #[arg(long)]
        method: String,
        #[arg(long)]
        file: String,
        #[arg(long, allow_negative_numbers = true)]
        line: i32,
    },
    /// Parse a canonical location and print its fields as JSON
    Decode {
        text: String,
    },
    /// Rehydrate JSON-lines log records from a file (or stdin)
    Rehydrate {
        path: Option<PathBuf>,
    },
    /// List the fields of a log record
    Fields,
}

/// Outcome counts of a rehydration pass.
#[derive(Debug, Default, PartialEq, Eq)]
struct RehydrateSummary {
    kept: usize,
    dropped: usize,
    invalid: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LocationConfig::default(),
    };
    init_logging(&config.logging);

    tracing::debug!(
        malformed_policy = ?config.decode.malformed,
        log_format = ?config.logging.format,
        "log-location v0.1.0 starting"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Encode {
            class,
            method,
            file,
            line,
        } => {
            let record = LocationRecord::new(class, method, file, line);
            writeln!(out, "{}", encode(&record))?;
        }
        Commands::Decode { text } => {
            let record = decode(&text).inspect_err(|e| {
                tracing::error!(input = %text, error = %e, "Decode failed");
            })?;
            print_record(&record, &mut out)?;
        }
        Commands::Rehydrate { path } => {
            let input: Box<dyn BufRead> = match path {
                Some(path) => Box::new(BufReader::new(File::open(path)?)),
                None => Box::new(BufReader::new(io::stdin())),
            };
            let summary = rehydrate_lines(input, config.decode.malformed, &mut out)?;
            tracing::info!(
                kept = summary.kept,
                dropped = summary.dropped,
                invalid = summary.invalid,
                "Rehydration complete"
            );
        }
        Commands::Fields => {
            for (name, _) in LogMessage::FIELDS {
                writeln!(out, "{}", name)?;
            }
        }
    }

    Ok(())
}

fn print_record(record: &LocationRecord, out: &mut impl Write) -> io::Result<()> {
    let json = serde_json::json!({
        "class_name": record.class_name(),
        "method_name": record.method_name(),
        "file_name": record.file_name(),
        "line_number": record.line_number(),
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&json)?)
}

fn rehydrate_lines(
    input: impl BufRead,
    policy: MalformedPolicy,
    out: &mut impl Write,
) -> io::Result<RehydrateSummary> {
    let mut summary = RehydrateSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match LogMessage::rehydrate(&line, policy) {
            Ok(Some(message)) => match message.to_json() {
                Ok(json) => {
                    writeln!(out, "{}", json)?;
                    summary.kept += 1;
                }
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "Failed to re-serialize record");
                    summary.invalid += 1;
                }
            },
            Ok(None) => summary.dropped += 1,
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping unreadable record");
                summary.invalid += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use log_location::record::{LogLevel, LogMessageType};

    fn stored(location: &str) -> String {
        let time = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let mut value = serde_json::to_value(LogMessage::create(
            LogLevel::Info,
            LogMessageType::Business,
            time,
            "order placed",
        ))
        .unwrap();
        value["location"] = serde_json::Value::from(location);
        value.to_string()
    }

    #[test]
    fn test_cli_parses_negative_line() {
        let cli = Cli::try_parse_from([
            "log-location", "encode", "--class", "A", "--method", "b", "--file", "c.rs", "--line",
            "-1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Encode { line: -1, .. }));
    }

    #[test]
    fn test_print_record() {
        let mut out = Vec::new();
        print_record(&LocationRecord::new("Program", "Main", "Program.cs", 17), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["class_name"], "Program");
        assert_eq!(value["line_number"], 17);
    }

    #[test]
    fn test_rehydrate_lines_counts() {
        let input = format!(
            "{}\n\n{}\n{{broken\n",
            stored("Shop.Orders.Place(orders.rs:12)"),
            stored("garbage"),
        );

        let mut out = Vec::new();
        let summary =
            rehydrate_lines(input.as_bytes(), MalformedPolicy::Discard, &mut out).unwrap();
        assert_eq!(
            summary,
            RehydrateSummary {
                kept: 1,
                dropped: 1,
                invalid: 1
            }
        );

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Shop.Orders.Place(orders.rs:12)"));
    }

    #[test]
    fn test_rehydrate_lines_placeholder_keeps_record() {
        let input = stored("no.location");
        let mut out = Vec::new();
        let summary =
            rehydrate_lines(input.as_bytes(), MalformedPolicy::Placeholder, &mut out).unwrap();
        assert_eq!(summary.kept, 1);
        assert!(String::from_utf8(out).unwrap().contains("?.?(?:-1)"));
    }
}
