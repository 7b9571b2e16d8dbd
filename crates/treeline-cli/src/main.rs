use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use treeline::jsonl::Report;

#[derive(Debug, Parser)]
#[command(
    name = "treeline",
    version,
    about = "Convert XML to JSON and validate JSONL"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert an XML document to JSON
    Convert {
        /// Input file (defaults to stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
        /// Emit compact JSON on one line
        #[arg(long)]
        compact: bool,
    },
    /// Validate newline-delimited JSON line by line
    Validate {
        /// Input file (defaults to stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
        /// Emit the valid records as a JSON array instead of the report
        #[arg(long)]
        records: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();
    match args.command {
        Command::Convert {
            input,
            output,
            compact,
        } => {
            let data = read_input(&input)?;
            let rendered = if compact {
                treeline::xml_to_json(&data)?
            } else {
                treeline::xml_to_json_pretty(&data)?
            };
            write_output(&output, format!("{rendered}\n").as_bytes())
        }
        Command::Validate {
            input,
            output,
            records,
        } => {
            let data = read_input(&input)?;
            let report = treeline::validate_jsonl(&data);
            let rendered = if records {
                format!("{}\n", report.records_to_json())
            } else {
                render_report(&report)
            };
            write_output(&output, rendered.as_bytes())?;
            if !report.is_valid() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn render_report(report: &Report) -> String {
    let mut out = format!(
        "{} lines: {} valid, {} invalid, {} empty\n",
        report.total_lines, report.valid_lines, report.invalid_lines, report.empty_lines
    );

    if !report.errors.is_empty() {
        out.push('\n');
        for error in &report.errors {
            match error.column {
                Some(column) => out.push_str(&format!(
                    "line {}, column {}: {}\n",
                    error.line, column, error.message
                )),
                None => out.push_str(&format!("line {}: {}\n", error.line, error.message)),
            }
            out.push_str(&format!("  {}\n", error.content));
        }
    }

    if !report.key_frequency.is_empty() {
        out.push('\n');
        out.push_str("keys:\n");
        for (key, count) in report.key_frequency.iter() {
            out.push_str(&format!("  {key}: {count}\n"));
        }
    }

    out
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("reading input file {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            stdout.flush().context("failed to write stdout")?;
            Ok(())
        }
    }
}
