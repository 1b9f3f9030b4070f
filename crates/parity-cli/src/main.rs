//! `parity` - terminal front end for the parity check demonstration.
//!
//! Each subcommand drives `parity-core`; no parity logic lives here.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use parity_core::{
    detect_error_in_frame, flip_bit, validate, verify, BinaryString, CheckReport, ParityConfig,
    ParityForm, Verdict,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Even-parity generation and error detection", long_about = None)]
struct Cli {
    /// Config file (.yaml, .yml or .json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate the parity bit for a binary string
    Check {
        /// Binary data (only 0s and 1s)
        data: String,
    },
    /// Check whether a string is a valid binary string
    Validate {
        /// String to validate
        data: String,
    },
    /// Check received data against its parity bit
    Verify {
        /// Received data bits
        data: String,
        /// Received parity bit ('0' or '1')
        parity: char,
    },
    /// Flip bits in the data + parity frame and re-check it
    Flip {
        /// Binary data (only 0s and 1s)
        data: String,
        /// Frame position to flip, 0-based from the left (repeatable)
        #[arg(long = "index", short = 'i', required = true)]
        indices: Vec<usize>,
    },
    /// Explain how parity checking works
    Explain,
    /// Enter binary strings line by line (":receive FRAME" checks a frame, ":quit" exits)
    Interactive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct ValidateReport<'a> {
    input: &'a str,
    verdict: Verdict,
}

#[derive(Serialize)]
struct VerifyReport<'a> {
    data: &'a str,
    parity_bit: char,
    verdict: Verdict,
}

#[derive(Serialize)]
struct FlipReport {
    frame: String,
    flipped: Vec<usize>,
    received: String,
    verdict: Verdict,
}

const EXPLANATION: [&str; 3] = [
    "Count the number of 1s in the data bits",
    "Add a parity bit (0 or 1) to make the total number of 1s even (even parity)",
    "During verification, count all 1s (including parity bit). If the total is odd, an error is detected",
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(cli, stdin.lock(), &mut stdout.lock())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ParityConfig> {
    match path {
        Some(path) => ParityConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ParityConfig::default()),
    }
}

fn run(cli: Cli, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, command = ?cli.command, "Starting");

    match cli.command {
        Commands::Check { data } => {
            let mut form = ParityForm::new(&config);
            form.set_input(data.as_str())?;
            let report = form.calculate();
            emit(out, cli.format, &report, || render_report(&report))
        }
        Commands::Validate { data } => {
            let report = ValidateReport {
                input: &data,
                verdict: Verdict::from_validation(validate(&data)),
            };
            emit(out, cli.format, &report, || report.verdict.message().to_string())
        }
        Commands::Verify { data, parity } => {
            let verdict = verify(&data, parity)?;
            let report = VerifyReport {
                data: &data,
                parity_bit: parity,
                verdict,
            };
            emit(out, cli.format, &report, || {
                format!("Received: {}{}\n{}", data, parity, render_verdict(verdict))
            })
        }
        Commands::Flip { data, indices } => {
            let report = flip(&data, indices)?;
            emit(out, cli.format, &report, || {
                format!(
                    "Sent:     {}\nReceived: {} (flipped {:?})\n{}",
                    report.frame,
                    report.received,
                    report.flipped,
                    render_verdict(report.verdict)
                )
            })
        }
        Commands::Explain => {
            let steps: Vec<String> = EXPLANATION
                .iter()
                .enumerate()
                .map(|(i, step)| format!("{}. {}", i + 1, step))
                .collect();
            emit(out, cli.format, &EXPLANATION, || steps.join("\n"))
        }
        Commands::Interactive => interactive(&config, cli.format, input, out),
    }
}

fn flip(data: &str, indices: Vec<usize>) -> Result<FlipReport> {
    if let Some(index) = indices
        .iter()
        .enumerate()
        .find_map(|(i, index)| indices[..i].contains(index).then_some(index))
    {
        bail!("Bit {} given more than once; flipping it twice restores it", index);
    }

    let frame = BinaryString::parse(data)
        .with_context(|| format!("Cannot build a frame from {:?}", data))?
        .with_parity();

    let received = indices
        .iter()
        .try_fold(frame.clone(), |acc, &index| flip_bit(&acc, index))?;
    let verdict = Verdict::from_detection(detect_error_in_frame(&received)?);

    Ok(FlipReport {
        frame,
        flipped: indices,
        received,
        verdict,
    })
}

fn interactive(
    config: &ParityConfig,
    format: Format,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut form = ParityForm::new(config);
    writeln!(
        out,
        "Enter up to {} binary digits per line (default {:?}). \":receive FRAME\" checks a frame, \":quit\" exits.",
        form.max_input_len(),
        form.input()
    )?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        if line == ":quit" {
            break;
        }

        if let Some(frame) = line.strip_prefix(":receive") {
            match form.receive(frame.trim()) {
                Ok(verdict) => writeln!(out, "{}", render_verdict(verdict))?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
            continue;
        }

        if let Err(e) = form.set_input(line) {
            writeln!(out, "Error: {}", e)?;
            continue;
        }

        let report = form.calculate();
        emit(out, format, &report, || render_report(&report))?;
    }

    Ok(())
}

fn emit<T: Serialize + ?Sized>(
    out: &mut impl Write,
    format: Format,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        Format::Text => writeln!(out, "{}", text())?,
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        Format::Yaml => write!(out, "{}", serde_yaml::to_string(value)?)?,
    }
    Ok(())
}

fn render_verdict(verdict: Verdict) -> String {
    if verdict.is_error() {
        format!("{}: {}", verdict.title(), verdict.message())
    } else {
        verdict.message().to_string()
    }
}

fn render_report(report: &CheckReport) -> String {
    match (&report.data_with_parity, report.parity_bit, report.ones) {
        (Some(combined), Some(bit), Some(ones)) => format!(
            "Ones in data: {}\nParity bit: {}\nData with parity: {}\n{}",
            ones,
            bit,
            combined,
            render_verdict(report.verdict)
        ),
        _ => render_verdict(report.verdict),
    }
}
