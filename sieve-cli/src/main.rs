//! Sieve CLI
//!
//! Command-line keyword scanner built on the sieve-ac automaton.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sieve_ac::{AcConfig, Automaton, AutomatonBuilder, Match};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sieve")]
#[command(about = "Sieve - find every occurrence of a keyword list in text", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every keyword occurrence
    Scan {
        /// Keyword file, one keyword per line
        #[arg(short, long)]
        keywords: PathBuf,

        /// JSON file with automaton limits
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Files to scan (stdin when omitted)
        inputs: Vec<PathBuf>,
    },

    /// Exit successfully only if some input contains a keyword
    Check {
        /// Keyword file, one keyword per line
        #[arg(short, long)]
        keywords: PathBuf,

        /// JSON file with automaton limits
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Files to check (stdin when omitted)
        inputs: Vec<PathBuf>,
    },

    /// Print automaton statistics as JSON
    Stats {
        /// Keyword file, one keyword per line
        #[arg(short, long)]
        keywords: PathBuf,

        /// JSON file with automaton limits
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// One reported occurrence, as printed by `scan --json`
#[derive(Serialize)]
struct Hit<'a> {
    path: &'a str,
    line: usize,
    #[serde(flatten)]
    found: Match<'a>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    match cli.command {
        Commands::Scan {
            keywords,
            config,
            json,
            inputs,
        } => {
            let automaton = load_automaton(&keywords, config.as_deref())?;
            let total = scan(&automaton, &inputs, json)?;
            info!(matches = total, "Scan complete");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            keywords,
            config,
            inputs,
        } => {
            let automaton = load_automaton(&keywords, config.as_deref())?;
            if check(&automaton, &inputs)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Stats { keywords, config } => {
            let automaton = load_automaton(&keywords, config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&automaton.stats())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn setup_logging(level: &str) -> Result<()> {
    let level = level.parse::<Level>().unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AcConfig> {
    let Some(path) = path else {
        return Ok(AcConfig::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AcConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    debug!(config = ?config, "Loaded config");
    Ok(config)
}

/// Keywords from a keyword file: one per line, skipping blank lines and
/// `#` comments. Surrounding whitespace is kept.
fn parse_keywords(raw: &str) -> Vec<&str> {
    raw.lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .collect()
}

fn load_automaton(keywords_path: &Path, config_path: Option<&Path>) -> Result<Automaton> {
    let config = load_config(config_path)?;
    let raw = fs::read_to_string(keywords_path)
        .with_context(|| format!("Failed to read keywords {}", keywords_path.display()))?;

    let keywords = parse_keywords(&raw);
    info!(
        path = %keywords_path.display(),
        count = keywords.len(),
        "Loaded keywords"
    );

    let automaton = AutomatonBuilder::with_config(config)
        .add_keywords(keywords)
        .build()
        .with_context(|| format!("Invalid keyword file {}", keywords_path.display()))?;
    Ok(automaton)
}

/// Inputs as (display name, contents); stdin when no paths are given
fn read_inputs(paths: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if paths.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(vec![("-".to_string(), text)]);
    }

    paths
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn scan(automaton: &Automaton, paths: &[PathBuf], json: bool) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut total = 0;

    for (name, text) in read_inputs(paths)? {
        total += write_matches(automaton, &name, &text, json, &mut out)?;
    }

    out.flush()?;
    Ok(total)
}

/// Write the matches of one input, line by line; offsets are chars within
/// the line and line numbers start at 1.
fn write_matches<W: Write>(
    automaton: &Automaton,
    name: &str,
    text: &str,
    json: bool,
    out: &mut W,
) -> Result<usize> {
    let mut count = 0;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        for found in automaton.find_iter(line) {
            if json {
                let hit = Hit {
                    path: name,
                    line: line_number,
                    found,
                };
                serde_json::to_writer(&mut *out, &hit)?;
                writeln!(out)?;
            } else {
                writeln!(
                    out,
                    "{}:{}:{}-{}:{}",
                    name,
                    line_number,
                    found.start(),
                    found.end(),
                    found.keyword()
                )?;
            }
            count += 1;
        }
    }

    Ok(count)
}

fn check(automaton: &Automaton, paths: &[PathBuf]) -> Result<bool> {
    for (name, text) in read_inputs(paths)? {
        if automaton.contains_match(&text) {
            debug!(input = %name, "Match found");
            return Ok(true);
        }
    }
    Ok(false)
}
