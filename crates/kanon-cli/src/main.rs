//! kanon command-line interface.
//!
//! Evaluates how well an already-anonymized table protects its records.
//!
//! # Quick Start
//!
//! ```bash
//! # Judge the table against the configured thresholds (default 2, 3, 5)
//! kanon evaluate anonymized.csv
//!
//! # Pick thresholds and quasi-identifiers explicitly
//! kanon evaluate anonymized.csv -k 2 -k 10 --qi age --qi zip
//!
//! # Inspect what was detected
//! kanon classify anonymized.csv
//! kanon classes anonymized.csv --limit 5
//! ```

mod commands;
mod input;
mod render;
mod style;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use kanon_config::OutputFormat;
use tracing_subscriber::EnvFilter;

use commands::{ConfigSource, InputOptions};
use commands::evaluate::EvaluateOptions;

/// kanon - k-anonymity evaluation for anonymized tables.
#[derive(Parser)]
#[command(name = "kanon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Disable colored output (also honoured via NO_COLOR).
    #[arg(long, global = true)]
    no_color: bool,

    /// Show debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory searched for kanon.toml and kanon.local.toml.
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    project: PathBuf,

    /// Extra config file layered above the project files; must exist.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate k-anonymity for one or more thresholds.
    Evaluate {
        #[command(flatten)]
        input: InputArgs,

        /// Threshold to evaluate; repeat for several (overrides config).
        #[arg(short = 'k', long = "k", value_name = "K", allow_negative_numbers = true)]
        k_values: Vec<i64>,

        /// Quasi-identifier column; repeat or comma-separate (default: auto-detect).
        #[arg(long = "qi", value_name = "COLUMN", value_delimiter = ',')]
        quasi_identifiers: Vec<String>,

        /// Directory for result files.
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Result file format (csv, json).
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Print reports without writing result files.
        #[arg(long)]
        no_write: bool,
    },

    /// Show each column's role and marker counts.
    Classify {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List the smallest equivalence classes and the size distribution.
    Classes {
        #[command(flatten)]
        input: InputArgs,

        /// Quasi-identifier column; repeat or comma-separate (default: auto-detect).
        #[arg(long = "qi", value_name = "COLUMN", value_delimiter = ',')]
        quasi_identifiers: Vec<String>,

        /// Number of classes to list.
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show version information.
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration.
    Show {
        /// Output format (text, json, toml).
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate the configuration files.
    Validate,
}

#[derive(Args)]
struct InputArgs {
    /// Delimited text file with one record per line.
    file: PathBuf,

    /// Field delimiter (overrides config; use "tab" or "\t" for tabs).
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// Treat the first line as data; columns are named column_1, column_2, ...
    #[arg(long)]
    no_header: bool,
}

impl From<InputArgs> for InputOptions {
    fn from(args: InputArgs) -> Self {
        Self {
            file: args.file,
            delimiter: args.delimiter,
            no_header: args.no_header,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    if s == "tab" || s == "\\t" {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '"' && c != '\n' && c != '\r' => Ok(c),
        _ => Err(format!(
            "expected a single character other than a quote or newline, got {s:?}"
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    style::set_no_color(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    // Logs go to stderr so reports on stdout stay clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = ConfigSource {
        project: cli.project,
        file: cli.config,
    };

    match cli.command {
        Commands::Evaluate {
            input,
            k_values,
            quasi_identifiers,
            output_dir,
            format,
            no_write,
        } => commands::evaluate::run(
            &source,
            EvaluateOptions {
                input: input.into(),
                k_values,
                quasi_identifiers,
                output_dir,
                format,
                no_write,
            },
        ),
        Commands::Classify { input } => commands::classify::run(&source, &input.into()),
        Commands::Classes {
            input,
            quasi_identifiers,
            limit,
        } => commands::classes::run(&source, &input.into(), quasi_identifiers, limit),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { format } => commands::config::show(&source, &format),
            ConfigCommands::Validate => commands::config::validate(&source),
        },
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
