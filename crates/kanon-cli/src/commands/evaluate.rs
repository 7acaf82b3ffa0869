//! Evaluate command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use kanon::{Evaluator, KEvaluation, MetricReport};
use kanon_config::{KanonConfig, OutputConfig, OutputFormat};
use tracing::info;

use super::{ConfigSource, InputOptions, load_dataset, override_quasi_identifiers};
use crate::render;
use crate::style::{print_error, print_success};

pub struct EvaluateOptions {
    pub input: InputOptions,
    pub k_values: Vec<i64>,
    pub quasi_identifiers: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub no_write: bool,
}

impl EvaluateOptions {
    /// Command-line flags override the loaded configuration.
    fn apply(&mut self, config: &mut KanonConfig) {
        if !self.k_values.is_empty() {
            config.evaluation.k_values = std::mem::take(&mut self.k_values);
        }
        override_quasi_identifiers(config, std::mem::take(&mut self.quasi_identifiers));
        if let Some(dir) = self.output_dir.take() {
            config.output.directory = dir;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.no_write {
            config.output.write_results = false;
        }
    }
}

pub fn run(source: &ConfigSource, mut options: EvaluateOptions) -> Result<()> {
    let mut config = source.load()?;
    options.apply(&mut config);

    if config.evaluation.k_values.is_empty() {
        bail!("No k values to evaluate. Pass -k or set evaluation.k_values.");
    }

    let dataset = load_dataset(&options.input, &config)?;
    let evaluator = Evaluator::new(&dataset, config.evaluation_config())
        .with_context(|| format!("Cannot evaluate {}", options.input.file.display()))?;

    if config.output.write_results {
        std::fs::create_dir_all(&config.output.directory).with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output.directory.display()
            )
        })?;
    }

    let mut failed = Vec::new();
    for KEvaluation { k, outcome } in evaluator.evaluate_many(&config.evaluation.k_values) {
        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                print_error(&format!("k={k}: {e}"));
                failed.push(k);
                continue;
            }
        };

        render::print_report(&report, &dataset);

        if config.output.write_results {
            match write_report(&report, &config.output) {
                Ok(path) => {
                    println!();
                    print_success(&format!("Results written to {}", path.display()));
                }
                Err(e) => {
                    print_error(&format!("k={k}: {e:#}"));
                    failed.push(k);
                }
            }
        }
    }

    let total = config.evaluation.k_values.len();
    info!(evaluated = total - failed.len(), failed = failed.len(), "Run complete");

    if !failed.is_empty() {
        let list: Vec<String> = failed.iter().map(ToString::to_string).collect();
        bail!(
            "{} of {} k value(s) failed: {}",
            failed.len(),
            total,
            list.join(", ")
        );
    }
    Ok(())
}

fn write_report(report: &MetricReport, output: &OutputConfig) -> Result<PathBuf> {
    let path = output.result_path(report.k_value);
    let written = match output.format {
        OutputFormat::Csv => report.to_csv_file(&path),
        OutputFormat::Json => report.to_json_file(&path),
    };
    written.with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
