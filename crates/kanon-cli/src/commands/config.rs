//! Configuration management commands.

use anyhow::{Result, bail};
use kanon_config::{Paths, read_config_file};

use super::ConfigSource;
use crate::style::colors::SemanticStyle;
use crate::style::{print_failure, print_hint, print_labeled, print_section, print_success};

/// Show current configuration.
pub fn show(source: &ConfigSource, format: &str) -> Result<()> {
    let config = source.load()?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        "toml" => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        "text" => {
            println!("{}", "kanon Configuration".header());

            print_section("Evaluation");
            let k_values: Vec<String> = config
                .evaluation
                .k_values
                .iter()
                .map(ToString::to_string)
                .collect();
            print_labeled("k values", &k_values.join(", "));
            let quasi_identifiers = if config.evaluation.quasi_identifiers.is_empty() {
                "auto-detect".to_string()
            } else {
                config.evaluation.quasi_identifiers.join(", ")
            };
            print_labeled("Quasi-identifiers", &quasi_identifiers);

            print_section("Markers");
            print_labeled("Full suppression", &config.markers.full_suppression);
            print_labeled(
                "Partial generalization",
                &config.markers.partial_generalization,
            );

            print_section("Input");
            print_labeled("Delimiter", &format!("{:?}", config.input.delimiter));
            print_labeled("Header row", &config.input.has_header.to_string());

            print_section("Output");
            print_labeled("Directory", &config.output.directory.display().to_string());
            print_labeled("Format", config.output.format.extension());
            print_labeled("Write results", &config.output.write_results.to_string());
            print_labeled("File prefix", &config.output.file_prefix);
        }
        other => bail!("Unknown format '{other}'. Use text, json or toml."),
    }

    Ok(())
}

/// Validate configuration files.
pub fn validate(source: &ConfigSource) -> Result<()> {
    println!(
        "Validating configuration in {}...",
        source.project.display()
    );

    if !Paths::new(&source.project).has_project_config() {
        print_hint("No kanon.toml found; built-in defaults apply");
    }
    for file in source.loader().sources() {
        print_labeled("Source", &file.display().to_string());
        // Each file must parse on its own before layering
        if let Err(e) = read_config_file(&file) {
            print_failure("Configuration validation failed:");
            println!("  {e}");
            return Err(e.into());
        }
    }

    match source.load() {
        Ok(_) => {
            print_success("Configuration is valid");
            Ok(())
        }
        Err(e) => {
            print_failure("Configuration validation failed:");
            println!("  {e:#}");
            Err(e)
        }
    }
}
