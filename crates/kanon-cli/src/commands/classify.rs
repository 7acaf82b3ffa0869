//! Classify command implementation.

use anyhow::Result;
use kanon::classifier::column_profiles;

use super::{ConfigSource, InputOptions, load_dataset};
use crate::style::colors::SemanticStyle;
use crate::style::{data_table, print_warn};

pub fn run(source: &ConfigSource, input: &InputOptions) -> Result<()> {
    let config = source.load()?;
    let dataset = load_dataset(input, &config)?;
    let profiles = column_profiles(&dataset, &config.markers());

    let rows: Vec<Vec<String>> = profiles
        .iter()
        .map(|p| {
            let role = if p.is_quasi_identifier {
                "quasi-identifier".success()
            } else {
                "suppressed".muted()
            };
            vec![
                p.name.code(),
                role,
                p.original.to_string(),
                p.generalized.to_string(),
                p.suppressed.to_string(),
            ]
        })
        .collect();

    println!(
        "{}",
        format!(
            "{} ({} records, {} columns)",
            input.file.display(),
            dataset.len(),
            dataset.column_count()
        )
        .header()
    );
    println!(
        "{}",
        data_table(
            &["Column", "Role", "Original", "Generalized", "Suppressed"],
            &rows
        )
    );

    let quasi_identifiers: Vec<&str> = profiles
        .iter()
        .filter(|p| p.is_quasi_identifier)
        .map(|p| p.name.as_str())
        .collect();
    if quasi_identifiers.is_empty() {
        print_warn("Every column is fully suppressed; all records form one equivalence class.");
    } else {
        println!(
            "{} quasi-identifier(s): {}",
            quasi_identifiers.len(),
            quasi_identifiers.join(", ")
        );
    }

    Ok(())
}
