//! Classes command implementation.

use anyhow::{Context, Result};
use kanon::Evaluator;

use super::{ConfigSource, InputOptions, load_dataset, override_quasi_identifiers};
use crate::render;
use crate::style::colors::{self, SemanticStyle};
use crate::style::{print_hint, print_labeled, print_section};

pub fn run(
    source: &ConfigSource,
    input: &InputOptions,
    quasi_identifiers: Vec<String>,
    limit: usize,
) -> Result<()> {
    let mut config = source.load()?;
    override_quasi_identifiers(&mut config, quasi_identifiers);

    let dataset = load_dataset(input, &config)?;
    let evaluator = Evaluator::new(&dataset, config.evaluation_config())
        .with_context(|| format!("Cannot group {}", input.file.display()))?;
    let classes = evaluator.classes();
    let smallest = classes.smallest(limit);

    println!(
        "{}",
        format!(
            "{} equivalence classes over {} records",
            classes.len(),
            classes.record_count()
        )
        .header()
    );

    print_section(&format!("Smallest {} class(es)", smallest.len()));
    println!(
        "{}",
        render::classes_table(evaluator.quasi_identifiers(), &smallest)
    );
    if smallest.len() < classes.len() {
        print_hint(&format!(
            "{} more; raise --limit to see them",
            classes.len() - smallest.len()
        ));
    }

    print_section("Size distribution");
    println!("{}", render::distribution_table(&evaluator.metrics().classes));
    print_labeled(
        "Maximum re-identification risk",
        &colors::risk(evaluator.metrics().risk.max_risk),
    );

    Ok(())
}
