//! Text rendering of evaluation results.

use comfy_table::Table;
use kanon::metrics::{ClassStatistics, InformationLoss};
use kanon::{Dataset, EquivalenceClass, MetricReport};

use crate::style::colors::{self, SemanticStyle};
use crate::style::{
    data_table, print_failure, print_info_table, print_section, print_success, print_warn,
};

/// Prints the full report for one threshold.
pub fn print_report(report: &MetricReport, dataset: &Dataset) {
    let ec = &report.equivalence_class_metrics;

    println!();
    println!(
        "{}",
        format!("k-Anonymity Evaluation (k = {})", report.k_value).header()
    );
    if report.satisfies_k_anonymity {
        print_success(&format!(
            "Dataset satisfies {}-anonymity",
            report.k_value
        ));
    } else {
        print_failure(&format!(
            "Dataset does NOT satisfy {}-anonymity (short by {} record(s))",
            report.k_value, report.verdict.deficit
        ));
    }

    print_section("Dataset Overview");
    print_info_table(&[
        ("Records", report.num_records.to_string()),
        ("Attributes", dataset.column_count().to_string()),
        ("Quasi-identifiers", quasi_identifier_list(&report.quasi_identifiers)),
    ]);

    print_section("Privacy Metrics");
    print_info_table(&[
        ("Maximum re-identification risk", colors::risk(report.risks.max_risk)),
        ("Average re-identification risk", colors::risk(report.risks.avg_risk)),
    ]);

    print_section("Equivalence Classes");
    print_info_table(&[
        ("Classes", ec.num_classes.to_string()),
        ("Minimum size", ec.min_size.to_string()),
        ("Maximum size", ec.max_size.to_string()),
        ("Average size", format!("{:.2}", ec.avg_size)),
        ("Size variance", format!("{:.2}", ec.size_variance)),
        (
            "Unique records",
            format!("{} ({:.2}%)", ec.unique_records, ec.unique_records_percentage),
        ),
    ]);
    println!("{}", distribution_table(ec));

    print_section("Information Loss");
    if report.information_loss.columns.is_empty() {
        println!("{}", "No quasi-identifiers; nothing to measure.".muted());
    } else {
        println!("{}", loss_table(&report.information_loss));
    }
    println!(
        "  {}: {:.2}%",
        "Average loss".muted(),
        report.information_loss.average_loss
    );

    print_section("Suppression");
    println!(
        "  {} of {} cells suppressed ({:.2}%)",
        report.suppression.suppressed_cells,
        report.suppression.total_cells,
        report.suppression.percentage
    );

    print_section("Discernibility");
    println!("  {}", report.discernibility_metric);

    print_section("Recommendations");
    let advisories = report.verdict.advisories();
    if advisories.is_empty() {
        print_success("No issues found");
    } else {
        for advisory in &advisories {
            print_warn(advisory);
        }
    }
}

/// Class size histogram: how many classes have each size.
pub fn distribution_table(stats: &ClassStatistics) -> Table {
    let rows: Vec<Vec<String>> = stats
        .size_distribution
        .iter()
        .map(|(&size, &count)| {
            vec![
                size.to_string(),
                count.to_string(),
                (size * count).to_string(),
            ]
        })
        .collect();
    data_table(&["Class size", "Classes", "Records"], &rows)
}

/// Per-attribute information loss.
pub fn loss_table(loss: &InformationLoss) -> Table {
    let rows: Vec<Vec<String>> = loss
        .columns
        .iter()
        .map(|c| {
            vec![
                c.column.clone(),
                c.distinct_values.to_string(),
                format!("{:.2}%", c.asterisk_percentage),
                format!("{:.2}%", c.generalized_percentage),
                format!("{:.2}%", c.total_loss_percentage),
            ]
        })
        .collect();
    data_table(
        &["Attribute", "Distinct", "Suppressed", "Generalized", "Total loss"],
        &rows,
    )
}

/// Smallest classes with their key, size and risk.
pub fn classes_table(quasi_identifiers: &[String], classes: &[&EquivalenceClass]) -> Table {
    let header = format!("Key ({})", quasi_identifiers.join(", "));
    let rows: Vec<Vec<String>> = classes
        .iter()
        .map(|class| {
            vec![
                class.key.to_string(),
                class.size().to_string(),
                format!("{:.2}%", class.risk() * 100.0),
            ]
        })
        .collect();
    data_table(&[header.as_str(), "Size", "Risk"], &rows)
}

fn quasi_identifier_list(quasi_identifiers: &[String]) -> String {
    if quasi_identifiers.is_empty() {
        "(none)".to_string()
    } else {
        quasi_identifiers.join(", ")
    }
}
