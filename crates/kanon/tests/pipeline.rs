//! End-to-end checks of the evaluation pipeline: the worked scenarios plus
//! property tests over randomly generated anonymized tables.

use std::collections::HashSet;

use kanon::{
    Dataset, EquivalenceClasses, EvaluationConfig, Evaluator, KanonError, Markers, classify,
    evaluate,
};
use proptest::prelude::*;

fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
    Dataset::new(
        columns.iter().map(|s| (*s).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|s| (*s).to_string()).collect())
            .collect(),
    )
    .expect("well-formed test dataset")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn two_classes_of_two_and_three() {
    let data = dataset(
        &["qi", "name"],
        &[
            &["A", "*"],
            &["A", "*"],
            &["B", "*"],
            &["B", "*"],
            &["B", "*"],
        ],
    );

    let report = evaluate(&data, EvaluationConfig::default(), 2).unwrap();
    let ec = &report.equivalence_class_metrics;

    assert_eq!(report.quasi_identifiers, vec!["qi"]);
    assert_eq!(ec.num_classes, 2);
    assert_eq!(ec.size_distribution.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(ec.min_size, 2);
    assert!((ec.avg_size - 2.5).abs() < 1e-12);
    assert_eq!(report.discernibility_metric, 13);
    assert_eq!(ec.unique_records, 0);
    assert!(report.satisfies_k_anonymity);
    assert_eq!(report.record_k_values, vec![2, 2, 3, 3, 3]);
}

#[test]
fn all_distinct_records_fail_k_two() {
    let data = dataset(&["qi"], &[&["A"], &["B"], &["C"]]);

    let report = evaluate(&data, EvaluationConfig::default(), 2).unwrap();
    let ec = &report.equivalence_class_metrics;

    assert_eq!(ec.num_classes, 3);
    assert!(ec.size_distribution.keys().all(|&size| size == 1));
    assert_eq!(ec.unique_records, 3);
    assert!((ec.unique_records_percentage - 100.0).abs() < 1e-12);
    assert!((report.risks.max_risk - 1.0).abs() < f64::EPSILON);
    assert!(!report.satisfies_k_anonymity);
    assert!(report.verdict.high_risk);
    assert!(report.verdict.has_unique_records);
}

#[test]
fn half_suppressed_column_loses_fifty_percent() {
    let data = dataset(&["zip"], &[&["*"], &["90210"], &["*"], &["10001"]]);

    let report = evaluate(&data, EvaluationConfig::default(), 1).unwrap();
    let zip = report.information_loss.column("zip").unwrap();

    assert!((zip.asterisk_percentage - 50.0).abs() < 1e-12);
}

#[test]
fn constant_quasi_identifiers_form_one_class() {
    let data = dataset(
        &["age", "zip"],
        &[&["20-29", "902**"], &["20-29", "902**"], &["20-29", "902**"]],
    );
    let report = evaluate(&data, EvaluationConfig::default(), 3).unwrap();
    assert_eq!(report.equivalence_class_metrics.num_classes, 1);
    assert!(report.satisfies_k_anonymity);
}

#[test]
fn fully_suppressed_table_forms_one_empty_key_class() {
    let data = dataset(&["name", "ssn"], &[&["*", "*"], &["*", "*"], &["*", "*"]]);

    let evaluator = Evaluator::new(&data, EvaluationConfig::default()).unwrap();
    assert!(evaluator.quasi_identifiers().is_empty());
    assert_eq!(evaluator.classes().len(), 1);
    assert!(evaluator.classes().classes()[0].key.is_empty());

    let report = evaluator.evaluate(3).unwrap();
    assert_eq!(report.equivalence_class_metrics.num_classes, 1);
    assert!(report.information_loss.average_loss.abs() < f64::EPSILON);
    assert!((report.suppression.ratio - 1.0).abs() < f64::EPSILON);
}

#[test]
fn custom_markers_flow_through_every_stage() {
    let data = dataset(
        &["age", "zip", "name"],
        &[
            &["20-29", "902xx", "-"],
            &["20-29", "902xx", "-"],
            &["-", "90210", "-"],
        ],
    );
    let config = EvaluationConfig::default().with_markers(Markers::new("-", "xx").unwrap());

    let report = evaluate(&data, config, 1).unwrap();
    assert_eq!(report.quasi_identifiers, vec!["age", "zip"]);

    let zip = report.information_loss.column("zip").unwrap();
    assert_eq!(zip.generalized_count, 2);
    let age = report.information_loss.column("age").unwrap();
    assert_eq!(age.suppressed_count, 1);
    assert_eq!(report.suppression.suppressed_cells, 4);
}

#[test]
fn unknown_override_column_is_invalid_input() {
    let data = dataset(&["age"], &[&["1"]]);
    let config = EvaluationConfig::default().with_quasi_identifiers(["zip"]);

    let err = Evaluator::new(&data, config).unwrap_err();
    assert!(matches!(err, KanonError::InvalidInput { .. }));
    assert!(err.to_string().contains("zip"));
}

#[test]
fn batch_over_k_values() {
    let data = dataset(
        &["qi"],
        &[&["A"], &["A"], &["A"], &["B"], &["B"], &["B"], &["B"]],
    );
    let evaluator = Evaluator::new(&data, EvaluationConfig::default()).unwrap();

    let verdicts: Vec<Option<bool>> = evaluator
        .evaluate_many(&[2, 3, 4, 0])
        .into_iter()
        .map(|e| e.outcome.ok().map(|r| r.satisfies_k_anonymity))
        .collect();

    assert_eq!(verdicts, vec![Some(true), Some(true), Some(false), None]);
}

// ============================================================================
// Properties
// ============================================================================

/// Small alphabets so that equivalence classes of size > 1 are common.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[ab]".prop_map(String::from),
        1 => Just("*".to_string()),
        1 => Just("a**".to_string()),
    ]
}

fn table() -> impl Strategy<Value = Dataset> {
    (1usize..=4, 1usize..=40).prop_flat_map(|(columns, records)| {
        prop::collection::vec(prop::collection::vec(cell(), columns), records).prop_map(
            move |rows| {
                let names = (0..columns).map(|i| format!("c{i}")).collect();
                Dataset::new(names, rows).expect("generated rows are rectangular")
            },
        )
    })
}

proptest! {
    #[test]
    fn class_sizes_sum_to_record_count(data in table()) {
        let qis = classify(&data, &Markers::default());
        let classes = EquivalenceClasses::build(&data, &qis).unwrap();

        prop_assert_eq!(classes.sizes().sum::<usize>(), data.len());

        let mut members: Vec<usize> = classes
            .classes()
            .iter()
            .flat_map(|c| c.members.iter().copied())
            .collect();
        members.sort_unstable();
        prop_assert_eq!(members, (0..data.len()).collect::<Vec<_>>());
    }

    #[test]
    fn class_count_equals_distinct_tuples(data in table()) {
        let qis = classify(&data, &Markers::default());
        let indices: Vec<usize> = qis.iter().map(|q| data.column_index(q).unwrap()).collect();
        let distinct: HashSet<Vec<&str>> = data
            .rows()
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].as_str()).collect())
            .collect();

        let report = evaluate(&data, EvaluationConfig::default(), 1).unwrap();
        prop_assert_eq!(report.equivalence_class_metrics.num_classes, distinct.len());
    }

    #[test]
    fn risk_is_inverse_size_and_bounded(data in table()) {
        let evaluator = Evaluator::new(&data, EvaluationConfig::default()).unwrap();
        let risks = &evaluator.metrics().risk.risks;

        for (class, &risk) in evaluator.classes().classes().iter().zip(risks) {
            prop_assert!(risk > 0.0 && risk <= 1.0);
            prop_assert!((risk - 1.0 / class.size() as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn statistics_agree_with_size_multiset(data in table()) {
        let evaluator = Evaluator::new(&data, EvaluationConfig::default()).unwrap();
        let stats = &evaluator.metrics().classes;
        let sizes: Vec<usize> = evaluator.classes().sizes().collect();

        prop_assert_eq!(stats.num_classes, sizes.len());
        prop_assert_eq!(stats.min_size, *sizes.iter().min().unwrap());
        prop_assert_eq!(stats.max_size, *sizes.iter().max().unwrap());
        prop_assert_eq!(stats.size_distribution.values().sum::<usize>(), sizes.len());
        prop_assert!(stats.min_size as f64 <= stats.avg_size + 1e-12);
        prop_assert!(stats.avg_size <= stats.max_size as f64 + 1e-12);
        prop_assert_eq!(
            evaluator.metrics().discernibility,
            sizes.iter().map(|&s| (s * s) as u64).sum::<u64>()
        );
    }

    #[test]
    fn verdict_iff_min_size_at_least_k(data in table(), k in 1i64..=10) {
        let report = evaluate(&data, EvaluationConfig::default(), k).unwrap();
        prop_assert_eq!(
            report.satisfies_k_anonymity,
            report.equivalence_class_metrics.min_size as i64 >= k
        );
    }

    #[test]
    fn evaluation_is_deterministic(data in table(), k in 1i64..=5) {
        let first = evaluate(&data, EvaluationConfig::default(), k).unwrap();
        let second = evaluate(&data, EvaluationConfig::default(), k).unwrap();

        prop_assert_eq!(first.quasi_identifiers, second.quasi_identifiers);
        prop_assert_eq!(first.risks, second.risks);
        prop_assert_eq!(first.equivalence_class_metrics, second.equivalence_class_metrics);
        prop_assert_eq!(first.information_loss, second.information_loss);
        prop_assert_eq!(first.suppression, second.suppression);
        prop_assert_eq!(first.discernibility_metric, second.discernibility_metric);
        prop_assert_eq!(first.record_k_values, second.record_k_values);
        prop_assert_eq!(first.verdict, second.verdict);
    }
}
