//! Property-based tests for the audit pipeline.
//!
//! These tests use proptest to generate random tables and verify that the
//! rule pass, fallback summary and auto-fix keep their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p datasight --test property_tests
//! ```

use proptest::prelude::*;

use datasight::audit::{column_mode, fallback_summary};
use datasight::llm::GenerationFailure;
use datasight::{Auditor, DataTable, Metadata, MockProvider, RuleAuditor};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cell values: short tokens with a good chance of being missing.
fn cell() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        3 => "[a-z0-9]{1,4}".prop_map(Some),
    ]
}

/// Header names from a tiny alphabet, so repeats are common.
fn header() -> impl Strategy<Value = String> {
    prop_oneof![Just("A".to_string()), Just("B".to_string()), Just("A.1".to_string())]
}

/// Tables with 1-4 columns (names may repeat) and 0-12 rows.
fn table() -> impl Strategy<Value = DataTable> {
    (1usize..5).prop_flat_map(|width| {
        (
            proptest::collection::vec(header(), width),
            proptest::collection::vec(proptest::collection::vec(cell(), width), 0..12),
        )
            .prop_map(|(headers, rows)| DataTable::new(headers, rows))
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn null_counts_match_table(table in table()) {
        let metadata = Metadata::from_table(&table);
        for (idx, name) in table.headers.iter().enumerate() {
            prop_assert_eq!(metadata.null_count(name), table.null_count(idx));
        }
    }

    #[test]
    fn metadata_keys_match_columns(table in table()) {
        let metadata = Metadata::from_table(&table);

        prop_assert_eq!(metadata.columns.len(), table.column_count());
        let counted: Vec<&String> = metadata.null_counts.keys().collect();
        let previewed: Vec<&String> = metadata.head.keys().collect();
        let columns: Vec<&String> = metadata.columns.iter().collect();
        prop_assert_eq!(&counted, &columns);
        prop_assert_eq!(&previewed, &columns);
    }

    #[test]
    fn one_finding_per_column_with_nulls(table in table()) {
        let metadata = Metadata::from_table(&table);
        let findings = RuleAuditor::audit(&metadata);

        let expected: Vec<&String> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| table.null_count(*idx) > 0)
            .map(|(_, name)| name)
            .collect();
        let actual: Vec<&String> = findings.iter().map(|f| &f.column).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn mode_is_an_observed_value(values in proptest::collection::vec(cell(), 0..20)) {
        let mode = column_mode(values.iter().map(|v| v.as_deref()));
        match mode {
            Some(m) => prop_assert!(values.iter().any(|v| v.as_deref() == Some(m.as_str()))),
            None => prop_assert!(values.iter().all(Option::is_none)),
        }
    }

    #[test]
    fn fallback_always_has_prefix(table in table(), reasons in proptest::collection::vec("[a-z]{1,8}", 0..3)) {
        let findings = RuleAuditor::audit(&Metadata::from_table(&table));
        let summary = fallback_summary(&findings, &reasons);

        prop_assert!(summary.starts_with("ai summary unavailable. rule-based findings: "));
        prop_assert_eq!(summary.contains("\nreasons:\n"), !reasons.is_empty());
    }

    #[test]
    fn failing_models_never_error(table in table()) {
        let auditor = Auditor::new()
            .with_llm(MockProvider::new().with_failure("m", GenerationFailure::api(429, "quota")))
            .with_candidates(vec!["m".to_string()]);

        let result = auditor.audit(&table);
        prop_assert!(result.used_fallback());
        prop_assert_eq!(result.failures.len(), 1);
    }

    #[test]
    fn auto_fix_leaves_no_missing_cells(mut table in table()) {
        let before = table.clone();
        let result = Auditor::new().audit_and_fix(&mut table).unwrap();

        for idx in 0..table.column_count() {
            prop_assert_eq!(table.null_count(idx), 0);
        }
        prop_assert_eq!(table.row_count(), before.row_count());

        let filled: usize = (0..before.column_count()).map(|i| before.null_count(i)).sum();
        prop_assert_eq!(result.fixes.unwrap().cells_filled, filled);
    }
}
