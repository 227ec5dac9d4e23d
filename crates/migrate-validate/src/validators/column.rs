//! Column validation: structure and type fidelity for matched tables.
//!
//! Tables present on only one side are already reported by the row count
//! validator, so this one walks matched tables only.

use crate::config::ValidatorOptions;
use crate::core::schema::{CatalogSnapshot, ColumnDescriptor};
use crate::diff::{align, compare_fields, FieldCheck};
use crate::report::{Finding, FindingCategory, FindingStatus, Severity};
use crate::typemap::{type_compat, TypeCompat};

pub fn validate(
    source: &CatalogSnapshot,
    target: &CatalogSnapshot,
    options: &ValidatorOptions,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let aligned = align(&source.tables, &target.tables);

    for key in &aligned.matched {
        let (Some(src), Some(tgt)) = (source.tables.get(*key), target.tables.get(*key)) else {
            continue;
        };

        let src_cols: std::collections::BTreeMap<&str, &ColumnDescriptor> =
            src.columns.iter().map(|c| (c.name.as_str(), c)).collect();
        let tgt_cols: std::collections::BTreeMap<&str, &ColumnDescriptor> =
            tgt.columns.iter().map(|c| (c.name.as_str(), c)).collect();
        let cols = align(&src_cols, &tgt_cols);

        for name in &cols.matched {
            let (Some(&sc), Some(&tc)) = (src_cols.get(**name), tgt_cols.get(**name)) else {
                continue;
            };
            let object = format!("{}.{}", src.full_name(), name);
            let deltas = column_deltas(sc, tc, options);
            if deltas.is_empty() {
                findings.push(Finding::matched(FindingCategory::Column, object));
            } else {
                findings.push(Finding::mismatch(FindingCategory::Column, object, deltas));
            }
        }
        for name in &cols.only_in_source {
            findings.push(Finding::missing(
                FindingCategory::Column,
                format!("{}.{}", src.full_name(), name),
                FindingStatus::MissingInTarget,
                Severity::Error,
            ));
        }
        for name in &cols.only_in_target {
            findings.push(Finding::missing(
                FindingCategory::Column,
                format!("{}.{}", tgt.full_name(), name),
                FindingStatus::MissingInSource,
                Severity::Error,
            ));
        }
    }

    findings
}

fn column_deltas(
    source: &ColumnDescriptor,
    target: &ColumnDescriptor,
    options: &ValidatorOptions,
) -> Vec<crate::report::FieldDelta> {
    let tolerance = options.decimal_precision_tolerance;
    let checks = vec![
        FieldCheck::new(
            "data_type",
            Severity::Error,
            |c: &ColumnDescriptor| c.data_type.to_string(),
            move |a, b| {
                type_compat(&a.data_type, &b.data_type, tolerance) != TypeCompat::Incompatible
            },
        ),
        FieldCheck::new(
            "type_length",
            Severity::Warning,
            |c: &ColumnDescriptor| c.data_type.to_string(),
            move |a, b| {
                type_compat(&a.data_type, &b.data_type, tolerance) != TypeCompat::LengthDiffers
            },
        ),
        FieldCheck::on_value("nullable", Severity::Error, |c: &ColumnDescriptor| {
            c.nullable.to_string()
        }),
        FieldCheck::on_value("default", Severity::Warning, |c: &ColumnDescriptor| {
            c.default.clone().unwrap_or_else(|| "none".to_string())
        }),
        FieldCheck::on_value("ordinal", Severity::Warning, |c: &ColumnDescriptor| {
            c.ordinal.to_string()
        }),
    ];
    compare_fields(source, target, &checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{CanonicalType, TypeFamily};
    use crate::validators::fixtures::{column, snapshot, table};

    fn opts() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    #[test]
    fn test_identical_columns_match() {
        let src = snapshot(vec![table("S", "T", vec![column("ID", 1, TypeFamily::Integer, "int")])]);
        let tgt = snapshot(vec![table("S", "T", vec![column("ID", 1, TypeFamily::Integer, "int4")])]);
        let findings = validate(&src, &tgt, &opts());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].status, FindingStatus::Match);
        assert_eq!(findings[0].object, "S.T.ID");
    }

    #[test]
    fn test_family_mismatch_is_error() {
        let src = snapshot(vec![table("S", "T", vec![column("C", 1, TypeFamily::Integer, "int")])]);
        let tgt = snapshot(vec![table("S", "T", vec![column("C", 1, TypeFamily::String, "text")])]);
        let findings = validate(&src, &tgt, &opts());
        assert_eq!(findings[0].status, FindingStatus::Mismatch);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].deltas[0].field, "data_type");
    }

    #[test]
    fn test_length_difference_is_warning() {
        let mut a = column("C", 1, TypeFamily::String, "varchar2");
        a.data_type = CanonicalType::new(TypeFamily::String, "varchar2").with_length(Some(100));
        let mut b = column("C", 1, TypeFamily::String, "varchar");
        b.data_type = CanonicalType::new(TypeFamily::String, "varchar").with_length(Some(200));
        let src = snapshot(vec![table("S", "T", vec![a])]);
        let tgt = snapshot(vec![table("S", "T", vec![b])]);
        let findings = validate(&src, &tgt, &opts());
        assert_eq!(findings[0].status, FindingStatus::Mismatch);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].deltas[0].field, "type_length");
    }

    #[test]
    fn test_nullability_flip_is_error() {
        let a = column("C", 1, TypeFamily::Integer, "int");
        let mut b = column("C", 1, TypeFamily::Integer, "int");
        b.nullable = false;
        let src = snapshot(vec![table("S", "T", vec![a])]);
        let tgt = snapshot(vec![table("S", "T", vec![b])]);
        let findings = validate(&src, &tgt, &opts());
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].deltas[0].field, "nullable");
    }

    #[test]
    fn test_ordinal_shift_is_warning() {
        let a = column("C", 1, TypeFamily::Integer, "int");
        let b = column("C", 2, TypeFamily::Integer, "int");
        let src = snapshot(vec![table("S", "T", vec![a])]);
        let tgt = snapshot(vec![table("S", "T", vec![b])]);
        let findings = validate(&src, &tgt, &opts());
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].deltas[0].field, "ordinal");
    }

    #[test]
    fn test_missing_column_is_error() {
        let src = snapshot(vec![table(
            "S",
            "T",
            vec![
                column("A", 1, TypeFamily::Integer, "int"),
                column("B", 2, TypeFamily::Integer, "int"),
            ],
        )]);
        let tgt = snapshot(vec![table("S", "T", vec![column("A", 1, TypeFamily::Integer, "int")])]);
        let findings = validate(&src, &tgt, &opts());
        let missing: Vec<_> = findings
            .iter()
            .filter(|f| f.status == FindingStatus::MissingInTarget)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].object, "S.T.B");
        assert_eq!(missing[0].severity, Severity::Error);
    }

    #[test]
    fn test_unmatched_tables_skipped() {
        let src = snapshot(vec![table("S", "ONLY", vec![column("A", 1, TypeFamily::Integer, "int")])]);
        let tgt = snapshot(vec![]);
        assert!(validate(&src, &tgt, &opts()).is_empty());
    }
}
