//! Constraint validation.
//!
//! Constraint names are system-generated on most engines and never survive
//! a migration, so constraints are identified by what they do: the tuple
//! (schema, table, kind, ordered column list). Structural constraints
//! (primary key, foreign key, unique) missing on either side are errors;
//! advisory ones (check, not null) degrade to warnings.

use std::collections::BTreeMap;

use crate::config::ValidatorOptions;
use crate::core::schema::{CatalogSnapshot, ConstraintDescriptor, ConstraintKind};
use crate::diff::{align, compare_fields, FieldCheck};
use crate::report::{Finding, FindingCategory, FindingStatus, Severity};

type ConstraintKey = (String, String, ConstraintKind, Vec<String>);

pub fn validate(
    source: &CatalogSnapshot,
    target: &CatalogSnapshot,
    _options: &ValidatorOptions,
) -> Vec<Finding> {
    let src = collect(source);
    let tgt = collect(target);
    let aligned = align(&src, &tgt);
    let mut findings = Vec::new();

    for key in &aligned.matched {
        let (Some(&sc), Some(&tc)) = (src.get(*key), tgt.get(*key)) else {
            continue;
        };
        let object = describe(key);
        let deltas = constraint_deltas(sc, tc);
        if deltas.is_empty() {
            findings.push(Finding::matched(FindingCategory::Constraint, object));
        } else {
            findings.push(Finding::mismatch(FindingCategory::Constraint, object, deltas));
        }
    }

    for key in &aligned.only_in_source {
        findings.push(
            Finding::missing(
                FindingCategory::Constraint,
                describe(key),
                FindingStatus::MissingInTarget,
                missing_severity(key.2),
            )
            .with_note(format!("source name: {}", src[*key].name)),
        );
    }
    for key in &aligned.only_in_target {
        findings.push(
            Finding::missing(
                FindingCategory::Constraint,
                describe(key),
                FindingStatus::MissingInSource,
                missing_severity(key.2),
            )
            .with_note(format!("target name: {}", tgt[*key].name)),
        );
    }

    findings
}

fn collect(snapshot: &CatalogSnapshot) -> BTreeMap<ConstraintKey, &ConstraintDescriptor> {
    let mut map = BTreeMap::new();
    for table in snapshot.tables.values() {
        for constraint in &table.constraints {
            let key = (
                table.schema.clone(),
                table.name.clone(),
                constraint.kind,
                constraint.columns.clone(),
            );
            map.insert(key, constraint);
        }
    }
    map
}

fn describe(key: &ConstraintKey) -> String {
    format!("{}.{} {} ({})", key.0, key.1, key.2, key.3.join(", "))
}

/// Constraints the target engine enforces structurally must exist there.
fn missing_severity(kind: ConstraintKind) -> Severity {
    match kind {
        ConstraintKind::PrimaryKey | ConstraintKind::ForeignKey | ConstraintKind::Unique => {
            Severity::Error
        }
        ConstraintKind::Check | ConstraintKind::NotNull => Severity::Warning,
    }
}

fn constraint_deltas(
    source: &ConstraintDescriptor,
    target: &ConstraintDescriptor,
) -> Vec<crate::report::FieldDelta> {
    let checks = vec![
        FieldCheck::on_value("references", Severity::Error, |c: &ConstraintDescriptor| {
            c.references.as_ref().map_or("none".to_string(), |r| {
                format!("{}.{} ({})", r.schema, r.table, r.columns.join(", "))
            })
        }),
        FieldCheck::on_value("check_expr", Severity::Warning, |c: &ConstraintDescriptor| {
            c.check_expr.clone().unwrap_or_else(|| "none".to_string())
        }),
    ];
    compare_fields(source, target, &checks)
}
