//! Routine validation: procedures, functions, and triggers.
//!
//! A routine missing from the target is an error: migrated code is gone.
//! A routine only in the target is usually deliberate (rewritten helpers,
//! compatibility shims), so its severity is configurable and defaults to
//! a warning. Body hash disagreement is a warning: equivalent logic gets
//! rewritten across dialects and will rarely hash identically.

use crate::config::ValidatorOptions;
use crate::core::schema::{CatalogSnapshot, RoutineDescriptor, RoutineKind};
use crate::diff::{align, compare_fields, FieldCheck};
use crate::report::{Finding, FindingCategory, FindingStatus, Severity};

pub fn validate(
    source: &CatalogSnapshot,
    target: &CatalogSnapshot,
    options: &ValidatorOptions,
) -> Vec<Finding> {
    let aligned = align(&source.routines, &target.routines);
    let mut findings = Vec::new();

    for key in &aligned.matched {
        let (Some(src), Some(tgt)) = (source.routines.get(*key), target.routines.get(*key))
        else {
            continue;
        };
        let category = category_for(key.2);
        let object = src.full_name();
        let deltas = routine_deltas(src, tgt);
        if deltas.is_empty() {
            findings.push(Finding::matched(category, object));
        } else {
            findings.push(Finding::mismatch(category, object, deltas));
        }
    }

    for key in &aligned.only_in_source {
        findings.push(Finding::missing(
            category_for(key.2),
            format!("{}.{}", key.0, key.1),
            FindingStatus::MissingInTarget,
            Severity::Error,
        ));
    }
    for key in &aligned.only_in_target {
        findings.push(Finding::missing(
            category_for(key.2),
            format!("{}.{}", key.0, key.1),
            FindingStatus::MissingInSource,
            options.routine_addition_severity,
        ));
    }

    findings
}

fn category_for(kind: RoutineKind) -> FindingCategory {
    match kind {
        RoutineKind::Procedure => FindingCategory::Procedure,
        RoutineKind::Function => FindingCategory::Function,
        RoutineKind::Trigger => FindingCategory::Trigger,
    }
}

fn routine_deltas(
    source: &RoutineDescriptor,
    target: &RoutineDescriptor,
) -> Vec<crate::report::FieldDelta> {
    let checks = vec![
        FieldCheck::on_value("signature", Severity::Error, |r: &RoutineDescriptor| {
            if r.signature.is_empty() {
                "()".to_string()
            } else {
                format!("({})", r.signature.join(", "))
            }
        }),
        FieldCheck::new(
            "body_hash",
            Severity::Warning,
            |r: &RoutineDescriptor| r.body_hash.clone().unwrap_or_else(|| "none".to_string()),
            // hashes only disagree when both sides actually have one
            |a, b| match (&a.body_hash, &b.body_hash) {
                (Some(x), Some(y)) => x == y,
                _ => true,
            },
        ),
    ];
    compare_fields(source, target, &checks)
}
