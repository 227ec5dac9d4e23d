//! Generic alignment and field comparison used by every validator.

use std::collections::{BTreeMap, BTreeSet};

use crate::report::{FieldDelta, Severity};

/// Result of aligning two keyed object sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<K> {
    pub matched: Vec<K>,
    pub only_in_source: Vec<K>,
    pub only_in_target: Vec<K>,
}

/// Align two maps by key. All three output lists come back sorted, so
/// downstream findings are deterministic regardless of input order.
pub fn align<'a, K, V>(
    source: &'a BTreeMap<K, V>,
    target: &'a BTreeMap<K, V>,
) -> Alignment<&'a K>
where
    K: Ord,
{
    let source_keys: BTreeSet<&K> = source.keys().collect();
    let target_keys: BTreeSet<&K> = target.keys().collect();
    Alignment {
        matched: source_keys.intersection(&target_keys).copied().collect(),
        only_in_source: source_keys.difference(&target_keys).copied().collect(),
        only_in_target: target_keys.difference(&source_keys).copied().collect(),
    }
}

/// One field-level check: how to render the field on each side, how to
/// decide equality, and how severe a disagreement is.
pub struct FieldCheck<'c, T> {
    pub field: &'static str,
    pub severity: Severity,
    pub render: Box<dyn Fn(&T) -> String + 'c>,
    pub eq: Box<dyn Fn(&T, &T) -> bool + 'c>,
}

impl<'c, T> FieldCheck<'c, T> {
    pub fn new(
        field: &'static str,
        severity: Severity,
        render: impl Fn(&T) -> String + 'c,
        eq: impl Fn(&T, &T) -> bool + 'c,
    ) -> Self {
        FieldCheck {
            field,
            severity,
            render: Box::new(render),
            eq: Box::new(eq),
        }
    }

    /// Check on a single rendered value: equal when the renderings match.
    pub fn on_value(
        field: &'static str,
        severity: Severity,
        render: impl Fn(&T) -> String + Clone + 'c,
    ) -> Self {
        let eq_render = render.clone();
        FieldCheck::new(field, severity, render, move |a, b| {
            eq_render(a) == eq_render(b)
        })
    }
}

/// Run a list of field checks over a matched object pair, collecting a
/// delta for each disagreement.
pub fn compare_fields<T>(source: &T, target: &T, checks: &[FieldCheck<'_, T>]) -> Vec<FieldDelta> {
    let mut deltas = Vec::new();
    for check in checks {
        if !(check.eq)(source, target) {
            deltas.push(FieldDelta {
                field: check.field.to_string(),
                source_value: (check.render)(source),
                target_value: (check.render)(target),
                severity: check.severity,
            });
        }
    }
    deltas
}
