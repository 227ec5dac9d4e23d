//! Findings, severities, and report aggregation.
//!
//! Validators emit flat [`Finding`] lists in whatever order they walk the
//! catalogs; [`aggregate`] sorts them canonically and rolls up the summary,
//! so the final result is identical no matter how the findings arrived.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How serious a delta or finding is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[serde(alias = "info")]
    Info,
    #[serde(alias = "warning")]
    Warning,
    #[serde(alias = "error")]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Outcome of one compared object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingStatus {
    Match,
    Mismatch,
    MissingInSource,
    MissingInTarget,
}

/// Which validator a finding came from, and which report sheet it lands on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCategory {
    RowCount,
    Column,
    Constraint,
    Procedure,
    Function,
    Trigger,
}

impl FindingCategory {
    pub fn sheet_name(&self) -> &'static str {
        match self {
            FindingCategory::RowCount => "RowCounts",
            FindingCategory::Column => "ColumnValidation",
            FindingCategory::Constraint => "Constraints",
            FindingCategory::Procedure => "Procedures",
            FindingCategory::Function => "Functions",
            FindingCategory::Trigger => "Triggers",
        }
    }
}

/// One field that disagreed between the two sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub field: String,
    pub source_value: String,
    pub target_value: String,
    pub severity: Severity,
}

/// One validated object and its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    /// Qualified object name, e.g. `HR.EMPLOYEES` or `HR.EMPLOYEES.SALARY`.
    pub object: String,
    pub status: FindingStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deltas: Vec<FieldDelta>,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Finding {
    pub fn matched(category: FindingCategory, object: impl Into<String>) -> Self {
        Finding {
            category,
            object: object.into(),
            status: FindingStatus::Match,
            deltas: Vec::new(),
            severity: Severity::Info,
            note: None,
        }
    }

    /// Mismatch finding; overall severity is the worst delta severity.
    pub fn mismatch(
        category: FindingCategory,
        object: impl Into<String>,
        deltas: Vec<FieldDelta>,
    ) -> Self {
        let severity = deltas
            .iter()
            .map(|d| d.severity)
            .max()
            .unwrap_or(Severity::Warning);
        Finding {
            category,
            object: object.into(),
            status: FindingStatus::Mismatch,
            deltas,
            severity,
            note: None,
        }
    }

    pub fn missing(
        category: FindingCategory,
        object: impl Into<String>,
        status: FindingStatus,
        severity: Severity,
    ) -> Self {
        Finding {
            category,
            object: object.into(),
            status,
            deltas: Vec::new(),
            severity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Downgrade a match's implicit INFO severity, e.g. a match that could
    /// not actually be verified.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Per-category roll-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub missing: usize,
}

/// Overall verdict of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overall {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl std::fmt::Display for Overall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Overall::Pass => write!(f, "PASS"),
            Overall::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub categories: BTreeMap<FindingCategory, CategorySummary>,
    pub severities: BTreeMap<Severity, usize>,
    pub total_findings: usize,
    pub overall: Overall,
}

/// Complete result of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub findings: Vec<Finding>,
    pub summary: Summary,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.summary.overall == Overall::Pass
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Sort findings canonically and compute the summary. The run fails when
/// any finding carries ERROR severity.
pub fn aggregate(mut findings: Vec<Finding>) -> ValidationResult {
    findings.sort_by(|a, b| {
        (a.category, &a.object, a.status).cmp(&(b.category, &b.object, b.status))
    });

    let mut categories: BTreeMap<FindingCategory, CategorySummary> = BTreeMap::new();
    let mut severities: BTreeMap<Severity, usize> = BTreeMap::new();
    for finding in &findings {
        let entry = categories.entry(finding.category).or_default();
        entry.total += 1;
        match finding.status {
            FindingStatus::Match => entry.matched += 1,
            FindingStatus::Mismatch => entry.mismatched += 1,
            FindingStatus::MissingInSource | FindingStatus::MissingInTarget => entry.missing += 1,
        }
        *severities.entry(finding.severity).or_default() += 1;
    }

    let overall = if severities.get(&Severity::Error).copied().unwrap_or(0) > 0 {
        Overall::Fail
    } else {
        Overall::Pass
    };

    let summary = Summary {
        categories,
        severities,
        total_findings: findings.len(),
        overall,
    };
    ValidationResult { findings, summary }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(field: &str, severity: Severity) -> FieldDelta {
        FieldDelta {
            field: field.into(),
            source_value: "a".into(),
            target_value: "b".into(),
            severity,
        }
    }

    #[test]
    fn test_mismatch_severity_is_worst_delta() {
        let finding = Finding::mismatch(
            FindingCategory::Column,
            "S.T.C",
            vec![delta("ordinal", Severity::Warning), delta("data_type", Severity::Error)],
        );
        assert_eq!(finding.severity, Severity::Error);
    }

    #[test]
    fn test_aggregate_order_independent() {
        let a = Finding::matched(FindingCategory::RowCount, "S.A");
        let b = Finding::mismatch(
            FindingCategory::Column,
            "S.B.C",
            vec![delta("nullable", Severity::Error)],
        );
        let c = Finding::missing(
            FindingCategory::Constraint,
            "S.C",
            FindingStatus::MissingInTarget,
            Severity::Error,
        );
        let forward = aggregate(vec![a.clone(), b.clone(), c.clone()]);
        let reverse = aggregate(vec![c, b, a]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_overall_fail_only_on_error() {
        let warn_only = aggregate(vec![Finding::mismatch(
            FindingCategory::Constraint,
            "S.T",
            vec![delta("check_expr", Severity::Warning)],
        )]);
        assert_eq!(warn_only.summary.overall, Overall::Pass);
        assert!(warn_only.passed());

        let with_error = aggregate(vec![Finding::missing(
            FindingCategory::Column,
            "S.T.C",
            FindingStatus::MissingInTarget,
            Severity::Error,
        )]);
        assert_eq!(with_error.summary.overall, Overall::Fail);
    }

    #[test]
    fn test_empty_run_passes() {
        let result = aggregate(Vec::new());
        assert!(result.passed());
        assert_eq!(result.summary.total_findings, 0);
    }

    #[test]
    fn test_json_shape() {
        let result = aggregate(vec![Finding::matched(FindingCategory::RowCount, "S.T")]);
        let json = result.to_json().unwrap();
        assert!(json.contains("\"overall\": \"PASS\""));
        assert!(json.contains("\"ROW_COUNT\""));
    }

    #[test]
    fn test_sheet_names() {
        assert_eq!(FindingCategory::RowCount.sheet_name(), "RowCounts");
        assert_eq!(FindingCategory::Trigger.sheet_name(), "Triggers");
    }
}
