//! Row count validation: every table on either side gets a finding.

use tracing::debug;

use crate::config::ValidatorOptions;
use crate::core::schema::CatalogSnapshot;
use crate::diff::align;
use crate::report::{Finding, FindingCategory, FindingStatus, Severity};

pub fn validate(
    source: &CatalogSnapshot,
    target: &CatalogSnapshot,
    options: &ValidatorOptions,
) -> Vec<Finding> {
    let aligned = align(&source.tables, &target.tables);
    let mut findings = Vec::with_capacity(
        aligned.matched.len() + aligned.only_in_source.len() + aligned.only_in_target.len(),
    );

    for key in &aligned.matched {
        // alignment keys come from both maps, so lookups cannot miss
        let (Some(src), Some(tgt)) = (source.tables.get(*key), target.tables.get(*key)) else {
            continue;
        };
        let object = src.full_name();
        match (src.row_count, tgt.row_count) {
            (Some(s), Some(t)) => {
                let tolerance = (s.abs() as f64) * options.row_count_tolerance_percent / 100.0;
                let delta = t - s;
                if (delta.abs() as f64) <= tolerance {
                    debug!(table = %object, rows = s, "row count within tolerance");
                    findings.push(
                        Finding::matched(FindingCategory::RowCount, &object)
                            .with_note(format!("source={s} target={t}")),
                    );
                } else {
                    findings.push(
                        Finding::mismatch(FindingCategory::RowCount, &object, Vec::new())
                            .with_severity(Severity::Error)
                            .with_note(format!("source={s} target={t} delta={delta:+}")),
                    );
                }
            }
            // A side without a count cannot be compared; surface it but
            // do not fail the run on it.
            (s, t) => {
                findings.push(
                    Finding::matched(FindingCategory::RowCount, &object)
                        .with_severity(Severity::Warning)
                        .with_note(format!(
                            "row count unavailable (source={}, target={})",
                            s.map_or("none".to_string(), |v| v.to_string()),
                            t.map_or("none".to_string(), |v| v.to_string()),
                        )),
                );
            }
        }
    }

    for key in &aligned.only_in_source {
        let object = format!("{}.{}", key.0, key.1);
        findings.push(Finding::missing(
            FindingCategory::RowCount,
            object,
            FindingStatus::MissingInTarget,
            Severity::Error,
        ));
    }
    for key in &aligned.only_in_target {
        let object = format!("{}.{}", key.0, key.1);
        findings.push(Finding::missing(
            FindingCategory::RowCount,
            object,
            FindingStatus::MissingInSource,
            Severity::Error,
        ));
    }

    findings
}
