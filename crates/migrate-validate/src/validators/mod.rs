//! The four validators. Each is a pure function over two normalized
//! snapshots plus the tuning options, returning a flat finding list.

pub mod column;
pub mod constraint;
pub mod row_count;
pub mod routine;

use crate::config::ValidatorOptions;
use crate::core::schema::CatalogSnapshot;
use crate::report::Finding;

/// Run every validator over the pair of snapshots.
pub fn run_all(
    source: &CatalogSnapshot,
    target: &CatalogSnapshot,
    options: &ValidatorOptions,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(row_count::validate(source, target, options));
    findings.extend(column::validate(source, target, options));
    findings.extend(constraint::validate(source, target, options));
    findings.extend(routine::validate(source, target, options));
    findings
}


#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::schema::{
        CanonicalType, CatalogSnapshot, ColumnDescriptor, TableDescriptor, TypeFamily,
    };

    pub fn column(name: &str, ordinal: i32, family: TypeFamily, native: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            ordinal,
            data_type: CanonicalType::new(family, native),
            nullable: true,
            default: None,
        }
    }

    pub fn table(schema: &str, name: &str, columns: Vec<ColumnDescriptor>) -> TableDescriptor {
        TableDescriptor {
            schema: schema.to_string(),
            name: name.to_string(),
            columns,
            constraints: Vec::new(),
            row_count: None,
        }
    }

    pub fn snapshot(tables: Vec<TableDescriptor>) -> CatalogSnapshot {
        let mut snap = CatalogSnapshot::default();
        for t in tables {
            snap.tables.insert((t.schema.clone(), t.name.clone()), t);
        }
        snap
    }
}
