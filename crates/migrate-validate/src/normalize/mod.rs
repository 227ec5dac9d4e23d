//! Normalization of raw catalog rows into an engine-neutral snapshot.
//!
//! Connectors hand over flat row sets straight out of each engine's system
//! catalog. This module folds identifiers, maps native types through the
//! engine's lookup table, groups constraint and routine rows into
//! descriptors, and attaches row counts, producing a [`CatalogSnapshot`]
//! that the validators can compare without knowing which engine it came
//! from. Normalizing an already-consistent catalog twice yields the same
//! snapshot.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::config::ValidatorOptions;
use crate::connector::{EngineKind, RawCatalog};
use crate::core::identifier::{fold_ident, normalize_expr, qualified};
use crate::core::schema::{
    CatalogSnapshot, ColumnDescriptor, ConstraintDescriptor, ConstraintKind, ForeignKeyRef,
    RoutineDescriptor, RoutineKind, TableDescriptor, TableKey,
};
use crate::error::{Result, Side, ValidateError};
use crate::typemap::map_type;

/// Build a canonical snapshot from raw catalog rows.
pub fn normalize(
    side: Side,
    engine: EngineKind,
    raw: &RawCatalog,
    options: &ValidatorOptions,
) -> Result<CatalogSnapshot> {
    let cs = options.case_sensitive_identifiers;
    let mut snapshot = CatalogSnapshot::default();

    for row in &raw.tables {
        let schema = fold_ident(&row.schema, cs);
        let name = fold_ident(&row.name, cs);
        let key: TableKey = (schema.clone(), name.clone());
        if snapshot.tables.contains_key(&key) {
            warn!(side = %side, table = %qualified(&schema, &name), "duplicate table row ignored");
            continue;
        }
        snapshot.tables.insert(
            key,
            TableDescriptor {
                schema,
                name,
                columns: Vec::new(),
                constraints: Vec::new(),
                row_count: None,
            },
        );
    }

    attach_columns(side, engine, raw, cs, &mut snapshot)?;
    attach_constraints(side, raw, cs, &mut snapshot)?;
    attach_row_counts(side, raw, cs, &mut snapshot)?;
    build_routines(side, raw, options, &mut snapshot)?;

    Ok(snapshot)
}

fn attach_columns(
    side: Side,
    engine: EngineKind,
    raw: &RawCatalog,
    cs: bool,
    snapshot: &mut CatalogSnapshot,
) -> Result<()> {
    for row in &raw.columns {
        let key = (fold_ident(&row.schema, cs), fold_ident(&row.table, cs));
        let table = snapshot.tables.get_mut(&key).ok_or_else(|| {
            ValidateError::normalization(
                side,
                qualified(&key.0, &key.1),
                format!("column {} references a table missing from the table rows", row.column),
            )
        })?;
        let name = fold_ident(&row.column, cs);
        if table.columns.iter().any(|c| c.name == name) {
            warn!(side = %side, table = %table.full_name(), column = %name, "duplicate column row ignored");
            continue;
        }
        table.columns.push(ColumnDescriptor {
            name,
            ordinal: row.ordinal,
            data_type: map_type(engine, &row.native_type, row.precision, row.scale, row.length),
            nullable: row.nullable,
            default: row.default.as_deref().map(normalize_expr).filter(|d| !d.is_empty()),
        });
    }

    for table in snapshot.tables.values_mut() {
        table.columns.sort_by_key(|c| c.ordinal);
    }
    Ok(())
}

/// Constraint rows arrive one per column; group them back into whole
/// constraints keyed by (table, constraint name).
fn attach_constraints(
    side: Side,
    raw: &RawCatalog,
    cs: bool,
    snapshot: &mut CatalogSnapshot,
) -> Result<()> {
    struct Partial {
        kind: ConstraintKind,
        columns: Vec<(i32, String)>,
        ref_target: Option<(String, String)>,
        ref_columns: Vec<(i32, String)>,
        check_clause: Option<String>,
    }

    let mut groups: BTreeMap<(TableKey, String), Partial> = BTreeMap::new();

    for row in &raw.constraints {
        let table_key = (fold_ident(&row.schema, cs), fold_ident(&row.table, cs));
        if !snapshot.tables.contains_key(&table_key) {
            return Err(ValidateError::normalization(
                side,
                qualified(&table_key.0, &table_key.1),
                format!("constraint {} references a table missing from the table rows", row.name),
            ));
        }
        let Some(kind) = parse_constraint_kind(&row.kind) else {
            warn!(side = %side, constraint = %row.name, kind = %row.kind, "unrecognized constraint kind skipped");
            continue;
        };
        let name = fold_ident(&row.name, cs);
        let object = qualified(&table_key.0, &table_key.1);
        let entry = groups
            .entry((table_key, name.clone()))
            .or_insert_with(|| Partial {
                kind,
                columns: Vec::new(),
                ref_target: None,
                ref_columns: Vec::new(),
                check_clause: None,
            });
        if entry.kind != kind {
            return Err(ValidateError::normalization(
                side,
                object,
                format!("constraint {} reported with conflicting kinds", name),
            ));
        }
        if let Some(column) = &row.column {
            let folded = fold_ident(column, cs);
            if !entry.columns.iter().any(|(_, c)| *c == folded) {
                entry.columns.push((row.position, folded));
            }
        }
        if let (Some(rs), Some(rt)) = (&row.ref_schema, &row.ref_table) {
            entry.ref_target = Some((fold_ident(rs, cs), fold_ident(rt, cs)));
        }
        if let Some(rc) = &row.ref_column {
            let folded = fold_ident(rc, cs);
            if !entry.ref_columns.iter().any(|(_, c)| *c == folded) {
                entry.ref_columns.push((row.position, folded));
            }
        }
        if let Some(clause) = &row.check_clause {
            let normalized = normalize_expr(clause);
            if !normalized.is_empty() {
                entry.check_clause = Some(normalized);
            }
        }
    }

    for ((table_key, name), mut partial) in groups {
        partial.columns.sort_by_key(|(p, _)| *p);
        partial.ref_columns.sort_by_key(|(p, _)| *p);
        let references = partial.ref_target.map(|(schema, table)| ForeignKeyRef {
            schema,
            table,
            columns: partial.ref_columns.into_iter().map(|(_, c)| c).collect(),
        });
        let descriptor = ConstraintDescriptor {
            kind: partial.kind,
            name,
            columns: partial.columns.into_iter().map(|(_, c)| c).collect(),
            references,
            check_expr: partial.check_clause,
        };
        if let Some(table) = snapshot.tables.get_mut(&table_key) {
            table.constraints.push(descriptor);
        }
    }
    Ok(())
}

fn attach_row_counts(
    side: Side,
    raw: &RawCatalog,
    cs: bool,
    snapshot: &mut CatalogSnapshot,
) -> Result<()> {
    for row in &raw.row_counts {
        let key = (fold_ident(&row.schema, cs), fold_ident(&row.table, cs));
        let table = snapshot.tables.get_mut(&key).ok_or_else(|| {
            ValidateError::normalization(
                side,
                qualified(&key.0, &key.1),
                "row count references a table missing from the table rows",
            )
        })?;
        table.row_count = Some(row.rows);
    }
    Ok(())
}

fn build_routines(
    side: Side,
    raw: &RawCatalog,
    options: &ValidatorOptions,
    snapshot: &mut CatalogSnapshot,
) -> Result<()> {
    let cs = options.case_sensitive_identifiers;

    struct Partial {
        parameters: Vec<(i32, String)>,
        body_hash: Option<String>,
        definition: Option<String>,
    }

    let mut groups: BTreeMap<(String, String, RoutineKind), Partial> = BTreeMap::new();

    for row in &raw.routines {
        let Some(kind) = parse_routine_kind(&row.kind) else {
            warn!(side = %side, routine = %row.name, kind = %row.kind, "unrecognized routine kind skipped");
            continue;
        };
        let key = (fold_ident(&row.schema, cs), fold_ident(&row.name, cs), kind);
        let entry = groups.entry(key).or_insert_with(|| Partial {
            parameters: Vec::new(),
            body_hash: None,
            definition: None,
        });
        if let Some(pt) = &row.parameter_type {
            entry.parameters.push((row.position, pt.trim().to_uppercase()));
        }
        if entry.body_hash.is_none() {
            entry.body_hash = row.body_hash.clone();
        }
        if entry.definition.is_none() {
            entry.definition = row.definition.clone();
        }
    }

    for ((schema, name, kind), mut partial) in groups {
        partial.parameters.sort_by_key(|(p, _)| *p);
        let body_hash = if options.include_definition_hash {
            partial.body_hash.or_else(|| partial.definition.as_deref().map(hash_definition))
        } else {
            None
        };
        snapshot.routines.insert(
            (schema.clone(), name.clone(), kind),
            RoutineDescriptor {
                kind,
                schema,
                name,
                signature: partial.parameters.into_iter().map(|(_, p)| p).collect(),
                body_hash,
            },
        );
    }
    Ok(())
}

/// SHA-256 of the trimmed routine body, hex-encoded. Used when the
/// connector cannot compute a hash server-side.
pub fn hash_definition(definition: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(definition.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn parse_constraint_kind(kind: &str) -> Option<ConstraintKind> {
    match kind.trim().to_uppercase().as_str() {
        "P" | "PK" | "PRIMARY KEY" => Some(ConstraintKind::PrimaryKey),
        "R" | "F" | "FK" | "FOREIGN KEY" => Some(ConstraintKind::ForeignKey),
        "U" | "UK" | "UQ" | "UNIQUE" => Some(ConstraintKind::Unique),
        "C" | "CHECK" => Some(ConstraintKind::Check),
        "NOT NULL" => Some(ConstraintKind::NotNull),
        _ => None,
    }
}

fn parse_routine_kind(kind: &str) -> Option<RoutineKind> {
    match kind.trim().to_uppercase().as_str() {
        "PROCEDURE" | "P" => Some(RoutineKind::Procedure),
        "FUNCTION" | "FN" | "F" => Some(RoutineKind::Function),
        "TRIGGER" | "TR" => Some(RoutineKind::Trigger),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{RawColumnRow, RawConstraintRow, RawRoutineRow, RawRowCountRow, RawTableRow};

    fn table_row(schema: &str, name: &str) -> RawTableRow {
        RawTableRow { schema: schema.into(), name: name.into() }
    }

    fn column_row(schema: &str, table: &str, column: &str, native: &str, ordinal: i32) -> RawColumnRow {
        RawColumnRow {
            schema: schema.into(),
            table: table.into(),
            column: column.into(),
            native_type: native.into(),
            precision: None,
            scale: None,
            length: None,
            nullable: true,
            default: None,
            ordinal,
        }
    }

    fn options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    #[test]
    fn test_identifiers_folded_to_uppercase() {
        let raw = RawCatalog {
            tables: vec![table_row("hr", "Employees")],
            columns: vec![column_row("HR", "employees", "id", "integer", 1)],
            ..Default::default()
        };
        let snap = normalize(Side::Source, EngineKind::Postgres, &raw, &options()).unwrap();
        let table = snap.tables.get(&("HR".to_string(), "EMPLOYEES".to_string())).unwrap();
        assert_eq!(table.columns[0].name, "ID");
    }

    #[test]
    fn test_case_sensitive_mode_keeps_case() {
        let raw = RawCatalog {
            tables: vec![table_row("hr", "Employees")],
            ..Default::default()
        };
        let mut opts = options();
        opts.case_sensitive_identifiers = true;
        let snap = normalize(Side::Source, EngineKind::Postgres, &raw, &opts).unwrap();
        assert!(snap.tables.contains_key(&("hr".to_string(), "Employees".to_string())));
    }

    #[test]
    fn test_columns_sorted_by_ordinal() {
        let raw = RawCatalog {
            tables: vec![table_row("s", "t")],
            columns: vec![
                column_row("s", "t", "b", "text", 2),
                column_row("s", "t", "a", "text", 1),
            ],
            ..Default::default()
        };
        let snap = normalize(Side::Source, EngineKind::Postgres, &raw, &options()).unwrap();
        let table = snap.tables.values().next().unwrap();
        assert_eq!(table.columns[0].name, "A");
        assert_eq!(table.columns[1].name, "B");
    }

    #[test]
    fn test_column_for_unknown_table_errors() {
        let raw = RawCatalog {
            columns: vec![column_row("s", "ghost", "a", "text", 1)],
            ..Default::default()
        };
        let err = normalize(Side::Target, EngineKind::Postgres, &raw, &options()).unwrap_err();
        assert!(matches!(err, ValidateError::Normalization { side: Side::Target, .. }));
    }

    #[test]
    fn test_multi_column_constraint_grouped_in_order() {
        let raw = RawCatalog {
            tables: vec![table_row("s", "t")],
            constraints: vec![
                RawConstraintRow {
                    schema: "s".into(),
                    table: "t".into(),
                    name: "pk_t".into(),
                    kind: "P".into(),
                    column: Some("b".into()),
                    position: 2,
                    ref_schema: None,
                    ref_table: None,
                    ref_column: None,
                    check_clause: None,
                },
                RawConstraintRow {
                    schema: "s".into(),
                    table: "t".into(),
                    name: "pk_t".into(),
                    kind: "PRIMARY KEY".into(),
                    column: Some("a".into()),
                    position: 1,
                    ref_schema: None,
                    ref_table: None,
                    ref_column: None,
                    check_clause: None,
                },
            ],
            ..Default::default()
        };
        let snap = normalize(Side::Source, EngineKind::Oracle, &raw, &options()).unwrap();
        let table = snap.tables.values().next().unwrap();
        assert_eq!(table.constraints.len(), 1);
        let pk = &table.constraints[0];
        assert_eq!(pk.kind, ConstraintKind::PrimaryKey);
        assert_eq!(pk.columns, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_conflicting_constraint_kinds_error() {
        let mut row = RawConstraintRow {
            schema: "s".into(),
            table: "t".into(),
            name: "c1".into(),
            kind: "P".into(),
            column: Some("a".into()),
            position: 1,
            ref_schema: None,
            ref_table: None,
            ref_column: None,
            check_clause: None,
        };
        let mut other = row.clone();
        other.kind = "U".into();
        other.position = 2;
        row.column = Some("a".into());
        let raw = RawCatalog {
            tables: vec![table_row("s", "t")],
            constraints: vec![row, other],
            ..Default::default()
        };
        let err = normalize(Side::Source, EngineKind::Oracle, &raw, &options()).unwrap_err();
        assert!(matches!(err, ValidateError::Normalization { .. }));
    }

    #[test]
    fn test_routine_signature_ordered_and_hashed() {
        let raw = RawCatalog {
            routines: vec![
                RawRoutineRow {
                    schema: "s".into(),
                    name: "calc".into(),
                    kind: "FUNCTION".into(),
                    parameter_type: Some("numeric".into()),
                    position: 2,
                    body_hash: None,
                    definition: Some("begin return 1; end".into()),
                },
                RawRoutineRow {
                    schema: "s".into(),
                    name: "calc".into(),
                    kind: "FUNCTION".into(),
                    parameter_type: Some("integer".into()),
                    position: 1,
                    body_hash: None,
                    definition: None,
                },
            ],
            ..Default::default()
        };
        let snap = normalize(Side::Source, EngineKind::Postgres, &raw, &options()).unwrap();
        let routine = snap.routines.values().next().unwrap();
        assert_eq!(routine.signature, vec!["INTEGER".to_string(), "NUMERIC".to_string()]);
        assert_eq!(routine.body_hash, Some(hash_definition("begin return 1; end")));
    }

    #[test]
    fn test_definition_hash_disabled() {
        let raw = RawCatalog {
            routines: vec![RawRoutineRow {
                schema: "s".into(),
                name: "p1".into(),
                kind: "PROCEDURE".into(),
                parameter_type: None,
                position: 0,
                body_hash: Some("abc".into()),
                definition: None,
            }],
            ..Default::default()
        };
        let mut opts = options();
        opts.include_definition_hash = false;
        let snap = normalize(Side::Source, EngineKind::Mssql, &raw, &opts).unwrap();
        assert!(snap.routines.values().next().unwrap().body_hash.is_none());
    }

    #[test]
    fn test_row_counts_attached() {
        let raw = RawCatalog {
            tables: vec![table_row("s", "t")],
            row_counts: vec![RawRowCountRow { schema: "S".into(), table: "T".into(), rows: 42 }],
            ..Default::default()
        };
        let snap = normalize(Side::Source, EngineKind::Postgres, &raw, &options()).unwrap();
        assert_eq!(snap.tables.values().next().unwrap().row_count, Some(42));
    }

    #[test]
    fn test_normalize_is_idempotent_on_consistent_input() {
        let raw = RawCatalog {
            tables: vec![table_row("s", "t")],
            columns: vec![column_row("s", "t", "a", "numeric", 1)],
            row_counts: vec![RawRowCountRow { schema: "s".into(), table: "t".into(), rows: 1 }],
            ..Default::default()
        };
        let first = normalize(Side::Source, EngineKind::Postgres, &raw, &options()).unwrap();
        let second = normalize(Side::Source, EngineKind::Postgres, &raw, &options()).unwrap();
        assert_eq!(first, second);
    }
}
