//! Canonical descriptors for tables, columns, constraints, and routines.
//!
//! These types provide a database-agnostic representation of schema metadata.
//! They are produced once per side by the normalizer and never mutated
//! afterwards; the validators only ever read them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Engine-agnostic type family.
///
/// Precision, scale, and length live on [`CanonicalType`]; the family alone
/// decides whether two columns are even comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFamily {
    Integer,
    Decimal,
    Float,
    String,
    FixedString,
    Date,
    Timestamp,
    Boolean,
    Binary,
    /// Anything the mapper does not recognize. The native type string is
    /// retained on the descriptor for diagnostic display.
    Other,
}

impl std::fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeFamily::Integer => "INTEGER",
            TypeFamily::Decimal => "DECIMAL",
            TypeFamily::Float => "FLOAT",
            TypeFamily::String => "STRING",
            TypeFamily::FixedString => "FIXED_STRING",
            TypeFamily::Date => "DATE",
            TypeFamily::Timestamp => "TIMESTAMP",
            TypeFamily::Boolean => "BOOLEAN",
            TypeFamily::Binary => "BINARY",
            TypeFamily::Other => "OTHER",
        };
        write!(f, "{}", name)
    }
}

/// Canonical representation of a column's data type.
///
/// Invariants: `precision`/`scale` are only meaningful for `Decimal`,
/// `length` only for `String`/`FixedString`/`Binary`. The original native
/// type name is always kept for error messages and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalType {
    pub family: TypeFamily,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    pub length: Option<i32>,
    /// The engine's native type name as reported by the connector.
    pub native: String,
}

impl CanonicalType {
    /// Create a type with no precision/scale/length attributes.
    pub fn new(family: TypeFamily, native: impl Into<String>) -> Self {
        Self {
            family,
            precision: None,
            scale: None,
            length: None,
            native: native.into(),
        }
    }

    /// Attach decimal precision and scale.
    pub fn with_precision(mut self, precision: Option<i32>, scale: Option<i32>) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    /// Attach a string/binary length.
    pub fn with_length(mut self, length: Option<i32>) -> Self {
        self.length = length;
        self
    }
}

impl std::fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.family {
            TypeFamily::Decimal => match (self.precision, self.scale) {
                (Some(p), Some(s)) => write!(f, "DECIMAL({},{})", p, s)?,
                (Some(p), None) => write!(f, "DECIMAL({})", p)?,
                _ => write!(f, "DECIMAL")?,
            },
            TypeFamily::String | TypeFamily::FixedString | TypeFamily::Binary => {
                match self.length {
                    Some(n) => write!(f, "{}({})", self.family, n)?,
                    None => write!(f, "{}", self.family)?,
                }
            }
            family => write!(f, "{}", family)?,
        }
        write!(f, " ({})", self.native)
    }
}

/// Column metadata after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Case-normalized column name.
    pub name: String,

    /// Ordinal position (1-based).
    pub ordinal: i32,

    /// Canonical data type.
    pub data_type: CanonicalType,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Default expression, if any.
    pub default: Option<String>,
}

/// Constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    NotNull,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::ForeignKey => "FOREIGN KEY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Check => "CHECK",
            ConstraintKind::NotNull => "NOT NULL",
        };
        write!(f, "{}", name)
    }
}

/// Referenced side of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub schema: String,
    pub table: String,
    /// Referenced columns, in key order.
    pub columns: Vec<String>,
}

/// Constraint metadata after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDescriptor {
    pub kind: ConstraintKind,

    /// Constraint name as reported by the engine. Not used as identity:
    /// names are routinely system-generated and do not survive migration.
    pub name: String,

    /// Constrained columns, ordered (order matters for PK/UK/FK).
    pub columns: Vec<String>,

    /// Referenced table and columns (FK only).
    pub references: Option<ForeignKeyRef>,

    /// Normalized check expression (CHECK only, when available).
    pub check_expr: Option<String>,
}

/// Table metadata after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub schema: String,
    pub name: String,

    /// Columns in ordinal order.
    pub columns: Vec<ColumnDescriptor>,

    pub constraints: Vec<ConstraintDescriptor>,

    /// Row count when the connector supplied one.
    pub row_count: Option<i64>,
}

impl TableDescriptor {
    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Look up a column by its normalized name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Routine kind (procedures, functions, triggers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutineKind {
    Procedure,
    Function,
    Trigger,
}

impl std::fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoutineKind::Procedure => "PROCEDURE",
            RoutineKind::Function => "FUNCTION",
            RoutineKind::Trigger => "TRIGGER",
        };
        write!(f, "{}", name)
    }
}

/// Routine metadata after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDescriptor {
    pub kind: RoutineKind,
    pub schema: String,
    pub name: String,

    /// Ordered parameter type names.
    pub signature: Vec<String>,

    /// SHA-256 of the routine definition, when available. Used for
    /// definition-change detection only; mismatches are warnings.
    pub body_hash: Option<String>,
}

impl RoutineDescriptor {
    /// Get the fully qualified routine name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// Key for table lookup: (schema, table), case-normalized.
pub type TableKey = (String, String);

/// Key for routine lookup: (schema, name, kind), case-normalized.
pub type RoutineKey = (String, String, RoutineKind);

/// Immutable point-in-time capture of one database's schema metadata.
///
/// Built once per side by [`crate::normalize::normalize`]; the maps are
/// ordered so every downstream iteration is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogSnapshot {
    pub tables: BTreeMap<TableKey, TableDescriptor>,
    pub routines: BTreeMap<RoutineKey, RoutineDescriptor>,
}

impl CatalogSnapshot {
    /// True when the snapshot holds no objects at all. An empty snapshot is
    /// valid validator input and produces all-MISSING findings.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.routines.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn routine_count(&self) -> usize {
        self.routines.len()
    }
}
