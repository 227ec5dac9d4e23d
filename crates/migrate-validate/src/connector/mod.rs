//! Connector interface: engine kinds, raw catalog row shapes, and the
//! capability trait engine-specific connectors implement.
//!
//! Connectors own all I/O. They hand complete, already-materialized row
//! sets to the normalizer; the core never blocks on the network. Live
//! engine connectors (Oracle, Redshift, ...) are external collaborators;
//! this crate ships [`FileConnector`], which replays an extracted payload.

mod file;

pub use file::FileConnector;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidateError};

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Oracle,
    Postgres,
    Mssql,
    Mysql,
    Redshift,
    Athena,
}

impl EngineKind {
    /// Parse an engine name, accepting common aliases.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "oracle" => Ok(EngineKind::Oracle),
            "postgres" | "postgresql" | "pg" => Ok(EngineKind::Postgres),
            "mssql" | "sqlserver" | "sql_server" => Ok(EngineKind::Mssql),
            "mysql" | "mariadb" => Ok(EngineKind::Mysql),
            "redshift" => Ok(EngineKind::Redshift),
            "athena" => Ok(EngineKind::Athena),
            other => Err(ValidateError::Config(format!(
                "Unknown database engine: '{}'. Supported engines: \
                 oracle, postgres, mssql, mysql, redshift, athena",
                other
            ))),
        }
    }

    /// Canonical engine name.
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Oracle => "oracle",
            EngineKind::Postgres => "postgres",
            EngineKind::Mssql => "mssql",
            EngineKind::Mysql => "mysql",
            EngineKind::Redshift => "redshift",
            EngineKind::Athena => "athena",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raw table row as returned by a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTableRow {
    pub schema: String,
    pub name: String,
}

/// Raw column row: one row per column, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumnRow {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub native_type: String,
    #[serde(default)]
    pub precision: Option<i32>,
    #[serde(default)]
    pub scale: Option<i32>,
    #[serde(default)]
    pub length: Option<i32>,
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<String>,
    pub ordinal: i32,
}

/// Raw constraint row: composite constraints span multiple rows, one per
/// member column, ordered by `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConstraintRow {
    pub schema: String,
    pub table: String,
    pub name: String,
    /// Engine spelling of the kind ("P", "PRIMARY KEY", "FK", ...).
    pub kind: String,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub ref_schema: Option<String>,
    #[serde(default)]
    pub ref_table: Option<String>,
    #[serde(default)]
    pub ref_column: Option<String>,
    #[serde(default)]
    pub check_clause: Option<String>,
}

/// Raw routine row: one row per parameter (ordered by `position`), or a
/// single row with no parameter for parameterless routines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRoutineRow {
    pub schema: String,
    pub name: String,
    /// Engine spelling of the kind ("PROCEDURE", "FUNCTION", "TRIGGER").
    pub kind: String,
    #[serde(default)]
    pub parameter_type: Option<String>,
    #[serde(default)]
    pub position: i32,
    /// Precomputed definition hash, when the connector supplies one.
    #[serde(default)]
    pub body_hash: Option<String>,
    /// Definition text; hashed by the normalizer when no hash is given.
    #[serde(default)]
    pub definition: Option<String>,
}

/// Raw row count row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRowCountRow {
    pub schema: String,
    pub table: String,
    pub rows: i64,
}

/// Complete raw catalog payload for one side, as materialized by a
/// connector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub tables: Vec<RawTableRow>,
    #[serde(default)]
    pub columns: Vec<RawColumnRow>,
    #[serde(default)]
    pub constraints: Vec<RawConstraintRow>,
    #[serde(default)]
    pub routines: Vec<RawRoutineRow>,
    #[serde(default)]
    pub row_counts: Vec<RawRowCountRow>,
}

/// Capability interface for catalog extraction.
///
/// Each fetch returns the uniform raw-row shape for one catalog kind.
/// Implementations execute whatever engine-specific queries are needed and
/// return fully materialized vectors; no streaming, no partial results.
#[async_trait]
pub trait CatalogConnector: Send + Sync {
    /// The engine this connector talks to.
    fn engine(&self) -> EngineKind;

    /// Human-readable label for error context (host, file path, ...).
    fn describe(&self) -> String;

    async fn fetch_tables(&self) -> Result<Vec<RawTableRow>>;

    async fn fetch_columns(&self) -> Result<Vec<RawColumnRow>>;

    async fn fetch_constraints(&self) -> Result<Vec<RawConstraintRow>>;

    async fn fetch_routines(&self) -> Result<Vec<RawRoutineRow>>;

    async fn fetch_row_counts(&self) -> Result<Vec<RawRowCountRow>>;

    /// Fetch the whole catalog into one payload.
    ///
    /// Template method with a default implementation that calls the
    /// individual fetch methods.
    async fn fetch_catalog(&self) -> Result<RawCatalog> {
        Ok(RawCatalog {
            tables: self.fetch_tables().await?,
            columns: self.fetch_columns().await?,
            constraints: self.fetch_constraints().await?,
            routines: self.fetch_routines().await?,
            row_counts: self.fetch_row_counts().await?,
        })
    }
}
