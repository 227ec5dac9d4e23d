//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::connector::EngineKind;
use crate::error::Result;
use crate::report::Severity;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source database connection profile.
    pub source: ConnectionProfile,

    /// Target database connection profile.
    pub target: ConnectionProfile,

    /// Validator tuning.
    #[serde(default)]
    pub validation: ValidatorOptions,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// One side of the validation run.
///
/// The engine name and the extract path are what the built-in file
/// connector needs; the host/credential fields describe the live system
/// the extract came from and are carried through for report context.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Engine name ("oracle", "postgres", "mssql", "mysql", "redshift",
    /// "athena").
    pub engine: String,

    /// Path to the catalog extract JSON produced for this side.
    pub extract: PathBuf,

    /// Restrict validation to one schema. All schemas when unset.
    #[serde(default)]
    pub schema: Option<String>,

    /// Database host (informational).
    #[serde(default)]
    pub host: Option<String>,

    /// Database port (informational).
    #[serde(default)]
    pub port: Option<u16>,

    /// Database name (informational).
    #[serde(default)]
    pub database: Option<String>,

    /// Username (informational).
    #[serde(default)]
    pub user: Option<String>,

    /// Password. Never logged or printed.
    #[serde(default)]
    pub password: Option<String>,
}

impl ConnectionProfile {
    /// Parse the configured engine name.
    pub fn engine_kind(&self) -> Result<EngineKind> {
        EngineKind::parse(&self.engine)
    }
}

// Keep passwords out of debug output and logs.
impl std::fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("engine", &self.engine)
            .field("extract", &self.extract)
            .field("schema", &self.schema)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Validator tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorOptions {
    /// Compare identifiers byte-for-byte instead of case-folding them.
    #[serde(default)]
    pub case_sensitive_identifiers: bool,

    /// Allowed row count drift as a percentage of the source count
    /// (default: 0, exact match).
    #[serde(default)]
    pub row_count_tolerance_percent: f64,

    /// Allowed absolute difference in decimal precision and scale
    /// (default: 0).
    #[serde(default)]
    pub decimal_precision_tolerance: i32,

    /// Hash routine definitions for change detection (default: true).
    #[serde(default = "default_true")]
    pub include_definition_hash: bool,

    /// Severity for routines present only in the target
    /// (default: warning).
    #[serde(default = "default_warning")]
    pub routine_addition_severity: Severity,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            case_sensitive_identifiers: false,
            row_count_tolerance_percent: 0.0,
            decimal_precision_tolerance: 0,
            include_definition_hash: true,
            routine_addition_severity: Severity::Warning,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Where to write the JSON report (default: "validation_report.json").
    #[serde(default = "default_report_output")]
    pub output: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_report_output(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_warning() -> Severity {
    Severity::Warning
}

fn default_report_output() -> PathBuf {
    PathBuf::from("validation_report.json")
}
