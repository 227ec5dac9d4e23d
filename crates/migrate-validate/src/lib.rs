//! # migrate-validate
//!
//! Cross-engine database migration validation library.
//!
//! This library compares the schema and content metadata of a migration's
//! source and target databases, which may run on different engines
//! (Oracle, PostgreSQL, SQL Server, MySQL, Redshift, Athena), with
//! support for:
//!
//! - **Canonical metadata model** that both sides normalize into
//! - **Type mapping** from each engine's native types to shared families
//! - **Row count, column, constraint, and routine validators**
//! - **Severity-graded findings** with a PASS/FAIL roll-up
//!
//! ## Example
//!
//! ```rust,no_run
//! use migrate_validate::{
//!     aggregate, normalize, run_all, CatalogConnector, Config, FileConnector, Side,
//! };
//!
//! #[tokio::main]
//! async fn main() -> migrate_validate::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let source = FileConnector::open(
//!         Side::Source,
//!         config.source.engine_kind()?,
//!         &config.source.extract,
//!         config.source.schema.as_deref(),
//!     )?;
//!     let target = FileConnector::open(
//!         Side::Target,
//!         config.target.engine_kind()?,
//!         &config.target.extract,
//!         config.target.schema.as_deref(),
//!     )?;
//!     let src_raw = source.fetch_catalog().await?;
//!     let tgt_raw = target.fetch_catalog().await?;
//!     let src = normalize(Side::Source, source.engine(), &src_raw, &config.validation)?;
//!     let tgt = normalize(Side::Target, target.engine(), &tgt_raw, &config.validation)?;
//!     let result = aggregate(run_all(&src, &tgt, &config.validation));
//!     println!("{}", result.summary.overall);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connector;
pub mod core;
pub mod diff;
pub mod error;
pub mod normalize;
pub mod report;
pub mod typemap;
pub mod validators;

// Re-exports for convenient access
pub use crate::config::{Config, ConnectionProfile, ReportConfig, ValidatorOptions};
pub use crate::connector::{CatalogConnector, EngineKind, FileConnector, RawCatalog};
pub use crate::core::schema::{
    CanonicalType, CatalogSnapshot, ColumnDescriptor, ConstraintDescriptor, ConstraintKind,
    RoutineDescriptor, RoutineKind, TableDescriptor, TypeFamily,
};
pub use crate::error::{Result, Side, ValidateError};
pub use crate::normalize::normalize;
pub use crate::report::{
    aggregate, Finding, FindingCategory, FindingStatus, Overall, Severity, ValidationResult,
};
pub use crate::typemap::{map_type, type_compat, TypeCompat};
pub use crate::validators::run_all;
