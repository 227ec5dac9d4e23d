//! File-based connector that replays an extracted catalog payload.
//!
//! The payload is the JSON serialization of [`RawCatalog`] — exactly what a
//! live connector would have materialized from its catalog queries. This
//! keeps validation runnable offline and makes end-to-end tests cheap.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Result, Side, ValidateError};

use super::{
    CatalogConnector, EngineKind, RawCatalog, RawColumnRow, RawConstraintRow, RawRoutineRow,
    RawRowCountRow, RawTableRow,
};

/// Connector that serves a previously extracted raw catalog from disk.
#[derive(Debug)]
pub struct FileConnector {
    side: Side,
    engine: EngineKind,
    path: PathBuf,
    catalog: RawCatalog,
}

impl FileConnector {
    /// Load an extract file, optionally restricted to one schema.
    ///
    /// The schema scope is matched case-insensitively, mirroring the
    /// default identifier policy.
    pub fn open(
        side: Side,
        engine: EngineKind,
        path: impl AsRef<Path>,
        schema_scope: Option<&str>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path)?;
        let mut catalog: RawCatalog = serde_json::from_str(&text).map_err(|e| {
            ValidateError::connector(
                side,
                format!("invalid catalog extract {}: {}", path.display(), e),
            )
        })?;

        if let Some(scope) = schema_scope {
            let scope = scope.trim().to_uppercase();
            let keep = |schema: &str| schema.trim().to_uppercase() == scope;
            catalog.tables.retain(|r| keep(&r.schema));
            catalog.columns.retain(|r| keep(&r.schema));
            catalog.constraints.retain(|r| keep(&r.schema));
            catalog.routines.retain(|r| keep(&r.schema));
            catalog.row_counts.retain(|r| keep(&r.schema));
        }

        tracing::debug!(
            "Loaded {} extract {}: {} tables, {} columns, {} routines",
            engine,
            path.display(),
            catalog.tables.len(),
            catalog.columns.len(),
            catalog.routines.len()
        );

        Ok(Self {
            side,
            engine,
            path,
            catalog,
        })
    }

    /// The side this connector was opened for.
    pub fn side(&self) -> Side {
        self.side
    }
}

#[async_trait]
impl CatalogConnector for FileConnector {
    fn engine(&self) -> EngineKind {
        self.engine
    }

    fn describe(&self) -> String {
        format!("{} extract {}", self.engine, self.path.display())
    }

    async fn fetch_tables(&self) -> Result<Vec<RawTableRow>> {
        Ok(self.catalog.tables.clone())
    }

    async fn fetch_columns(&self) -> Result<Vec<RawColumnRow>> {
        Ok(self.catalog.columns.clone())
    }

    async fn fetch_constraints(&self) -> Result<Vec<RawConstraintRow>> {
        Ok(self.catalog.constraints.clone())
    }

    async fn fetch_routines(&self) -> Result<Vec<RawRoutineRow>> {
        Ok(self.catalog.routines.clone())
    }

    async fn fetch_row_counts(&self) -> Result<Vec<RawRowCountRow>> {
        Ok(self.catalog.row_counts.clone())
    }
}
