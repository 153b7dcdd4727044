//! Reference-data listings for the filter controls
//!
//! Categories and TOPs carry parent/status_group so the client can
//! assemble its selection trees; UoMs are a flat name list.

use serde::Serialize;
use shared::models::{Category, Top};
use sqlx::PgPool;

use crate::error::AppResult;

/// A unit of measure.
#[derive(Debug, Clone, Serialize)]
pub struct Uom {
    pub name: String,
}

/// Reference-data service
#[derive(Clone)]
pub struct ReferenceService {
    db: PgPool,
}

impl ReferenceService {
    /// Create a new ReferenceService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all item categories
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, (String, Option<String>, i32)>(
            "SELECT name, parent, status_group FROM categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, parent, status_group)| Category {
                name,
                parent,
                status_group,
            })
            .collect())
    }

    /// List all terms of payment
    pub async fn list_tops(&self) -> AppResult<Vec<Top>> {
        let rows = sqlx::query_as::<_, (String, Option<String>, i32)>(
            "SELECT name, parent, status_group FROM tops ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, parent, status_group)| Top {
                name,
                parent,
                status_group,
            })
            .collect())
    }

    /// List all units of measure
    pub async fn list_uoms(&self) -> AppResult<Vec<Uom>> {
        let rows =
            sqlx::query_as::<_, (String,)>("SELECT name FROM uoms ORDER BY name")
                .fetch_all(&self.db)
                .await?;

        Ok(rows.into_iter().map(|(name,)| Uom { name }).collect())
    }
}
