//! Item master service

use shared::models::Item;
use sqlx::PgPool;

use crate::error::AppResult;

/// Item service for master-data queries
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    item_code: String,
    item_name: String,
    uom: Option<String>,
    category: Option<String>,
    brand: Option<String>,
    stock: Option<serde_json::Value>,
}

impl ItemRow {
    fn into_item(self) -> Item {
        Item {
            item_code: self.item_code,
            item_name: self.item_name,
            uom: self.uom,
            category: self.category,
            brand: self.brand,
            // per-warehouse stock array from the ERP sync; tolerate foreign shapes
            stock: self.stock.and_then(|v| serde_json::from_value(v).ok()),
        }
    }
}

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all items with their warehouse stock
    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT item_code, item_name, uom, category, brand, stock \
             FROM items \
             ORDER BY item_code",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }
}
