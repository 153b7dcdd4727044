//! Item master records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An item from the ERP item master.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Business key, e.g. "MID-00153"
    pub item_code: String,
    #[serde(default)]
    pub item_name: String,
    pub uom: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Per-warehouse stock breakdown, when the ERP sync provides it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<Vec<WarehouseStock>>,
}

/// Stock level of one item in one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub warehouse: String,
    #[serde(default)]
    pub qty: Decimal,
}

impl Item {
    /// Total stock across all warehouses
    pub fn total_stock(&self) -> Decimal {
        self.stock
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|w| w.qty)
            .sum()
    }
}
