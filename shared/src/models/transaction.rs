//! Purchase transaction history
//!
//! One row per purchased item line, used for the supplier price
//! comparison view.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A historical purchase of one item from one supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    /// Source purchase order, e.g. "PO-2024-00310"
    pub po_name: String,
    pub item_code: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub qty: Decimal,
    /// Unit price in the purchase currency
    #[serde(default)]
    pub rate: Decimal,
    pub uom: Option<String>,
    pub purchase_date: Option<String>,
}

impl PurchaseTransaction {
    /// Purchase date truncated to a calendar day, when it parses
    pub fn purchase_day(&self) -> Option<chrono::NaiveDate> {
        self.purchase_date.as_deref().and_then(super::parse_erp_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_purchase_day_parses_erp_dates() {
        let tx: PurchaseTransaction = serde_json::from_value(serde_json::json!({
            "po_name": "PO-2024-00310",
            "item_code": "MID-1",
            "item_name": "Bearing 6204",
            "supplier": "PT Sumber Makmur",
            "qty": 10,
            "rate": "125000.50",
            "purchase_date": "2024-06-01 09:00:00"
        }))
        .unwrap();
        assert_eq!(tx.purchase_day(), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(tx.rate, Decimal::new(12500050, 2));
    }
}
