//! Supplier price comparison
//!
//! Collapses the purchase history of one item into one row per supplier
//! so the dashboard can compare who sold it, when, and at what price.

use crate::models::PurchaseTransaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price statistics of one supplier for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPrice {
    pub supplier: String,
    /// Rate of the most recent purchase
    pub last_rate: Decimal,
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    pub avg_rate: Decimal,
    pub purchase_count: u64,
    pub last_purchase: Option<NaiveDate>,
}

struct SupplierAcc {
    rates: Vec<Decimal>,
    last: Option<(Option<NaiveDate>, usize)>,
    last_rate: Decimal,
}

/// Per-supplier price rows for one item, most recent purchase first.
///
/// Transactions for other items and rows without a supplier are skipped.
/// Undated transactions count toward the statistics but only become the
/// "last" purchase when no dated one exists.
pub fn compare_prices(
    item_code: &str,
    transactions: &[PurchaseTransaction],
) -> Vec<SupplierPrice> {
    let mut groups: BTreeMap<String, SupplierAcc> = BTreeMap::new();

    for (idx, tx) in transactions.iter().enumerate() {
        if tx.item_code != item_code {
            continue;
        }
        let supplier = tx.supplier.trim();
        if supplier.is_empty() {
            continue;
        }
        let acc = groups.entry(supplier.to_string()).or_insert_with(|| SupplierAcc {
            rates: Vec::new(),
            last: None,
            last_rate: Decimal::ZERO,
        });
        acc.rates.push(tx.rate);
        // None sorts before any date, so dated purchases win over undated
        let candidate = (tx.purchase_day(), idx);
        if acc.last.map_or(true, |current| candidate > current) {
            acc.last = Some(candidate);
            acc.last_rate = tx.rate;
        }
    }

    let mut rows: Vec<SupplierPrice> = groups
        .into_iter()
        .map(|(supplier, acc)| {
            let count = acc.rates.len() as u64;
            let sum: Decimal = acc.rates.iter().copied().sum();
            SupplierPrice {
                supplier,
                last_rate: acc.last_rate,
                min_rate: acc.rates.iter().copied().min().unwrap_or(Decimal::ZERO),
                max_rate: acc.rates.iter().copied().max().unwrap_or(Decimal::ZERO),
                avg_rate: (sum / Decimal::from(count)).round_dp(2),
                purchase_count: count,
                last_purchase: acc.last.and_then(|(day, _)| day),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.last_purchase
            .cmp(&a.last_purchase)
            .then_with(|| a.supplier.cmp(&b.supplier))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txs() -> Vec<PurchaseTransaction> {
        serde_json::from_value(serde_json::json!([
            {"po_name": "PO-1", "item_code": "MID-1", "supplier": "PT Alpha",
             "qty": 10, "rate": "100", "purchase_date": "2024-01-10"},
            {"po_name": "PO-2", "item_code": "MID-1", "supplier": "PT Alpha",
             "qty": 5, "rate": "120", "purchase_date": "2024-03-01"},
            {"po_name": "PO-3", "item_code": "MID-1", "supplier": "PT Beta",
             "qty": 2, "rate": "90", "purchase_date": "2024-02-15"},
            {"po_name": "PO-4", "item_code": "MID-2", "supplier": "PT Alpha",
             "qty": 1, "rate": "999", "purchase_date": "2024-02-20"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_groups_by_supplier_for_one_item() {
        let rows = compare_prices("MID-1", &txs());
        assert_eq!(rows.len(), 2);
        let alpha = rows.iter().find(|r| r.supplier == "PT Alpha").unwrap();
        assert_eq!(alpha.purchase_count, 2);
        assert_eq!(alpha.min_rate, Decimal::from(100));
        assert_eq!(alpha.max_rate, Decimal::from(120));
        assert_eq!(alpha.avg_rate, Decimal::from(110));
    }

    #[test]
    fn test_last_rate_follows_latest_purchase_date() {
        let rows = compare_prices("MID-1", &txs());
        let alpha = rows.iter().find(|r| r.supplier == "PT Alpha").unwrap();
        assert_eq!(alpha.last_rate, Decimal::from(120));
        assert_eq!(alpha.last_purchase, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_sorted_by_most_recent_purchase() {
        let rows = compare_prices("MID-1", &txs());
        assert_eq!(rows[0].supplier, "PT Alpha");
        assert_eq!(rows[1].supplier, "PT Beta");
    }

    #[test]
    fn test_other_items_and_blank_suppliers_are_ignored() {
        let mut transactions = txs();
        transactions.push(
            serde_json::from_value(serde_json::json!({
                "po_name": "PO-5", "item_code": "MID-1", "supplier": "  ",
                "qty": 1, "rate": "1"
            }))
            .unwrap(),
        );
        let rows = compare_prices("MID-1", &transactions);
        assert_eq!(rows.len(), 2);
        assert!(compare_prices("MID-9", &transactions).is_empty());
    }

    #[test]
    fn test_undated_purchase_loses_to_dated_one() {
        let transactions: Vec<PurchaseTransaction> = serde_json::from_value(serde_json::json!([
            {"po_name": "PO-1", "item_code": "MID-1", "supplier": "PT Alpha",
             "qty": 1, "rate": "500"},
            {"po_name": "PO-2", "item_code": "MID-1", "supplier": "PT Alpha",
             "qty": 1, "rate": "300", "purchase_date": "2023-01-01"}
        ]))
        .unwrap();
        let rows = compare_prices("MID-1", &transactions);
        assert_eq!(rows[0].last_rate, Decimal::from(300));
    }
}
