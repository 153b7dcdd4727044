//! Purchase transaction service

use shared::models::PurchaseTransaction;
use shared::pricing::{compare_prices, SupplierPrice};
use sqlx::PgPool;

use crate::error::AppResult;

/// Purchase transaction service for history and price comparison
#[derive(Clone)]
pub struct TransactionService {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    po_name: String,
    item_code: String,
    item_name: String,
    supplier: String,
    qty: rust_decimal::Decimal,
    rate: rust_decimal::Decimal,
    uom: Option<String>,
    purchase_date: Option<String>,
}

impl TransactionRow {
    fn into_transaction(self) -> PurchaseTransaction {
        PurchaseTransaction {
            po_name: self.po_name,
            item_code: self.item_code,
            item_name: self.item_name,
            supplier: self.supplier,
            qty: self.qty,
            rate: self.rate,
            uom: self.uom,
            purchase_date: self.purchase_date,
        }
    }
}

const TRANSACTION_COLUMNS: &str =
    "po_name, item_code, item_name, supplier, qty, rate, uom, purchase_date";

impl TransactionService {
    /// Create a new TransactionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Purchase history, newest first, optionally limited to one item.
    ///
    /// ERP dates are ISO strings, so the text ordering is chronological.
    pub async fn list_transactions(
        &self,
        item_code: Option<&str>,
    ) -> AppResult<Vec<PurchaseTransaction>> {
        let rows = match item_code {
            Some(code) => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "SELECT {} FROM purchase_transactions \
                     WHERE item_code = $1 \
                     ORDER BY purchase_date DESC NULLS LAST, po_name",
                    TRANSACTION_COLUMNS
                ))
                .bind(code)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "SELECT {} FROM purchase_transactions \
                     ORDER BY purchase_date DESC NULLS LAST, po_name",
                    TRANSACTION_COLUMNS
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(TransactionRow::into_transaction)
            .collect())
    }

    /// Per-supplier price summary for one item. An item with no purchase
    /// history yields an empty list.
    pub async fn price_comparison(&self, item_code: &str) -> AppResult<Vec<SupplierPrice>> {
        let transactions = self.list_transactions(Some(item_code)).await?;
        Ok(compare_prices(item_code, &transactions))
    }
}
