//! Outstanding-quantity resolution
//!
//! A line is outstanding when the requested quantity exceeds what purchase
//! orders already cover. The make-po write path in the backend applies the
//! same comparison in SQL; the two must stay in lockstep.

use crate::models::{MaterialRequest, MaterialRequestItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One webhook payload entry for the PO automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoRequestLine {
    pub mr_name: String,
    pub item_code: String,
}

/// `qty > qty_total_po`, with missing coverage counting as zero.
pub fn is_outstanding(item: &MaterialRequestItem) -> bool {
    item.qty > item.ordered_qty()
}

/// Quantity still to order, floored at zero for over-covered lines.
pub fn outstanding_qty(item: &MaterialRequestItem) -> Decimal {
    let remaining = item.qty - item.ordered_qty();
    remaining.max(Decimal::ZERO)
}

/// All (MR, item) pairs that are in `item_codes` and still outstanding,
/// in document order.
pub fn outstanding_lines(
    requests: &[MaterialRequest],
    item_codes: &[String],
) -> Vec<PoRequestLine> {
    let mut lines = Vec::new();
    for mr in requests {
        for item in &mr.items {
            if item_codes.iter().any(|c| c == &item.item_code) && is_outstanding(item) {
                lines.push(PoRequestLine {
                    mr_name: mr.name.clone(),
                    item_code: item.item_code.clone(),
                });
            }
        }
    }
    lines
}
