//! Material request documents
//!
//! MRs are created by the ERP import and only ever updated in place by
//! the make-po flow. Date fields arrive as strings and are not guaranteed
//! to parse; the filter layer treats an unparseable date as "no date".

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statuses that keep a material request on the dashboard.
pub const OPEN_STATUSES: [&str; 3] = ["Draft", "Partially Ordered", "Pending"];

/// A material request as imported from the ERP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRequest {
    /// Unique business key (e.g. "MR-2024-00017")
    pub name: String,
    /// Free-text status; compared case-insensitively
    #[serde(default)]
    pub status: String,
    pub transaction_date: Option<String>,
    pub required_by: Option<String>,
    pub cost_center: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub items: Vec<MaterialRequestItem>,
}

/// One line of a material request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRequestItem {
    pub item_code: String,
    #[serde(default)]
    pub item_name: String,
    /// Requested quantity; missing values count as zero
    #[serde(default)]
    pub qty: Decimal,
    /// Quantity already covered by purchase orders
    #[serde(alias = "ordered_qty")]
    pub qty_total_po: Option<Decimal>,
    pub received_qty: Option<Decimal>,
    pub uom: Option<String>,
    pub project: Option<String>,
    pub department: Option<String>,
    pub cost_center: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_detail: Option<Vec<PoDetail>>,
    /// Set by make-po; the automation fills qty_total_po/po_detail later
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_po: Option<bool>,
}

/// Purchase-order reference attached to an item by the automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoDetail {
    pub po_name: String,
    pub supplier: Option<String>,
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub qty: Decimal,
    pub uom: Option<String>,
}

impl MaterialRequest {
    /// Case-insensitive status comparison
    pub fn has_status(&self, status: &str) -> bool {
        self.status.trim().eq_ignore_ascii_case(status.trim())
    }

    /// Transaction date truncated to a calendar day, when it parses
    pub fn transaction_day(&self) -> Option<NaiveDate> {
        self.transaction_date.as_deref().and_then(parse_erp_date)
    }

    /// Required-by date truncated to a calendar day, when it parses
    pub fn required_by_day(&self) -> Option<NaiveDate> {
        self.required_by.as_deref().and_then(parse_erp_date)
    }
}

impl MaterialRequestItem {
    /// PO-covered quantity with the missing-value default of zero
    pub fn ordered_qty(&self) -> Decimal {
        self.qty_total_po.unwrap_or(Decimal::ZERO)
    }
}

/// Parse an ERP-sourced date string down to a calendar day.
///
/// Accepts plain dates, space- or T-separated datetimes and RFC 3339
/// timestamps. Anything else is None, which the filter layer treats the
/// same as a missing date.
pub fn parse_erp_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_erp_date_plain() {
        assert_eq!(
            parse_erp_date("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn test_parse_erp_date_datetime() {
        assert_eq!(
            parse_erp_date("2024-03-05 14:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_erp_date("2024-03-05T14:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_erp_date("2024-03-05T14:30:00+07:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn test_parse_erp_date_invalid() {
        assert_eq!(parse_erp_date(""), None);
        assert_eq!(parse_erp_date("  "), None);
        assert_eq!(parse_erp_date("05/03/2024"), None);
        assert_eq!(parse_erp_date("not a date"), None);
    }

    #[test]
    fn test_status_comparison_is_case_insensitive() {
        let mr: MaterialRequest = serde_json::from_value(serde_json::json!({
            "name": "MR-1",
            "status": "Partially Ordered"
        }))
        .unwrap();
        assert!(mr.has_status("partially ordered"));
        assert!(mr.has_status("PARTIALLY ORDERED"));
        assert!(!mr.has_status("draft"));
    }

    #[test]
    fn test_item_accepts_ordered_qty_alias() {
        let item: MaterialRequestItem = serde_json::from_value(serde_json::json!({
            "item_code": "MID-1",
            "ordered_qty": "4"
        }))
        .unwrap();
        assert_eq!(item.qty_total_po, Some(Decimal::from(4)));
        // missing qty defaults to zero
        assert_eq!(item.qty, Decimal::ZERO);
    }

    #[test]
    fn test_missing_qty_total_po_defaults_to_zero() {
        let item: MaterialRequestItem = serde_json::from_value(serde_json::json!({
            "item_code": "MID-2",
            "qty": "10"
        }))
        .unwrap();
        assert_eq!(item.ordered_qty(), Decimal::ZERO);
    }
}
