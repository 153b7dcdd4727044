//! Supplier registry documents
//!
//! Suppliers come from two places: the ERP sync and manual registration
//! through the dashboard. Both share one shape; `source` tells them apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for generated supplier codes.
pub const SUPPLIER_CODE_PREFIX: &str = "S-DN-";

/// A supplier, ERP-synced or registered locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Business key, e.g. "S-DN-00042"
    pub supplier_code: String,
    pub nama: String,
    pub npwp: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub payment_terms: Option<Vec<PaymentTerm>>,
    pub source: SupplierSource,
}

/// Where a supplier record originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierSource {
    #[serde(rename = "ERP")]
    Erp,
    #[serde(rename = "Non-ERP")]
    NonErp,
}

impl fmt::Display for SupplierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplierSource::Erp => write!(f, "ERP"),
            SupplierSource::NonErp => write!(f, "Non-ERP"),
        }
    }
}

/// One payment-term line, e.g. {"description": "30 Days", "value": 30}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerm {
    pub description: String,
    pub value: i64,
}

/// Format a counter value as a supplier code ("S-DN-00001").
pub fn format_supplier_code(seq: i64) -> String {
    format!("{}{:05}", SUPPLIER_CODE_PREFIX, seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_supplier_code_pads_to_five_digits() {
        assert_eq!(format_supplier_code(1), "S-DN-00001");
        assert_eq!(format_supplier_code(43), "S-DN-00043");
        assert_eq!(format_supplier_code(99999), "S-DN-99999");
        // the pad is a minimum width, larger counters still format
        assert_eq!(format_supplier_code(123456), "S-DN-123456");
    }

    #[test]
    fn test_source_serializes_with_dashboard_labels() {
        assert_eq!(
            serde_json::to_string(&SupplierSource::Erp).unwrap(),
            "\"ERP\""
        );
        assert_eq!(
            serde_json::to_string(&SupplierSource::NonErp).unwrap(),
            "\"Non-ERP\""
        );
        let s: SupplierSource = serde_json::from_str("\"Non-ERP\"").unwrap();
        assert_eq!(s, SupplierSource::NonErp);
    }

    #[test]
    fn test_supplier_tolerates_missing_optional_fields() {
        let s: Supplier = serde_json::from_value(serde_json::json!({
            "supplier_code": "S-DN-00007",
            "nama": "PT Sumber Makmur",
            "source": "Non-ERP"
        }))
        .unwrap();
        assert!(s.categories.is_empty());
        assert!(s.payment_terms.is_none());
    }
}
