//! Supplier registry service
//!
//! Listing returns ERP-synced and locally registered suppliers together;
//! creation is for Non-ERP suppliers and allocates the next supplier code
//! from an atomic counter.

use serde::Deserialize;
use shared::models::{format_supplier_code, PaymentTerm, Supplier, SupplierSource};
use shared::normalize::{normalize_categories, parse_payment_terms_template};
use shared::validation::{validate_indonesian_phone, validate_npwp, validate_supplier_name};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Supplier service for registry queries and registration
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Input for registering a Non-ERP supplier
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[serde(default)]
    pub nama: String,
    pub npwp: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub payment_terms: Option<Vec<PaymentTerm>>,
    /// Comma-separated fallback when no explicit payment_terms array is given
    pub payment_terms_template: Option<String>,
}

/// Field-level validation of a registration request.
pub fn validate_create_supplier(input: &CreateSupplierInput) -> AppResult<()> {
    if let Err(msg) = validate_supplier_name(&input.nama) {
        return Err(AppError::Validation {
            field: "nama".to_string(),
            message: msg.to_string(),
            message_id: "Nama supplier wajib diisi".to_string(),
        });
    }
    if let Some(npwp) = input.npwp.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if let Err(msg) = validate_npwp(npwp) {
            return Err(AppError::Validation {
                field: "npwp".to_string(),
                message: msg.to_string(),
                message_id: "NPWP harus terdiri dari 15 atau 16 digit".to_string(),
            });
        }
    }
    if let Some(phone) = input.phone.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if let Err(msg) = validate_indonesian_phone(phone) {
            return Err(AppError::Validation {
                field: "phone".to_string(),
                message: msg.to_string(),
                message_id: "Format nomor telepon tidak valid".to_string(),
            });
        }
    }
    if input.validate().is_err() {
        return Err(AppError::Validation {
            field: "email".to_string(),
            message: "Invalid email format".to_string(),
            message_id: "Format email tidak valid".to_string(),
        });
    }
    Ok(())
}

/// Payment terms of a registration: the explicit array wins, otherwise the
/// comma-separated template is parsed.
pub fn resolve_payment_terms(input: &CreateSupplierInput) -> Option<Vec<PaymentTerm>> {
    match &input.payment_terms {
        Some(terms) => Some(terms.clone()),
        None => input
            .payment_terms_template
            .as_deref()
            .and_then(parse_payment_terms_template),
    }
}

#[derive(sqlx::FromRow)]
struct SupplierRow {
    supplier_code: String,
    nama: String,
    npwp: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    city: Option<String>,
    categories: Vec<String>,
    payment_terms: Option<serde_json::Value>,
    source: String,
}

impl SupplierRow {
    fn into_supplier(self) -> AppResult<Supplier> {
        let payment_terms = match self.payment_terms {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| AppError::Internal(format!("Bad payment_terms in storage: {}", e)))?,
            None => None,
        };
        let source = match self.source.as_str() {
            "ERP" => SupplierSource::Erp,
            _ => SupplierSource::NonErp,
        };
        Ok(Supplier {
            supplier_code: self.supplier_code,
            nama: self.nama,
            npwp: self.npwp,
            phone: self.phone,
            email: self.email,
            address: self.address,
            city: self.city,
            categories: self.categories,
            payment_terms,
            source,
        })
    }
}

const SUPPLIER_COLUMNS: &str = "supplier_code, nama, npwp, phone, email, address, city, \
                                categories, payment_terms, source";

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all suppliers, ERP and Non-ERP, by supplier code
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(&format!(
            "SELECT {} FROM suppliers ORDER BY supplier_code",
            SUPPLIER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SupplierRow::into_supplier).collect()
    }

    /// Get one supplier by code
    pub async fn get_supplier(&self, supplier_code: &str) -> AppResult<Supplier> {
        let row = sqlx::query_as::<_, SupplierRow>(&format!(
            "SELECT {} FROM suppliers WHERE supplier_code = $1",
            SUPPLIER_COLUMNS
        ))
        .bind(supplier_code)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        row.into_supplier()
    }

    /// Allocate the next supplier code.
    ///
    /// One statement: the first call seeds the counter from the highest
    /// existing code, every later call atomically increments it. Two
    /// concurrent registrations can never draw the same value.
    pub async fn next_supplier_code(&self) -> AppResult<String> {
        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counters (name, value)
            VALUES ('supplier_code', (
                SELECT COALESCE(MAX((substring(supplier_code from 6))::bigint), 0) + 1
                FROM suppliers
                WHERE supplier_code ~ '^S-DN-[0-9]+$'
            ))
            ON CONFLICT (name) DO UPDATE SET value = counters.value + 1
            RETURNING value
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(format_supplier_code(seq))
    }

    /// Register a Non-ERP supplier
    pub async fn create_supplier(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        validate_create_supplier(&input)?;

        let categories = normalize_categories(&input.categories);
        let payment_terms = resolve_payment_terms(&input);
        let payment_terms_json = match &payment_terms {
            Some(terms) => Some(
                serde_json::to_value(terms)
                    .map_err(|e| AppError::Internal(format!("Payment terms encoding: {}", e)))?,
            ),
            None => None,
        };

        let supplier_code = self.next_supplier_code().await?;

        let row = sqlx::query_as::<_, SupplierRow>(&format!(
            r#"
            INSERT INTO suppliers (supplier_code, nama, npwp, phone, email, address, city,
                                   categories, payment_terms, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'Non-ERP')
            RETURNING {}
            "#,
            SUPPLIER_COLUMNS
        ))
        .bind(&supplier_code)
        .bind(input.nama.trim())
        .bind(&input.npwp)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&categories)
        .bind(payment_terms_json)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Registered supplier {}", supplier_code);
        row.into_supplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(value: serde_json::Value) -> CreateSupplierInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_nama_is_rejected_with_field() {
        let err = validate_create_supplier(&CreateSupplierInput::default()).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "nama"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_valid_minimal_input_passes() {
        let input = input(serde_json::json!({"nama": "PT Sumber Makmur"}));
        assert!(validate_create_supplier(&input).is_ok());
    }

    #[test]
    fn test_npwp_and_phone_are_checked_when_present() {
        let bad_npwp = input(serde_json::json!({
            "nama": "PT Sumber Makmur",
            "npwp": "123"
        }));
        assert!(matches!(
            validate_create_supplier(&bad_npwp),
            Err(AppError::Validation { field, .. }) if field == "npwp"
        ));

        let bad_phone = input(serde_json::json!({
            "nama": "PT Sumber Makmur",
            "phone": "12"
        }));
        assert!(matches!(
            validate_create_supplier(&bad_phone),
            Err(AppError::Validation { field, .. }) if field == "phone"
        ));

        // formatted values pass once the separators are stripped
        let ok = input(serde_json::json!({
            "nama": "PT Sumber Makmur",
            "npwp": "01.234.567.8-901.000",
            "phone": "0812-3456-7890"
        }));
        assert!(validate_create_supplier(&ok).is_ok());
    }

    #[test]
    fn test_email_format_is_validated() {
        let bad = input(serde_json::json!({
            "nama": "PT Sumber Makmur",
            "email": "not-an-email"
        }));
        assert!(matches!(
            validate_create_supplier(&bad),
            Err(AppError::Validation { field, .. }) if field == "email"
        ));

        let ok = input(serde_json::json!({
            "nama": "PT Sumber Makmur",
            "email": "purchasing@sumbermakmur.co.id"
        }));
        assert!(validate_create_supplier(&ok).is_ok());
    }

    #[test]
    fn test_explicit_payment_terms_win_over_template() {
        let input = input(serde_json::json!({
            "nama": "PT Sumber Makmur",
            "payment_terms": [{"description": "DP 30%", "value": 30}],
            "payment_terms_template": "Net 14, Net 30"
        }));
        let terms = resolve_payment_terms(&input).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].description, "DP 30%");
        assert_eq!(terms[0].value, 30);
    }

    #[test]
    fn test_template_is_parsed_when_no_explicit_terms() {
        let input = input(serde_json::json!({
            "nama": "PT Sumber Makmur",
            "payment_terms_template": "Net 14, Net 30"
        }));
        let terms = resolve_payment_terms(&input).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].value, 14);
        assert_eq!(terms[1].value, 30);
    }

    #[test]
    fn test_no_terms_and_no_template_is_none() {
        let input = input(serde_json::json!({"nama": "PT Sumber Makmur"}));
        assert!(resolve_payment_terms(&input).is_none());
    }
}
