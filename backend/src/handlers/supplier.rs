//! HTTP handlers for supplier registry endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::models::Supplier;
use crate::services::supplier::{CreateSupplierInput, SupplierService};
use crate::AppState;

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}

/// Get one supplier by code
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_code): Path<String>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get_supplier(&supplier_code).await?;
    Ok(Json(supplier))
}

/// Register a Non-ERP supplier.
///
/// A malformed body degrades to an empty input and fails field validation,
/// so the client always gets a 400 with a named field rather than a bare
/// deserialization error.
pub async fn create_supplier(
    State(state): State<AppState>,
    body: Option<Json<CreateSupplierInput>>,
) -> AppResult<Json<Supplier>> {
    let input = body.map(|Json(input)| input).unwrap_or_default();
    let service = SupplierService::new(state.db);
    let supplier = service.create_supplier(input).await?;
    Ok(Json(supplier))
}
