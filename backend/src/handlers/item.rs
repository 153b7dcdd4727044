//! HTTP handlers for item master endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::models::Item;
use crate::services::{ItemService, TransactionService};
use crate::AppState;
use shared::pricing::SupplierPrice;

/// List all items with warehouse stock
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.db);
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Per-supplier price summary for one item
pub async fn price_comparison(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> AppResult<Json<Vec<SupplierPrice>>> {
    let service = TransactionService::new(state.db);
    let prices = service.price_comparison(&item_code).await?;
    Ok(Json(prices))
}
