//! HTTP handlers for purchase transaction endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::PurchaseTransaction;
use crate::services::TransactionService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    pub item_code: Option<String>,
}

/// Purchase history, newest first, optionally for one item
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<Vec<PurchaseTransaction>>> {
    let service = TransactionService::new(state.db);
    let transactions = service
        .list_transactions(query.item_code.as_deref())
        .await?;
    Ok(Json(transactions))
}
