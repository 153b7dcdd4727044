//! HTTP handlers for reference-data endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::{Category, Top};
use crate::services::reference::{ReferenceService, Uom};
use crate::AppState;

/// List all item categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let service = ReferenceService::new(state.db);
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// List all terms of payment
pub async fn list_tops(State(state): State<AppState>) -> AppResult<Json<Vec<Top>>> {
    let service = ReferenceService::new(state.db);
    let tops = service.list_tops().await?;
    Ok(Json(tops))
}

/// List all units of measure
pub async fn list_uoms(State(state): State<AppState>) -> AppResult<Json<Vec<Uom>>> {
    let service = ReferenceService::new(state.db);
    let uoms = service.list_uoms().await?;
    Ok(Json(uoms))
}
