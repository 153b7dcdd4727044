//! HTTP handlers for the material request dashboard

use axum::{extract::State, http::header, response::IntoResponse, Json};
use axum_extra::extract::Query;

use crate::error::AppResult;
use crate::handlers::material_request::MrFilterParams;
use crate::services::material_request::MaterialRequestService;
use crate::AppState;
use shared::summary::MrDashboard;

/// Filtered request list plus every aggregation in one response
pub async fn material_request_dashboard(
    State(state): State<AppState>,
    Query(params): Query<MrFilterParams>,
) -> AppResult<Json<MrDashboard>> {
    let filter = params.into_filter()?;
    let service = MaterialRequestService::new(state.db);
    let dashboard = service.dashboard(&filter, &state.config.tables).await?;
    Ok(Json(dashboard))
}

/// The same filtered rows as a CSV download
pub async fn export_material_requests(
    State(state): State<AppState>,
    Query(params): Query<MrFilterParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let service = MaterialRequestService::new(state.db);
    let csv = service.export_csv(&filter, &state.config.tables).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"material-requests.csv\"",
            ),
        ],
        csv,
    ))
}
