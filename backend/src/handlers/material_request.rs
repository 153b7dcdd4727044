//! HTTP handlers for material request endpoints

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::AutomationClient;
use crate::models::{parse_erp_date, MaterialRequest};
use crate::services::material_request::{MakePoInput, MakePoResponse, MaterialRequestService};
use crate::AppState;
use shared::filter::{MrFilter, StatusFilter};

/// Dashboard filter as it arrives on the query string. `status` may repeat;
/// axum's plain Query rejects repeated keys, hence axum-extra.
#[derive(Debug, Default, Deserialize)]
pub struct MrFilterParams {
    #[serde(default)]
    pub status: Vec<String>,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub cost_center: Option<String>,
    pub project: Option<String>,
    pub request_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub required_start: Option<String>,
    pub required_end: Option<String>,
}

fn parse_date_param(field: &'static str, raw: Option<String>) -> AppResult<Option<NaiveDate>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_erp_date(s).map(Some).ok_or_else(|| AppError::Validation {
            field: field.to_string(),
            message: format!("Invalid date: {}", s),
            message_id: format!("Tanggal tidak valid: {}", s),
        }),
    }
}

impl MrFilterParams {
    /// Convert raw query parameters into the shared filter. Blank status
    /// entries are dropped the way the previous dashboard coerced falsy
    /// values; an invalid date parameter is a 400.
    pub fn into_filter(self) -> AppResult<MrFilter> {
        let mut statuses: Vec<String> = self
            .status
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        let status = match statuses.len() {
            0 => None,
            1 => statuses.pop().map(StatusFilter::One),
            _ => Some(StatusFilter::Many(statuses)),
        };

        Ok(MrFilter {
            status,
            branch: self.branch,
            department: self.department,
            cost_center: self.cost_center,
            project: self.project,
            request_type: self.request_type,
            start_date: parse_date_param("start_date", self.start_date)?,
            end_date: parse_date_param("end_date", self.end_date)?,
            required_start: parse_date_param("required_start", self.required_start)?,
            required_end: parse_date_param("required_end", self.required_end)?,
        })
    }
}

/// List open material requests matching the filter
pub async fn list_material_requests(
    State(state): State<AppState>,
    Query(params): Query<MrFilterParams>,
) -> AppResult<Json<Vec<MaterialRequest>>> {
    let filter = params.into_filter()?;
    let service = MaterialRequestService::new(state.db);
    let requests = service.list_open(&filter, &state.config.tables).await?;
    Ok(Json(requests))
}

/// Flag outstanding lines as PO'd and notify the automation.
///
/// A malformed body degrades to an empty input, which fails item_codes
/// validation with a 400.
pub async fn make_po(
    State(state): State<AppState>,
    body: Option<Json<MakePoInput>>,
) -> AppResult<Json<MakePoResponse>> {
    let input = body.map(|Json(input)| input).unwrap_or_default();
    let automation = AutomationClient::new(
        state.config.automation.base_url.clone(),
        state.config.automation.webhook_id.clone(),
    );
    let service = MaterialRequestService::new(state.db);
    let result = service.make_po(input, &automation).await?;
    Ok(Json(result))
}
