//! HTTP handlers for the geographic reference proxy

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::external::regions::Region;
use crate::external::RegionsClient;
use crate::AppState;

fn regions_client(state: &AppState) -> RegionsClient {
    RegionsClient::new(
        state.config.regions.countries_url.clone(),
        state.config.regions.wilayah_base_url.clone(),
    )
}

/// List countries, normalized to {code, name}
pub async fn list_countries(State(state): State<AppState>) -> AppResult<Json<Vec<Region>>> {
    let countries = regions_client(&state).get_countries().await?;
    Ok(Json(countries))
}

/// List Indonesian provinces
pub async fn list_provinces(State(state): State<AppState>) -> AppResult<Json<Vec<Region>>> {
    let provinces = regions_client(&state).get_provinces().await?;
    Ok(Json(provinces))
}

/// List cities and regencies of one province
pub async fn list_cities(
    State(state): State<AppState>,
    Path(province_code): Path<String>,
) -> AppResult<Json<Vec<Region>>> {
    let cities = regions_client(&state).get_cities(&province_code).await?;
    Ok(Json(cities))
}
