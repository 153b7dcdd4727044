//! Geographic reference API client
//!
//! Countries come from a REST Countries style endpoint; Indonesian
//! provinces and cities come from a wilayah.id style API. Both are
//! normalized to plain {code, name} rows for the address forms.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A normalized geographic reference row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

/// REST Countries row: {"cca2": "ID", "name": {"common": "Indonesia"}}
#[derive(Debug, Deserialize)]
struct RestCountry {
    cca2: String,
    name: RestCountryName,
}

#[derive(Debug, Deserialize)]
struct RestCountryName {
    common: String,
}

/// wilayah.id style envelope: {"data": [{"code": "11", "name": "Aceh"}]}
#[derive(Debug, Deserialize)]
struct WilayahResponse {
    data: Vec<Region>,
}

/// Parse a country listing body into normalized rows, sorted by name.
pub fn parse_countries(body: &str) -> AppResult<Vec<Region>> {
    let countries: Vec<RestCountry> = serde_json::from_str(body)
        .map_err(|e| AppError::RegionServiceError(format!("Unexpected country data: {}", e)))?;
    let mut regions: Vec<Region> = countries
        .into_iter()
        .map(|c| Region {
            code: c.cca2,
            name: c.name.common,
        })
        .collect();
    regions.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(regions)
}

/// Parse a wilayah envelope body into normalized rows.
pub fn parse_wilayah(body: &str) -> AppResult<Vec<Region>> {
    let response: WilayahResponse = serde_json::from_str(body)
        .map_err(|e| AppError::RegionServiceError(format!("Unexpected region data: {}", e)))?;
    Ok(response.data)
}

/// Geographic reference API client
#[derive(Clone)]
pub struct RegionsClient {
    client: Client,
    countries_url: String,
    wilayah_base_url: String,
}

impl RegionsClient {
    /// Create a new RegionsClient
    pub fn new(countries_url: String, wilayah_base_url: String) -> Self {
        Self {
            client: Client::new(),
            countries_url,
            wilayah_base_url,
        }
    }

    /// Fetch the country listing
    pub async fn get_countries(&self) -> AppResult<Vec<Region>> {
        let body = self.fetch(&self.countries_url).await?;
        parse_countries(&body)
    }

    /// Fetch the Indonesian province listing
    pub async fn get_provinces(&self) -> AppResult<Vec<Region>> {
        let url = format!(
            "{}/provinces.json",
            self.wilayah_base_url.trim_end_matches('/')
        );
        let body = self.fetch(&url).await?;
        parse_wilayah(&body)
    }

    /// Fetch the cities of one province by province code
    pub async fn get_cities(&self, province_code: &str) -> AppResult<Vec<Region>> {
        let url = format!(
            "{}/regencies/{}.json",
            self.wilayah_base_url.trim_end_matches('/'),
            province_code
        );
        let body = self.fetch(&url).await?;
        parse_wilayah(&body)
    }

    async fn fetch(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::RegionServiceError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::RegionServiceError(format!(
                "Upstream returned {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::RegionServiceError(format!("Failed to read response: {}", e)))
    }
}
