use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::geo::models::{District, Locality, Province};

// ==================== Query Parameters ====================

/// Query parameters for the province list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceListQuery {
    /// Filter by name (case-insensitive, partial match)
    #[param(example = "ada")]
    pub name: Option<String>,
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub is_coastal: Option<bool>,
    pub is_metropolitan: Option<bool>,
    /// Sort field, prefix with '-' for descending
    #[param(example = "-population")]
    pub sort: Option<String>,
    /// Comma-separated list of fields to return
    #[param(example = "id,name,population")]
    pub fields: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for a single-province lookup
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceGetQuery {
    /// Attach neighborhoods, villages and towns to each district
    #[serde(default)]
    pub extend: bool,
    pub fields: Option<String>,
    /// Include the postal code, which is omitted by default
    #[serde(default)]
    pub activate_postal_codes: bool,
}

/// Query parameters for the district list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DistrictListQuery {
    pub name: Option<String>,
    pub province_id: Option<i64>,
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub sort: Option<String>,
    pub fields: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for a single-district lookup
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DistrictGetQuery {
    /// Attach the district's neighborhoods, villages and towns
    #[serde(default)]
    pub extend: bool,
    pub fields: Option<String>,
}

/// Query parameters for neighborhood/village/town list endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LocalityListQuery {
    pub name: Option<String>,
    pub province_id: Option<i64>,
    pub district_id: Option<i64>,
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
    pub sort: Option<String>,
    pub fields: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for a single neighborhood/village/town lookup
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LocalityGetQuery {
    pub fields: Option<String>,
}

// ==================== Response DTOs ====================

/// Bare locality as attached under a district
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalitySummaryDto {
    pub id: i64,
    pub name: String,
    pub population: i64,
}

impl From<&Locality> for LocalitySummaryDto {
    fn from(locality: &Locality) -> Self {
        Self {
            id: locality.id,
            name: locality.name.clone(),
            population: locality.population,
        }
    }
}

/// District as attached under a province. The third-tier collections are
/// present only on extended lookups.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistrictNodeDto {
    pub id: i64,
    pub name: String,
    pub population: i64,
    pub area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhoods: Option<Vec<LocalitySummaryDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub villages: Option<Vec<LocalitySummaryDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub towns: Option<Vec<LocalitySummaryDto>>,
}

impl From<&District> for DistrictNodeDto {
    fn from(district: &District) -> Self {
        Self {
            id: district.id,
            name: district.name.clone(),
            population: district.population,
            area: district.area,
            neighborhoods: None,
            villages: None,
            towns: None,
        }
    }
}

/// Full province response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceDto {
    pub id: i64,
    pub name: String,
    pub population: i64,
    pub area: f64,
    pub altitude: f64,
    pub is_coastal: bool,
    pub is_metropolitan: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub districts: Vec<DistrictNodeDto>,
}

impl ProvinceDto {
    pub fn new(province: &Province, districts: Vec<DistrictNodeDto>) -> Self {
        Self {
            id: province.id,
            name: province.name.clone(),
            population: province.population,
            area: province.area,
            altitude: province.altitude,
            is_coastal: province.is_coastal,
            is_metropolitan: province.is_metropolitan,
            // Excluded by default; the service fills it in only when the
            // caller explicitly activates postal codes.
            postal_code: None,
            districts,
        }
    }
}

/// District response shape for the /districts endpoints, with the parent
/// province name denormalized in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDto {
    pub id: i64,
    pub province_id: i64,
    pub province: String,
    pub name: String,
    pub population: i64,
    pub area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhoods: Option<Vec<LocalitySummaryDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub villages: Option<Vec<LocalitySummaryDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub towns: Option<Vec<LocalitySummaryDto>>,
}

impl DistrictDto {
    pub fn new(district: &District, province_name: String) -> Self {
        Self {
            id: district.id,
            province_id: district.province_id,
            province: province_name,
            name: district.name.clone(),
            population: district.population,
            area: district.area,
            neighborhoods: None,
            villages: None,
            towns: None,
        }
    }
}

/// Neighborhood/village/town response shape with both parent names
/// denormalized in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalityDto {
    pub id: i64,
    pub province_id: i64,
    pub province: String,
    pub district_id: i64,
    pub district: String,
    pub name: String,
    pub population: i64,
}

impl LocalityDto {
    pub fn new(locality: &Locality, province_name: String, district_name: String) -> Self {
        Self {
            id: locality.id,
            province_id: locality.province_id,
            province: province_name,
            district_id: locality.district_id,
            district: district_name,
            name: locality.name.clone(),
            population: locality.population,
        }
    }
}
