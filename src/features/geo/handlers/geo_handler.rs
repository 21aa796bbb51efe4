use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::core::error::Result;
use crate::features::geo::dtos::{
    DistrictGetQuery, DistrictListQuery, LocalityGetQuery, LocalityListQuery, ProvinceGetQuery,
    ProvinceListQuery,
};
use crate::features::geo::services::{DistrictService, LocalityService, ProvinceService};
use crate::shared::types::{ApiResponse, Meta};

fn list_response(data: Vec<Value>) -> Json<ApiResponse<Vec<Value>>> {
    let total = data.len() as i64;
    Json(ApiResponse::success(Some(data), None, Some(Meta { total })))
}

// ==================== Province Handlers ====================

/// List provinces
#[utoipa::path(
    get,
    path = "/api/v1/provinces",
    params(ProvinceListQuery),
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<Value>>),
        (status = 400, description = "Invalid sort field or pagination parameter"),
        (status = 404, description = "Invalid range filter")
    ),
    tag = "provinces"
)]
pub async fn list_provinces(
    State(service): State<Arc<ProvinceService>>,
    Query(query): Query<ProvinceListQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let provinces = service.list(&query)?;
    Ok(list_response(provinces))
}

/// Get a province by id
#[utoipa::path(
    get,
    path = "/api/v1/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province id (license-plate code, 1-81)"),
        ProvinceGetQuery
    ),
    responses(
        (status = 200, description = "Province details", body = ApiResponse<Value>),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces"
)]
pub async fn get_province(
    State(service): State<Arc<ProvinceService>>,
    Path(id): Path<i64>,
    Query(query): Query<ProvinceGetQuery>,
) -> Result<Json<ApiResponse<Value>>> {
    let province = service.get(id, &query)?;
    Ok(Json(ApiResponse::success(Some(province), None, None)))
}

// ==================== District Handlers ====================

/// List districts
#[utoipa::path(
    get,
    path = "/api/v1/districts",
    params(DistrictListQuery),
    responses(
        (status = 200, description = "List of districts", body = ApiResponse<Vec<Value>>),
        (status = 400, description = "Invalid sort field or pagination parameter"),
        (status = 404, description = "Invalid range filter")
    ),
    tag = "districts"
)]
pub async fn list_districts(
    State(service): State<Arc<DistrictService>>,
    Query(query): Query<DistrictListQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let districts = service.list(&query)?;
    Ok(list_response(districts))
}

/// Get a district by id
#[utoipa::path(
    get,
    path = "/api/v1/districts/{id}",
    params(
        ("id" = i64, Path, description = "District id"),
        DistrictGetQuery
    ),
    responses(
        (status = 200, description = "District details", body = ApiResponse<Value>),
        (status = 404, description = "District not found")
    ),
    tag = "districts"
)]
pub async fn get_district(
    State(service): State<Arc<DistrictService>>,
    Path(id): Path<i64>,
    Query(query): Query<DistrictGetQuery>,
) -> Result<Json<ApiResponse<Value>>> {
    let district = service.get(id, &query)?;
    Ok(Json(ApiResponse::success(Some(district), None, None)))
}

// ==================== Neighborhood Handlers ====================

/// List neighborhoods
#[utoipa::path(
    get,
    path = "/api/v1/neighborhoods",
    params(LocalityListQuery),
    responses(
        (status = 200, description = "List of neighborhoods", body = ApiResponse<Vec<Value>>),
        (status = 400, description = "Invalid sort field or pagination parameter"),
        (status = 404, description = "Invalid range filter")
    ),
    tag = "neighborhoods"
)]
pub async fn list_neighborhoods(
    State(service): State<Arc<LocalityService>>,
    Query(query): Query<LocalityListQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let neighborhoods = service.list(&query)?;
    Ok(list_response(neighborhoods))
}

/// Get a neighborhood by id
#[utoipa::path(
    get,
    path = "/api/v1/neighborhoods/{id}",
    params(
        ("id" = i64, Path, description = "Neighborhood id"),
        LocalityGetQuery
    ),
    responses(
        (status = 200, description = "Neighborhood details", body = ApiResponse<Value>),
        (status = 404, description = "Neighborhood not found")
    ),
    tag = "neighborhoods"
)]
pub async fn get_neighborhood(
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<i64>,
    Query(query): Query<LocalityGetQuery>,
) -> Result<Json<ApiResponse<Value>>> {
    let neighborhood = service.get(id, &query)?;
    Ok(Json(ApiResponse::success(Some(neighborhood), None, None)))
}

// ==================== Village Handlers ====================

/// List villages
#[utoipa::path(
    get,
    path = "/api/v1/villages",
    params(LocalityListQuery),
    responses(
        (status = 200, description = "List of villages", body = ApiResponse<Vec<Value>>),
        (status = 400, description = "Invalid sort field or pagination parameter"),
        (status = 404, description = "Invalid range filter")
    ),
    tag = "villages"
)]
pub async fn list_villages(
    State(service): State<Arc<LocalityService>>,
    Query(query): Query<LocalityListQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let villages = service.list(&query)?;
    Ok(list_response(villages))
}

/// Get a village by id
#[utoipa::path(
    get,
    path = "/api/v1/villages/{id}",
    params(
        ("id" = i64, Path, description = "Village id"),
        LocalityGetQuery
    ),
    responses(
        (status = 200, description = "Village details", body = ApiResponse<Value>),
        (status = 404, description = "Village not found")
    ),
    tag = "villages"
)]
pub async fn get_village(
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<i64>,
    Query(query): Query<LocalityGetQuery>,
) -> Result<Json<ApiResponse<Value>>> {
    let village = service.get(id, &query)?;
    Ok(Json(ApiResponse::success(Some(village), None, None)))
}

// ==================== Town Handlers ====================

/// List towns
#[utoipa::path(
    get,
    path = "/api/v1/towns",
    params(LocalityListQuery),
    responses(
        (status = 200, description = "List of towns", body = ApiResponse<Vec<Value>>),
        (status = 400, description = "Invalid sort field or pagination parameter"),
        (status = 404, description = "Invalid range filter")
    ),
    tag = "towns"
)]
pub async fn list_towns(
    State(service): State<Arc<LocalityService>>,
    Query(query): Query<LocalityListQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let towns = service.list(&query)?;
    Ok(list_response(towns))
}

/// Get a town by id
#[utoipa::path(
    get,
    path = "/api/v1/towns/{id}",
    params(
        ("id" = i64, Path, description = "Town id"),
        LocalityGetQuery
    ),
    responses(
        (status = 200, description = "Town details", body = ApiResponse<Value>),
        (status = 404, description = "Town not found")
    ),
    tag = "towns"
)]
pub async fn get_town(
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<i64>,
    Query(query): Query<LocalityGetQuery>,
) -> Result<Json<ApiResponse<Value>>> {
    let town = service.get(id, &query)?;
    Ok(Json(ApiResponse::success(Some(town), None, None)))
}
