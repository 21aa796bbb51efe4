use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::geo::datastore::DataStore;
use crate::features::geo::handlers;
use crate::features::geo::models::LocalityKind;
use crate::features::geo::services::{DistrictService, LocalityService, ProvinceService};

/// Create routes for the geo feature, one sub-router per collection so each
/// carries its own service as state.
pub fn routes(store: Arc<DataStore>) -> Router {
    let province_service = Arc::new(ProvinceService::new(Arc::clone(&store)));
    let district_service = Arc::new(DistrictService::new(Arc::clone(&store)));
    let neighborhood_service = Arc::new(LocalityService::new(
        Arc::clone(&store),
        LocalityKind::Neighborhood,
    ));
    let village_service = Arc::new(LocalityService::new(
        Arc::clone(&store),
        LocalityKind::Village,
    ));
    let town_service = Arc::new(LocalityService::new(store, LocalityKind::Town));

    Router::new()
        .merge(
            Router::new()
                .route("/api/v1/provinces", get(handlers::list_provinces))
                .route("/api/v1/provinces/{id}", get(handlers::get_province))
                .with_state(province_service),
        )
        .merge(
            Router::new()
                .route("/api/v1/districts", get(handlers::list_districts))
                .route("/api/v1/districts/{id}", get(handlers::get_district))
                .with_state(district_service),
        )
        .merge(
            Router::new()
                .route("/api/v1/neighborhoods", get(handlers::list_neighborhoods))
                .route("/api/v1/neighborhoods/{id}", get(handlers::get_neighborhood))
                .with_state(neighborhood_service),
        )
        .merge(
            Router::new()
                .route("/api/v1/villages", get(handlers::list_villages))
                .route("/api/v1/villages/{id}", get(handlers::get_village))
                .with_state(village_service),
        )
        .merge(
            Router::new()
                .route("/api/v1/towns", get(handlers::list_towns))
                .route("/api/v1/towns/{id}", get(handlers::get_town))
                .with_state(town_service),
        )
}
