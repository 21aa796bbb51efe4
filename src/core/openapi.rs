use utoipa::{Modify, OpenApi};

use crate::features::geo::{dtos as geo_dtos, handlers as geo_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Provinces
        geo_handlers::list_provinces,
        geo_handlers::get_province,
        // Districts
        geo_handlers::list_districts,
        geo_handlers::get_district,
        // Neighborhoods
        geo_handlers::list_neighborhoods,
        geo_handlers::get_neighborhood,
        // Villages
        geo_handlers::list_villages,
        geo_handlers::get_village,
        // Towns
        geo_handlers::list_towns,
        geo_handlers::get_town,
    ),
    components(schemas(
        ApiResponse<serde_json::Value>,
        Meta,
        geo_dtos::ProvinceDto,
        geo_dtos::DistrictDto,
        geo_dtos::DistrictNodeDto,
        geo_dtos::LocalityDto,
        geo_dtos::LocalitySummaryDto,
    )),
    tags(
        (name = "provinces", description = "Province reference data"),
        (name = "districts", description = "District reference data"),
        (name = "neighborhoods", description = "Neighborhood reference data"),
        (name = "villages", description = "Village reference data"),
        (name = "towns", description = "Town reference data"),
    )
)]
pub struct ApiDoc;

pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
