mod district_service;
mod locality_service;
mod province_service;
pub mod query;

pub use district_service::DistrictService;
pub use locality_service::LocalityService;
pub use province_service::ProvinceService;
