mod geo_dto;

pub use geo_dto::{
    DistrictDto, DistrictGetQuery, DistrictListQuery, DistrictNodeDto, LocalityDto,
    LocalityGetQuery, LocalityListQuery, LocalitySummaryDto, ProvinceDto, ProvinceGetQuery,
    ProvinceListQuery,
};
