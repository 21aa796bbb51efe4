use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::features::geo::datastore::DataStore;
use crate::features::geo::dtos::{
    DistrictDto, DistrictGetQuery, DistrictListQuery, LocalitySummaryDto,
};
use crate::features::geo::models::{District, LocalityKind};
use crate::features::geo::services::query::{
    name_matches, paginate, project_fields, sort_records, validate_range, SortField,
};

const SORT_FIELDS: &[SortField<District>] = &[
    ("id", |a, b| a.id.cmp(&b.id)),
    ("provinceId", |a, b| a.province_id.cmp(&b.province_id)),
    ("name", |a, b| a.name.cmp(&b.name)),
    ("population", |a, b| a.population.cmp(&b.population)),
    ("area", |a, b| a.area.total_cmp(&b.area)),
];

/// Read-only queries over the district collection
pub struct DistrictService {
    store: Arc<DataStore>,
}

impl DistrictService {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn list(&self, query: &DistrictListQuery) -> Result<Vec<Value>> {
        validate_range(query.min_population, query.max_population, "population")?;
        validate_range(query.min_area, query.max_area, "area")?;

        let mut matches: Vec<&District> = self
            .store
            .districts()
            .iter()
            .filter(|d| {
                query
                    .name
                    .as_deref()
                    .is_none_or(|n| name_matches(&d.name, n))
            })
            .filter(|d| query.province_id.is_none_or(|p| d.province_id == p))
            .filter(|d| query.min_population.is_none_or(|min| d.population >= min))
            .filter(|d| query.max_population.is_none_or(|max| d.population <= max))
            .filter(|d| query.min_area.is_none_or(|min| d.area >= min))
            .filter(|d| query.max_area.is_none_or(|max| d.area <= max))
            .collect();

        if let Some(sort) = query.sort.as_deref() {
            sort_records(&mut matches, sort, SORT_FIELDS)?;
        }

        let page = paginate(matches, query.offset, query.limit)?;

        page.into_iter()
            .map(|district| {
                let dto = self.district_dto(district, false)?;
                let value = serde_json::to_value(dto)
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                Ok(project_fields(value, query.fields.as_deref()))
            })
            .collect()
    }

    pub fn get(&self, id: i64, query: &DistrictGetQuery) -> Result<Value> {
        let district = self
            .store
            .district_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("District with id '{}' not found", id)))?;

        let dto = self.district_dto(district, query.extend)?;
        let value = serde_json::to_value(dto).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(project_fields(value, query.fields.as_deref()))
    }

    fn district_dto(&self, district: &District, extend: bool) -> Result<DistrictDto> {
        // FKs are validated at load time, so a miss here means the store
        // itself is broken.
        let province = self
            .store
            .province_by_id(district.province_id)
            .ok_or_else(|| {
                AppError::DataIntegrity(format!(
                    "district {} references unknown province {}",
                    district.id, district.province_id
                ))
            })?;

        let mut dto = DistrictDto::new(district, province.name.clone());
        if extend {
            dto.neighborhoods = Some(self.locality_summaries(LocalityKind::Neighborhood, district.id));
            dto.villages = Some(self.locality_summaries(LocalityKind::Village, district.id));
            dto.towns = Some(self.locality_summaries(LocalityKind::Town, district.id));
        }
        Ok(dto)
    }

    fn locality_summaries(&self, kind: LocalityKind, district_id: i64) -> Vec<LocalitySummaryDto> {
        self.store
            .localities_of(kind, district_id)
            .iter()
            .map(LocalitySummaryDto::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_store;

    fn service() -> DistrictService {
        DistrictService::new(test_store())
    }

    #[test]
    fn lists_districts_with_province_names() {
        let result = service().list(&DistrictListQuery::default()).unwrap();
        assert!(!result.is_empty());
        assert!(result.iter().all(|d| d["province"].is_string()));
    }

    #[test]
    fn filters_by_province_id() {
        let query = DistrictListQuery {
            province_id: Some(1),
            ..Default::default()
        };
        let result = service().list(&query).unwrap();
        assert!(!result.is_empty());
        assert!(result.iter().all(|d| d["provinceId"] == 1));
        assert!(result.iter().all(|d| d["province"] == "Adana"));
    }

    #[test]
    fn result_size_is_min_of_limit_and_matches() {
        let svc = service();
        let all = svc.list(&DistrictListQuery::default()).unwrap();
        let limited = svc
            .list(&DistrictListQuery {
                limit: Some(5),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(limited.len(), all.len().min(5));
    }

    #[test]
    fn sorts_by_area_ascending() {
        let query = DistrictListQuery {
            sort: Some("area".to_string()),
            ..Default::default()
        };
        let result = service().list(&query).unwrap();
        let areas: Vec<f64> = result.iter().map(|d| d["area"].as_f64().unwrap()).collect();
        assert!(areas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn rejects_inverted_area_range() {
        let query = DistrictListQuery {
            min_area: Some(1000.0),
            max_area: Some(10.0),
            ..Default::default()
        };
        let err = service().list(&query).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange(_)));
    }

    #[test]
    fn get_returns_matching_id() {
        let svc = service();
        let first_id = svc.list(&DistrictListQuery::default()).unwrap()[0]["id"]
            .as_i64()
            .unwrap();
        let district = svc.get(first_id, &DistrictGetQuery::default()).unwrap();
        assert_eq!(district["id"], first_id);
        assert!(district.get("neighborhoods").is_none());
    }

    #[test]
    fn extended_get_attaches_localities() {
        let query = DistrictGetQuery {
            extend: true,
            ..Default::default()
        };
        // District 1 is Aladag in the bundled snapshot, which has all three
        // third-tier collections populated.
        let district = service().get(1, &query).unwrap();
        assert!(!district["neighborhoods"].as_array().unwrap().is_empty());
        assert!(!district["villages"].as_array().unwrap().is_empty());
        assert!(district["towns"].is_array());
    }

    #[test]
    fn get_fails_for_unknown_id() {
        let err = service()
            .get(999_999, &DistrictGetQuery::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
