use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::features::geo::datastore::DataStore;
use crate::features::geo::dtos::{LocalityDto, LocalityGetQuery, LocalityListQuery};
use crate::features::geo::models::{Locality, LocalityKind};
use crate::features::geo::services::query::{
    name_matches, paginate, project_fields, sort_records, validate_range, SortField,
};

const SORT_FIELDS: &[SortField<Locality>] = &[
    ("id", |a, b| a.id.cmp(&b.id)),
    ("provinceId", |a, b| a.province_id.cmp(&b.province_id)),
    ("districtId", |a, b| a.district_id.cmp(&b.district_id)),
    ("name", |a, b| a.name.cmp(&b.name)),
    ("population", |a, b| a.population.cmp(&b.population)),
];

/// Read-only queries over one third-tier collection. Neighborhoods,
/// villages and towns share a shape, so one service handles all three;
/// `kind` picks the collection.
pub struct LocalityService {
    store: Arc<DataStore>,
    kind: LocalityKind,
}

impl LocalityService {
    pub fn new(store: Arc<DataStore>, kind: LocalityKind) -> Self {
        Self { store, kind }
    }

    pub fn list(&self, query: &LocalityListQuery) -> Result<Vec<Value>> {
        validate_range(query.min_population, query.max_population, "population")?;

        let mut matches: Vec<&Locality> = self
            .store
            .localities(self.kind)
            .iter()
            .filter(|l| {
                query
                    .name
                    .as_deref()
                    .is_none_or(|n| name_matches(&l.name, n))
            })
            .filter(|l| query.province_id.is_none_or(|p| l.province_id == p))
            .filter(|l| query.district_id.is_none_or(|d| l.district_id == d))
            .filter(|l| query.min_population.is_none_or(|min| l.population >= min))
            .filter(|l| query.max_population.is_none_or(|max| l.population <= max))
            .collect();

        if let Some(sort) = query.sort.as_deref() {
            sort_records(&mut matches, sort, SORT_FIELDS)?;
        }

        let page = paginate(matches, query.offset, query.limit)?;

        page.into_iter()
            .map(|locality| {
                let dto = self.locality_dto(locality)?;
                let value = serde_json::to_value(dto)
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                Ok(project_fields(value, query.fields.as_deref()))
            })
            .collect()
    }

    pub fn get(&self, id: i64, query: &LocalityGetQuery) -> Result<Value> {
        let locality = self.store.locality_by_id(self.kind, id).ok_or_else(|| {
            AppError::NotFound(format!(
                "{} with id '{}' not found",
                self.kind.label(),
                id
            ))
        })?;

        let dto = self.locality_dto(locality)?;
        let value = serde_json::to_value(dto).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(project_fields(value, query.fields.as_deref()))
    }

    fn locality_dto(&self, locality: &Locality) -> Result<LocalityDto> {
        let province = self
            .store
            .province_by_id(locality.province_id)
            .ok_or_else(|| {
                AppError::DataIntegrity(format!(
                    "{} {} references unknown province {}",
                    self.kind.label(),
                    locality.id,
                    locality.province_id
                ))
            })?;
        let district = self
            .store
            .district_by_id(locality.district_id)
            .ok_or_else(|| {
                AppError::DataIntegrity(format!(
                    "{} {} references unknown district {}",
                    self.kind.label(),
                    locality.id,
                    locality.district_id
                ))
            })?;

        Ok(LocalityDto::new(
            locality,
            province.name.clone(),
            district.name.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_store;

    fn neighborhoods() -> LocalityService {
        LocalityService::new(test_store(), LocalityKind::Neighborhood)
    }

    #[test]
    fn lists_with_parent_names_attached() {
        let result = neighborhoods().list(&LocalityListQuery::default()).unwrap();
        assert!(!result.is_empty());
        assert!(result
            .iter()
            .all(|n| n["province"].is_string() && n["district"].is_string()));
    }

    #[test]
    fn filters_by_district_id() {
        let svc = neighborhoods();
        let first = &svc.list(&LocalityListQuery::default()).unwrap()[0];
        let district_id = first["districtId"].as_i64().unwrap();

        let query = LocalityListQuery {
            district_id: Some(district_id),
            ..Default::default()
        };
        let result = svc.list(&query).unwrap();
        assert!(!result.is_empty());
        assert!(result.iter().all(|n| n["districtId"] == district_id));
    }

    #[test]
    fn each_kind_reads_its_own_collection() {
        let store = test_store();
        for kind in [
            LocalityKind::Neighborhood,
            LocalityKind::Village,
            LocalityKind::Town,
        ] {
            let svc = LocalityService::new(Arc::clone(&store), kind);
            let result = svc.list(&LocalityListQuery::default()).unwrap();
            assert_eq!(result.len(), store.localities(kind).len());
        }
    }

    #[test]
    fn get_round_trips_the_id() {
        let svc = neighborhoods();
        let id = svc.list(&LocalityListQuery::default()).unwrap()[0]["id"]
            .as_i64()
            .unwrap();
        let record = svc.get(id, &LocalityGetQuery::default()).unwrap();
        assert_eq!(record["id"], id);
    }

    #[test]
    fn not_found_error_names_the_collection() {
        let svc = LocalityService::new(test_store(), LocalityKind::Village);
        let err = svc.get(999_999, &LocalityGetQuery::default()).unwrap_err();
        match err {
            AppError::NotFound(msg) => assert!(msg.contains("Village")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn stable_sort_keeps_dataset_order_on_ties() {
        let svc = neighborhoods();
        let unsorted = svc.list(&LocalityListQuery::default()).unwrap();
        let query = LocalityListQuery {
            sort: Some("provinceId".to_string()),
            ..Default::default()
        };
        let sorted = svc.list(&query).unwrap();

        // Within one province the original order must survive the sort.
        let province_id = unsorted[0]["provinceId"].as_i64().unwrap();
        let within: Vec<&Value> = sorted
            .iter()
            .filter(|n| n["provinceId"] == province_id)
            .map(|n| &n["id"])
            .collect();
        let expected: Vec<&Value> = unsorted
            .iter()
            .filter(|n| n["provinceId"] == province_id)
            .map(|n| &n["id"])
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(within, expected);
    }
}
