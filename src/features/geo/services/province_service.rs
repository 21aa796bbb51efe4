use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::features::geo::datastore::DataStore;
use crate::features::geo::dtos::{
    DistrictNodeDto, LocalitySummaryDto, ProvinceDto, ProvinceGetQuery, ProvinceListQuery,
};
use crate::features::geo::models::{District, LocalityKind, Province};
use crate::features::geo::services::query::{
    name_matches, paginate, project_fields, sort_records, validate_range, SortField,
};

const SORT_FIELDS: &[SortField<Province>] = &[
    ("id", |a, b| a.id.cmp(&b.id)),
    ("name", |a, b| a.name.cmp(&b.name)),
    ("population", |a, b| a.population.cmp(&b.population)),
    ("area", |a, b| a.area.total_cmp(&b.area)),
    ("altitude", |a, b| a.altitude.total_cmp(&b.altitude)),
];

/// Read-only queries over the province collection
pub struct ProvinceService {
    store: Arc<DataStore>,
}

impl ProvinceService {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// List provinces: filter, sort, paginate, attach district summaries,
    /// then project fields.
    pub fn list(&self, query: &ProvinceListQuery) -> Result<Vec<Value>> {
        validate_range(query.min_population, query.max_population, "population")?;
        validate_range(query.min_area, query.max_area, "area")?;

        let mut matches: Vec<&Province> = self
            .store
            .provinces()
            .iter()
            .filter(|p| {
                query
                    .name
                    .as_deref()
                    .is_none_or(|n| name_matches(&p.name, n))
            })
            .filter(|p| query.min_population.is_none_or(|min| p.population >= min))
            .filter(|p| query.max_population.is_none_or(|max| p.population <= max))
            .filter(|p| query.min_area.is_none_or(|min| p.area >= min))
            .filter(|p| query.max_area.is_none_or(|max| p.area <= max))
            .filter(|p| query.is_coastal.is_none_or(|c| p.is_coastal == c))
            .filter(|p| query.is_metropolitan.is_none_or(|m| p.is_metropolitan == m))
            .collect();

        if let Some(sort) = query.sort.as_deref() {
            sort_records(&mut matches, sort, SORT_FIELDS)?;
        }

        let page = paginate(matches, query.offset, query.limit)?;

        page.into_iter()
            .map(|province| {
                let districts = self
                    .store
                    .districts_of(province.id)
                    .iter()
                    .map(DistrictNodeDto::from)
                    .collect();
                let dto = ProvinceDto::new(province, districts);
                let value = serde_json::to_value(dto)
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                Ok(project_fields(value, query.fields.as_deref()))
            })
            .collect()
    }

    /// Exact lookup by id. `extend` recurses into each district's
    /// neighborhoods, villages and towns; the postal code is attached only
    /// when explicitly activated.
    pub fn get(&self, id: i64, query: &ProvinceGetQuery) -> Result<Value> {
        let province = self
            .store
            .province_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Province with id '{}' not found", id)))?;

        let districts = self
            .store
            .districts_of(id)
            .iter()
            .map(|district| self.district_node(district, query.extend))
            .collect();

        let mut dto = ProvinceDto::new(province, districts);
        if query.activate_postal_codes {
            dto.postal_code = province.postal_code.clone();
        }

        let value = serde_json::to_value(dto).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(project_fields(value, query.fields.as_deref()))
    }

    fn district_node(&self, district: &District, extend: bool) -> DistrictNodeDto {
        let mut node = DistrictNodeDto::from(district);
        if extend {
            node.neighborhoods = Some(self.locality_summaries(LocalityKind::Neighborhood, district.id));
            node.villages = Some(self.locality_summaries(LocalityKind::Village, district.id));
            node.towns = Some(self.locality_summaries(LocalityKind::Town, district.id));
        }
        node
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

    fn service() -> ProvinceService {
        ProvinceService::new(test_store())
    }

    #[test]
    fn returns_all_81_provinces_by_default() {
        let result = service().list(&ProvinceListQuery::default()).unwrap();
        assert_eq!(result.len(), 81);
    }

    #[test]
    fn filters_by_name_case_insensitively() {
        let query = ProvinceListQuery {
            name: Some("adana".to_string()),
            ..Default::default()
        };
        let result = service().list(&query).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["name"], "Adana");
    }

    #[test]
    fn filters_by_population_range() {
        let query = ProvinceListQuery {
            min_population: Some(500_000),
            max_population: Some(2_000_000),
            ..Default::default()
        };
        let result = service().list(&query).unwrap();
        assert!(!result.is_empty());
        for province in &result {
            let population = province["population"].as_i64().unwrap();
            assert!((500_000..=2_000_000).contains(&population));
        }
    }

    #[test]
    fn rejects_inverted_population_range() {
        let query = ProvinceListQuery {
            min_population: Some(2_000_000),
            max_population: Some(500_000),
            ..Default::default()
        };
        let err = service().list(&query).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange(_)));
    }

    #[test]
    fn boolean_filters_partition_the_collection() {
        let svc = service();
        let coastal = svc
            .list(&ProvinceListQuery {
                is_coastal: Some(true),
                ..Default::default()
            })
            .unwrap();
        let inland = svc
            .list(&ProvinceListQuery {
                is_coastal: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(coastal.len() + inland.len(), 81);
        assert!(coastal.iter().all(|p| p["isCoastal"] == true));
        assert!(inland.iter().all(|p| p["isCoastal"] == false));
    }

    #[test]
    fn sorts_descending_with_limit() {
        let query = ProvinceListQuery {
            sort: Some("-population".to_string()),
            limit: Some(10),
            ..Default::default()
        };
        let result = service().list(&query).unwrap();
        assert_eq!(result.len(), 10);
        let populations: Vec<i64> = result
            .iter()
            .map(|p| p["population"].as_i64().unwrap())
            .collect();
        assert!(populations.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn reversing_sort_direction_reverses_order() {
        let svc = service();
        let asc = svc
            .list(&ProvinceListQuery {
                sort: Some("id".to_string()),
                ..Default::default()
            })
            .unwrap();
        let mut desc = svc
            .list(&ProvinceListQuery {
                sort: Some("-id".to_string()),
                ..Default::default()
            })
            .unwrap();
        desc.reverse();
        assert_eq!(
            asc.iter().map(|p| &p["id"]).collect::<Vec<_>>(),
            desc.iter().map(|p| &p["id"]).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rejects_unknown_sort_field() {
        let query = ProvinceListQuery {
            sort: Some("invalid_field".to_string()),
            ..Default::default()
        };
        let err = service().list(&query).unwrap_err();
        assert!(matches!(err, AppError::InvalidSortField(_)));
    }

    #[test]
    fn respects_offset_and_limit() {
        let svc = service();
        let all = svc.list(&ProvinceListQuery::default()).unwrap();
        let page = svc
            .list(&ProvinceListQuery {
                offset: Some(10),
                limit: Some(10),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0]["id"], all[10]["id"]);
    }

    #[test]
    fn projects_requested_fields_only() {
        let query = ProvinceListQuery {
            fields: Some("id,name,population".to_string()),
            limit: Some(1),
            ..Default::default()
        };
        let result = service().list(&query).unwrap();
        let keys: Vec<&String> = result[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(["id", "name", "population"]
            .iter()
            .all(|k| result[0].get(k).is_some()));
    }

    #[test]
    fn projection_can_select_attached_districts() {
        let query = ProvinceListQuery {
            fields: Some("name, districts".to_string()),
            limit: Some(1),
            ..Default::default()
        };
        let result = service().list(&query).unwrap();
        assert_eq!(result[0].as_object().unwrap().len(), 2);
        assert!(result[0]["districts"].is_array());
    }

    #[test]
    fn list_attaches_district_summaries() {
        let result = service()
            .list(&ProvinceListQuery {
                limit: Some(1),
                ..Default::default()
            })
            .unwrap();
        let districts = result[0]["districts"].as_array().unwrap();
        assert!(!districts.is_empty());
        // Shallow attachment: no third-tier collections on list responses.
        assert!(districts[0].get("neighborhoods").is_none());
    }

    #[test]
    fn get_returns_adana_for_id_1() {
        let province = service().get(1, &ProvinceGetQuery::default()).unwrap();
        assert_eq!(province["id"], 1);
        assert_eq!(province["name"], "Adana");
    }

    #[test]
    fn get_fails_with_not_found_for_unknown_id() {
        let err = service().get(999, &ProvinceGetQuery::default()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn extended_get_recurses_into_districts() {
        let query = ProvinceGetQuery {
            extend: true,
            ..Default::default()
        };
        let province = service().get(1, &query).unwrap();
        let districts = province["districts"].as_array().unwrap();
        assert!(!districts.is_empty());
        for district in districts {
            assert!(!district["neighborhoods"].as_array().unwrap().is_empty());
            assert!(!district["villages"].as_array().unwrap().is_empty());
            assert!(district["towns"].is_array());
        }
    }

    #[test]
    fn postal_code_is_opt_in() {
        let svc = service();
        let plain = svc.get(1, &ProvinceGetQuery::default()).unwrap();
        assert!(plain.get("postalCode").is_none());

        let with_postal = svc
            .get(
                1,
                &ProvinceGetQuery {
                    activate_postal_codes: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(with_postal["postalCode"].is_string());
    }
}
