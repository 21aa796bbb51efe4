use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::core::error::{AppError, Result};
use crate::features::geo::models::{District, Locality, LocalityKind, Province};
use crate::shared::constants::PROVINCE_COUNT;

/// In-memory snapshot of the whole dataset plus its lookup indices.
///
/// Built exactly once, before the server starts accepting requests, and
/// shared behind an `Arc`. Everything here is read-only after `load`
/// returns, so concurrent request handlers read it without locking.
#[derive(Debug)]
pub struct DataStore {
    provinces: Vec<Province>,
    districts: Vec<District>,
    neighborhoods: Vec<Locality>,
    villages: Vec<Locality>,
    towns: Vec<Locality>,

    province_pos: HashMap<i64, usize>,
    district_pos: HashMap<i64, usize>,
    neighborhood_pos: HashMap<i64, usize>,
    village_pos: HashMap<i64, usize>,
    town_pos: HashMap<i64, usize>,

    districts_by_province: HashMap<i64, Vec<District>>,
    neighborhoods_by_district: HashMap<i64, Vec<Locality>>,
    villages_by_district: HashMap<i64, Vec<Locality>>,
    towns_by_district: HashMap<i64, Vec<Locality>>,
}

impl DataStore {
    /// Read the five collections from `dir`, validate referential integrity
    /// and build the parent -> children indices. Any inconsistency is fatal:
    /// the caller is expected to abort startup rather than serve a partial
    /// dataset.
    pub fn load(dir: &Path) -> Result<Self> {
        let provinces: Vec<Province> = read_collection(dir, "provinces.json")?;
        let districts: Vec<District> = read_collection(dir, "districts.json")?;
        let neighborhoods: Vec<Locality> = read_collection(dir, "neighborhoods.json")?;
        let villages: Vec<Locality> = read_collection(dir, "villages.json")?;
        let towns: Vec<Locality> = read_collection(dir, "towns.json")?;

        if provinces.len() != PROVINCE_COUNT {
            return Err(AppError::DataIntegrity(format!(
                "expected {} provinces, found {}",
                PROVINCE_COUNT,
                provinces.len()
            )));
        }

        let province_pos = validate_provinces(&provinces)?;
        let district_pos = validate_districts(&districts, &province_pos)?;

        let district_provinces: HashMap<i64, i64> = districts
            .iter()
            .map(|d| (d.id, d.province_id))
            .collect();

        let neighborhood_pos =
            validate_localities(&neighborhoods, &district_provinces, "neighborhoods")?;
        let village_pos = validate_localities(&villages, &district_provinces, "villages")?;
        let town_pos = validate_localities(&towns, &district_provinces, "towns")?;

        let mut districts_by_province: HashMap<i64, Vec<District>> = HashMap::new();
        for district in &districts {
            districts_by_province
                .entry(district.province_id)
                .or_default()
                .push(district.clone());
        }

        let store = Self {
            districts_by_province,
            neighborhoods_by_district: index_by_district(&neighborhoods),
            villages_by_district: index_by_district(&villages),
            towns_by_district: index_by_district(&towns),
            province_pos,
            district_pos,
            neighborhood_pos,
            village_pos,
            town_pos,
            provinces,
            districts,
            neighborhoods,
            villages,
            towns,
        };

        tracing::info!(
            provinces = store.provinces.len(),
            districts = store.districts.len(),
            neighborhoods = store.neighborhoods.len(),
            villages = store.villages.len(),
            towns = store.towns.len(),
            "Dataset loaded and indexed"
        );

        Ok(store)
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn localities(&self, kind: LocalityKind) -> &[Locality] {
        match kind {
            LocalityKind::Neighborhood => &self.neighborhoods,
            LocalityKind::Village => &self.villages,
            LocalityKind::Town => &self.towns,
        }
    }

    pub fn province_by_id(&self, id: i64) -> Option<&Province> {
        self.province_pos.get(&id).map(|&i| &self.provinces[i])
    }

    pub fn district_by_id(&self, id: i64) -> Option<&District> {
        self.district_pos.get(&id).map(|&i| &self.districts[i])
    }

    pub fn locality_by_id(&self, kind: LocalityKind, id: i64) -> Option<&Locality> {
        let pos = match kind {
            LocalityKind::Neighborhood => &self.neighborhood_pos,
            LocalityKind::Village => &self.village_pos,
            LocalityKind::Town => &self.town_pos,
        };
        pos.get(&id).map(|&i| &self.localities(kind)[i])
    }

    /// Full province-id -> districts index.
    pub fn districts_by_province(&self) -> &HashMap<i64, Vec<District>> {
        &self.districts_by_province
    }

    /// Full district-id -> localities index for one collection.
    pub fn localities_by_district(&self, kind: LocalityKind) -> &HashMap<i64, Vec<Locality>> {
        match kind {
            LocalityKind::Neighborhood => &self.neighborhoods_by_district,
            LocalityKind::Village => &self.villages_by_district,
            LocalityKind::Town => &self.towns_by_district,
        }
    }

    /// Districts of a province, in dataset order. Empty for a province
    /// without districts in the loaded snapshot.
    pub fn districts_of(&self, province_id: i64) -> &[District] {
        self.districts_by_province
            .get(&province_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn localities_of(&self, kind: LocalityKind, district_id: i64) -> &[Locality] {
        self.localities_by_district(kind)
            .get(&district_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn read_collection<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>> {
    let path = dir.join(file_name);
    let file = File::open(&path).map_err(|e| {
        AppError::DataIntegrity(format!("cannot open {}: {}", path.display(), e))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::DataIntegrity(format!("malformed record in {}: {}", path.display(), e))
    })
}

fn validate_provinces(provinces: &[Province]) -> Result<HashMap<i64, usize>> {
    let mut pos = HashMap::with_capacity(provinces.len());
    for (i, p) in provinces.iter().enumerate() {
        if p.id <= 0 {
            return Err(AppError::DataIntegrity(format!(
                "province '{}' has non-positive id {}",
                p.name, p.id
            )));
        }
        if p.name.trim().is_empty() {
            return Err(AppError::DataIntegrity(format!(
                "province {} has an empty name",
                p.id
            )));
        }
        if p.population < 0 || p.area <= 0.0 {
            return Err(AppError::DataIntegrity(format!(
                "province {} has invalid population/area",
                p.id
            )));
        }
        if pos.insert(p.id, i).is_some() {
            return Err(AppError::DataIntegrity(format!(
                "duplicate province id {}",
                p.id
            )));
        }
    }
    Ok(pos)
}

fn validate_districts(
    districts: &[District],
    province_pos: &HashMap<i64, usize>,
) -> Result<HashMap<i64, usize>> {
    let mut pos = HashMap::with_capacity(districts.len());
    for (i, d) in districts.iter().enumerate() {
        if d.id <= 0 || d.name.trim().is_empty() {
            return Err(AppError::DataIntegrity(format!(
                "district {} ('{}') has an invalid id or name",
                d.id, d.name
            )));
        }
        if !province_pos.contains_key(&d.province_id) {
            return Err(AppError::DataIntegrity(format!(
                "district {} references unknown province {}",
                d.id, d.province_id
            )));
        }
        if pos.insert(d.id, i).is_some() {
            return Err(AppError::DataIntegrity(format!(
                "duplicate district id {}",
                d.id
            )));
        }
    }
    Ok(pos)
}

fn validate_localities(
    localities: &[Locality],
    district_provinces: &HashMap<i64, i64>,
    collection: &str,
) -> Result<HashMap<i64, usize>> {
    let mut pos = HashMap::with_capacity(localities.len());
    for (i, l) in localities.iter().enumerate() {
        if l.id <= 0 || l.name.trim().is_empty() {
            return Err(AppError::DataIntegrity(format!(
                "{} record {} ('{}') has an invalid id or name",
                collection, l.id, l.name
            )));
        }
        let Some(&province_id) = district_provinces.get(&l.district_id) else {
            return Err(AppError::DataIntegrity(format!(
                "{} record {} references unknown district {}",
                collection, l.id, l.district_id
            )));
        };
        // provinceId is denormalized from the district; a mismatch means the
        // dataset files disagree with each other.
        if l.province_id != province_id {
            return Err(AppError::DataIntegrity(format!(
                "{} record {} carries province {} but its district {} belongs to province {}",
                collection, l.id, l.province_id, l.district_id, province_id
            )));
        }
        if pos.insert(l.id, i).is_some() {
            return Err(AppError::DataIntegrity(format!(
                "duplicate {} id {}",
                collection, l.id
            )));
        }
    }
    Ok(pos)
}

fn index_by_district(localities: &[Locality]) -> HashMap<i64, Vec<Locality>> {
    let mut index: HashMap<i64, Vec<Locality>> = HashMap::new();
    for locality in localities {
        index
            .entry(locality.district_id)
            .or_default()
            .push(locality.clone());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_store;

    #[test]
    fn loads_all_81_provinces() {
        let store = test_store();
        assert_eq!(store.provinces().len(), 81);
    }

    #[test]
    fn provinces_are_in_plate_code_order() {
        let store = test_store();
        assert_eq!(store.provinces()[0].id, 1);
        assert_eq!(store.provinces()[0].name, "Adana");
        assert_eq!(store.provinces()[80].id, 81);
    }

    #[test]
    fn exact_lookups_resolve_ids() {
        let store = test_store();
        assert_eq!(store.province_by_id(6).unwrap().name, "Ankara");
        assert!(store.province_by_id(999).is_none());

        let district = store.districts().first().unwrap();
        assert_eq!(store.district_by_id(district.id).unwrap().id, district.id);
    }

    #[test]
    fn district_index_groups_by_province() {
        let store = test_store();
        let adana_districts = store.districts_of(1);
        assert!(!adana_districts.is_empty());
        assert!(adana_districts.iter().all(|d| d.province_id == 1));

        // Unknown parent yields an empty slice, not an error.
        assert!(store.districts_of(9999).is_empty());

        // Every indexed district appears under its own province, and the
        // index covers the whole collection.
        let index = store.districts_by_province();
        let indexed: usize = index.values().map(Vec::len).sum();
        assert_eq!(indexed, store.districts().len());
        for (province_id, districts) in index {
            assert!(districts.iter().all(|d| d.province_id == *province_id));
        }
    }

    #[test]
    fn locality_indices_group_by_district() {
        let store = test_store();
        for kind in [
            LocalityKind::Neighborhood,
            LocalityKind::Village,
            LocalityKind::Town,
        ] {
            assert!(!store.localities(kind).is_empty());
            let sample = &store.localities(kind)[0];
            let children = store.localities_of(kind, sample.district_id);
            assert!(children.iter().any(|l| l.id == sample.id));
            assert!(children.iter().all(|l| l.district_id == sample.district_id));
        }
    }

    #[test]
    fn repeated_access_is_reference_stable() {
        let store = test_store();
        assert!(std::ptr::eq(store.provinces(), store.provinces()));
        assert!(std::ptr::eq(store.districts_of(1), store.districts_of(1)));
    }

    #[test]
    fn missing_file_fails_loudly() {
        let err = DataStore::load(Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, AppError::DataIntegrity(_)));
    }
}
