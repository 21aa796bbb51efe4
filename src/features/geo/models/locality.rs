use serde::{Deserialize, Serialize};

/// Third-tier settlement record. Neighborhoods, villages and towns are three
/// separate collections with an identical shape, so one type backs all of
/// them; [`LocalityKind`] names the collection a record came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    pub id: i64,
    pub province_id: i64,
    pub district_id: i64,
    pub name: String,
    pub population: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalityKind {
    Neighborhood,
    Village,
    Town,
}

impl LocalityKind {
    /// Singular label used in error messages ("Neighborhood with id ...").
    pub fn label(&self) -> &'static str {
        match self {
            LocalityKind::Neighborhood => "Neighborhood",
            LocalityKind::Village => "Village",
            LocalityKind::Town => "Town",
        }
    }
}
