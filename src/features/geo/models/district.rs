use serde::{Deserialize, Serialize};

/// District record as stored in `districts.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: i64,
    pub province_id: i64,
    pub name: String,
    pub population: i64,
    pub area: f64,
}
