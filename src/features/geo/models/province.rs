use serde::{Deserialize, Serialize};

/// Province record as stored in `provinces.json`. Ids follow the national
/// license-plate codes (1 = Adana .. 81 = Duzce).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: i64,
    pub name: String,
    pub population: i64,
    pub area: f64,
    pub altitude: f64,
    pub is_coastal: bool,
    pub is_metropolitan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}
