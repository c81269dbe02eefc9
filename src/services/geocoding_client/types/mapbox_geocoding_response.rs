use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct MapboxGeocodingFeature {
    pub id: String,
    #[serde(default)]
    pub place_type: Vec<String>,
    pub place_name: String,
    pub center: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

#[derive(Serialize, Deserialize)]
pub struct MapboxGeocodingResponse {
    #[serde(default)]
    pub features: Vec<MapboxGeocodingFeature>,
}
