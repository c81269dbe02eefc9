use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::app_error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Serialize, Deserialize)]
pub struct GetSentimentResponseDataRegion {
    pub id: String,
    pub name: String,
    pub score: f64,
}

#[derive(Serialize, Deserialize)]
pub struct GetSentimentResponseData {
    pub score: f64,
    pub trend: Trend,
    pub regions: Vec<GetSentimentResponseDataRegion>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct GetSentimentResponse {
    pub data: GetSentimentResponseData,
}

// Placeholder aggregates until an NLP source is wired in.
const REGIONS: [(&str, &str, f64); 3] = [
    ("sahel", "Sahel", 0.68),
    ("horn", "Horn of Africa", 0.55),
    ("sea", "Southeast Asia", 0.38),
];

pub async fn get_sentiment() -> Result<Response, AppError> {
    let regions = REGIONS
        .iter()
        .map(|(id, name, score)| GetSentimentResponseDataRegion {
            id: id.to_string(),
            name: name.to_string(),
            score: *score,
        })
        .collect();

    Ok((
        StatusCode::OK,
        Json(GetSentimentResponse {
            data: GetSentimentResponseData {
                score: 0.42,
                trend: Trend::Down,
                regions,
                updated_at: Utc::now(),
            },
        }),
    )
        .into_response())
}
