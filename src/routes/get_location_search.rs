use crate::{
    search::camera::CameraCommand,
    services::geocoding_client::geocoding_service::Geocoder,
    types::{
        app_state::AppState,
        search_result::{BoundingBox, LngLat},
    },
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct GetLocationSearchPayload {
    #[validate(length(max = 256, message = "Must be at most 256 characters"))]
    pub search: String,
}

#[derive(Serialize, Deserialize)]
pub struct GetLocationSearchResponseDataResult {
    pub id: String,
    pub label: String,
    pub center: LngLat,
    pub bbox: Option<BoundingBox>,
    pub camera: CameraCommand,
}

#[derive(Serialize, Deserialize)]
pub struct GetLocationSearchResponseData {
    pub results: Vec<GetLocationSearchResponseDataResult>,
}

#[derive(Serialize, Deserialize)]
pub struct GetLocationSearchResponse {
    pub data: GetLocationSearchResponseData,
}

/// Geocoding failures degrade to an empty list rather than an error status.
#[cfg_attr(test, debug_handler)]
pub async fn get_location_search(
    State(state): State<AppState>,
    ValidatedQuery(GetLocationSearchPayload { search }): ValidatedQuery<GetLocationSearchPayload>,
) -> Result<Response, AppError> {
    let places = state
        .geocoding_service
        .search_places(&search)
        .await
        .unwrap_or_else(|e| {
            warn!("Location search for {:?} failed: {}", search, e);
            Vec::new()
        });

    let results = places
        .into_iter()
        .map(|p| GetLocationSearchResponseDataResult {
            camera: CameraCommand::for_result(&p, &state.camera),
            id: p.id,
            label: p.label,
            center: p.center,
            bbox: p.bounding_box,
        })
        .collect();

    Ok((
        StatusCode::OK,
        Json(GetLocationSearchResponse {
            data: GetLocationSearchResponseData { results },
        }),
    )
        .into_response())
}
