use crate::{
    search::camera::CameraSettings,
    services::geocoding_client::geocoding_service::GeocodingService,
};

#[derive(Clone)]
pub struct AppState {
    pub geocoding_service: GeocodingService,
    pub camera: CameraSettings,
    pub auth_key: Option<String>,
}
