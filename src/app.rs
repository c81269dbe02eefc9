use crate::{
    config::AppConfig,
    middlewares::auth::auth_middleware,
    routes::apply_routes,
    search::camera::CameraSettings,
    services::geocoding_client::geocoding_service::{GeocodingService, GeocodingServiceConfig, REQUEST_TIMEOUT},
    types::app_state::AppState,
};
use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn gen_app(config: AppConfig) -> Router {
    let cors_middleware = CorsLayer::new();
    let state = AppState {
        geocoding_service: GeocodingService::new(GeocodingServiceConfig {
            access_token: config.mapbox_token,
            host: config.mapbox_host,
            timeout: REQUEST_TIMEOUT,
        }),
        camera: CameraSettings::default(),
        auth_key: config.auth_key,
    };

    apply_routes(Router::new())
        .route("/", get(root))
        .layer(cors_middleware)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

async fn root() -> &'static str {
    "watershed-api"
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub mapbox_server: mockito::ServerGuard,
}

#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    let mapbox_server = mockito::Server::new_async().await;

    let app = gen_app(AppConfig {
        mapbox_token: Some("pk.test".to_string()),
        mapbox_host: mapbox_server.url(),
        auth_key: None,
        port: 0,
    });

    MockApp { app, mapbox_server }
}
