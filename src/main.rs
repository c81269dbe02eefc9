use tracing::{error, info};
use watershed_api::{app, config::AppConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    info!("Starting app...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.mapbox_token.is_none() {
        info!("MAPBOX_TOKEN not set, location search will return no results");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let app = app::gen_app(config);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Listening on {}", addr);
    axum::serve(listener, app).await.unwrap();
}
