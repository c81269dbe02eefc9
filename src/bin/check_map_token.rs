//! Verifies that the map provider credential is configured and accepted.
//!
//! Run: `cargo run --bin check-map-token`

use std::{env, path::Path, process::ExitCode};

use watershed_api::{
    config::{map_token, read_env_file},
    services::{
        geocoding_client::geocoding_service::DEFAULT_GEOCODING_HOST,
        map_token_check::{check_map_token, CHECK_TIMEOUT},
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let file = read_env_file(Path::new(".env.local"));
    let lookup = |name: &str| file.get(name).cloned().or_else(|| env::var(name).ok());

    let host = lookup("MAPBOX_HOST").unwrap_or_else(|| DEFAULT_GEOCODING_HOST.to_string());
    let check = check_map_token(&host, map_token(lookup).as_deref(), CHECK_TIMEOUT).await;

    println!("{}", check);

    if check.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
