use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{types::app_state::AppState, utils::app_error::AppError};

/// Requires `authorization` to equal the shared key when one is configured.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(ref auth_key) = state.auth_key else {
        return Ok(next.run(request).await);
    };

    match headers.get("authorization") {
        Some(header) if header == auth_key.as_str() => Ok(next.run(request).await),
        _ => {
            debug!("Rejected request to {}", request.uri().path());
            Err(AppError::unauthorized())
        }
    }
}
