use thiserror::Error;

/// Every variant collapses to "zero results" for the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeocodingServiceError {
    #[error("No geocoding credential configured")]
    MissingCredential,

    #[error("Failed to reach geocoding service")]
    NetworkFailure,

    #[error("Geocoding credential was rejected")]
    Unauthorized,

    #[error("Unexpected geocoding response status: {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to parse geocoding response body")]
    MalformedResponse,
}
