use std::{fmt, time::Duration};

use reqwest::StatusCode;

pub const PLACEHOLDER_TOKEN: &str = "your_mapbox_public_token";
pub const MIN_TOKEN_LEN: usize = 20;
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(10);
const STYLE_PATH: &str = "/styles/v1/mapbox/dark-v11";

/// Result of probing the map provider with the configured credential.
#[derive(Debug, PartialEq)]
pub enum TokenCheck {
    Valid,
    Missing,
    Placeholder,
    Unauthorized,
    HttpError { status: u16, body: String },
    RequestFailed(String),
}

impl TokenCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, TokenCheck::Valid)
    }
}

impl fmt::Display for TokenCheck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenCheck::Valid => write!(f, "Map API: OK (token valid)"),
            TokenCheck::Missing => write!(
                f,
                "Map API: NOT CONFIGURED\n   Add MAPBOX_TOKEN to .env.local"
            ),
            TokenCheck::Placeholder => write!(
                f,
                "Map API: PLACEHOLDER OR INVALID\n   Replace with a real token from https://account.mapbox.com/access-tokens/"
            ),
            TokenCheck::Unauthorized => {
                write!(f, "Map API: UNAUTHORIZED\n   Token is invalid or revoked.")
            }
            TokenCheck::HttpError { status, body } => {
                write!(f, "Map API: HTTP {}\n   {}", status, body)
            }
            TokenCheck::RequestFailed(e) => write!(f, "Map API: REQUEST FAILED\n   {}", e),
        }
    }
}

/// Requests the style endpoint with `token`. An unresponsive host yields
/// `RequestFailed` once `timeout` elapses.
pub async fn check_map_token(host: &str, token: Option<&str>, timeout: Duration) -> TokenCheck {
    let token = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return TokenCheck::Missing,
    };

    if token == PLACEHOLDER_TOKEN || token.chars().count() < MIN_TOKEN_LEN {
        return TokenCheck::Placeholder;
    }

    let url = format!(
        "{}{}?access_token={}",
        host,
        STYLE_PATH,
        urlencoding::encode(token)
    );

    let client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => return TokenCheck::RequestFailed(e.to_string()),
    };

    let resp = match client.get(&url).send().await {
        Ok(resp) => resp,
        Err(e) => return TokenCheck::RequestFailed(e.to_string()),
    };

    let status = resp.status();
    if status.is_success() {
        return TokenCheck::Valid;
    }
    if status == StatusCode::UNAUTHORIZED {
        return TokenCheck::Unauthorized;
    }

    let body = resp.text().await.unwrap_or_default();
    TokenCheck::HttpError {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    }
}
