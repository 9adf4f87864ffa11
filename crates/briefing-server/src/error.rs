use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

/// Request-level failure taxonomy. Everything a handler can fail with maps to
/// exactly one of these, which in turn maps to one status code and body shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller omitted a required input.
    #[error("{0}")]
    BadRequest(String),

    /// Unrecognized `action` value.
    #[error("Invalid action")]
    InvalidAction,

    /// Anything other than POST or the CORS preflight.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A provider call failed; `label` names the data we were after.
    #[error("Failed to fetch {label}")]
    Upstream {
        label: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn upstream(label: &'static str, source: anyhow::Error) -> Self {
        Self::Upstream { label, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest(message) => {
                warn!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::InvalidAction => {
                warn!("Rejected unrecognized action");
                (StatusCode::BAD_REQUEST, json!({ "error": "Invalid action" }))
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            ApiError::Upstream { label, source } => {
                error!("Upstream failure fetching {}: {:#}", label, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": format!("Failed to fetch {}", label),
                        "details": source.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        let cases = [
            (ApiError::BadRequest("missing eventId".into()), 400),
            (ApiError::InvalidAction, 400),
            (ApiError::MethodNotAllowed, 405),
            (
                ApiError::upstream("weather", anyhow::anyhow!("boom")),
                500,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status().as_u16(), expected);
        }
    }
}
