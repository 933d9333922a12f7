use reqwest::StatusCode;
use serde::Deserialize;

/// Fallback shown when the backend gives no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },
    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("unable to build request: {details}")]
    RequestBuild { details: String },
    #[error("unable to parse response: {details}")]
    Decode { details: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Message to show the user: the backend's own text when it sent one
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Unauthorized { message: Some(m) }
            | ApiError::Status {
                message: Some(m), ..
            } => m,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Whether the request is known not to have taken effect server-side
    ///
    /// Only a client-error refusal counts. A 5xx (often from a gateway), a
    /// timeout or an unreadable 2xx body leaves the outcome unknown.
    pub fn is_definitive(&self) -> bool {
        match self {
            ApiError::Unauthorized { .. } => true,
            ApiError::Status { status, .. } => {
                status.is_client_error()
                    && *status != StatusCode::REQUEST_TIMEOUT
                    && *status != StatusCode::TOO_MANY_REQUESTS
            }
            ApiError::RequestBuild { .. } => true,
            ApiError::Decode { .. } => false,
            ApiError::Transport(e) => e.is_connect() || e.is_builder(),
        }
    }

    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = message_from_body(body);
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract `message` from a `{ "message": string }` error body
pub fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_is_shown_verbatim() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Title is required"}"#,
        );
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn falls_back_to_generic_message() {
        let html = ApiError::from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(html.user_message(), GENERIC_FAILURE_MESSAGE);

        let empty = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":""}"#);
        assert_eq!(empty.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn unauthorized_status_maps_to_unauthorized() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, r#"{"message":"Token expired"}"#);
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.user_message(), "Token expired");
    }

    #[test]
    fn backend_refusals_are_definitive() {
        assert!(ApiError::from_response(StatusCode::UNPROCESSABLE_ENTITY, "").is_definitive());
        assert!(!ApiError::Decode {
            details: "missing field `id`".into()
        }
        .is_definitive());
    }

    #[test]
    fn server_and_gateway_errors_leave_the_outcome_unknown() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
            StatusCode::REQUEST_TIMEOUT,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            assert!(
                !ApiError::from_response(status, "").is_definitive(),
                "{} should not be definitive",
                status
            );
        }
        assert!(ApiError::from_response(StatusCode::CONFLICT, "").is_definitive());
    }
}

