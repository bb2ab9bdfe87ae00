//! Client-visible request errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The only error kind a request can produce.
///
/// Every failure reachable from user input is a client error carrying a
/// short human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    BadRequest(&'static str),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_bad_request_is_plain_text_400() {
        let response = RequestError::BadRequest("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_display_is_the_message() {
        assert_eq!(RequestError::BadRequest("nope").to_string(), "nope");
    }
}
