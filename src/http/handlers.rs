//! Route handlers.
//!
//! All handlers are stateless apart from the injected encoder and never
//! touch process-wide state.

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::http::error::RequestError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::qr::QrRequest;

const DOC_PAGE: &str = r#"
<h1>QR code generator</h1>
<p>This service generates QR codes. A GET to <b>/qr</b> with a query
parameter called <b>url</b> will generate a QR code as a png
with the contents of the QR code being the body of the url string.</p>
<p>Optional query parameters:</p>
<ul>
  <li><b>size</b>: width and height of the png in pixels, 128 to 1024 (default 256)</li>
  <li><b>level</b>: recovery level, one of <b>l</b> (low), <b>m</b> (medium, default),
  <b>h</b> (high), <b>x</b> (max)</li>
</ul>
"#;

/// Deflects undirected traffic on `/`.
pub async fn go_away() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "Go away.")
}

/// Usage page.
pub async fn doc() -> Html<&'static str> {
    Html(DOC_PAGE)
}

/// Liveness probe for load balancers. Never depends on anything.
pub async fn health() -> &'static str {
    "Ok\n"
}

/// Render the `url` parameter as a PNG QR code.
pub async fn qr(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, RequestError> {
    let request = QrRequest::from_query(query.as_deref()).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected QR request");
    })?;

    match state
        .encoder
        .encode(&request.url, request.level, request.size)
    {
        Ok(png) => {
            tracing::debug!(
                size = request.size,
                level = %request.level,
                bytes = png.len(),
                "QR code generated"
            );
            Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
        }
        Err(e) => {
            tracing::warn!(
                size = request.size,
                level = %request.level,
                payload_len = request.url.len(),
                error = %e,
                "QR encoding failed"
            );
            metrics::record_encode_failure(request.level);
            Err(RequestError::BadRequest("could not encode that URL"))
        }
    }
}
