use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, header::CACHE_CONTROL},
    response::{IntoResponse, Response},
};
use leptos::prelude::*;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;

/// Serves the compiled wasm bundle, stylesheet and other static files. Anything else is
/// answered with 404 by [ServeDir].
pub async fn file_and_error_handler(
    State(options): State<LeptosOptions>,
    request: Request<Body>,
) -> Response {
    let mut res = ServeDir::new(options.site_root.as_ref())
        .oneshot(request)
        .await
        .into_response();
    if res.status().is_success() && !cfg!(debug_assertions) {
        res.headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("max-age=3600, public"));
    }
    res
}
