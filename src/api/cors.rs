//! Cross-origin headers for browser clients.
//!
//! Known origins are echoed back; any other origin gets the wildcard. Every
//! OPTIONS request is answered here with an empty 200 and never reaches a
//! handler.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::AppState;

const ALLOW_METHODS: &str = "GET, OPTIONS, POST";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With, Accept, Origin";

/// Value for `Access-Control-Allow-Origin` given the request's `Origin`.
pub fn allow_origin<'a>(allowed: &[String], origin: Option<&'a str>) -> &'a str {
    match origin {
        Some(origin) if allowed.iter().any(|a| a.eq_ignore_ascii_case(origin)) => origin,
        _ => "*",
    }
}

pub async fn cors(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let allowed = allow_origin(&state.config.allowed_origins, origin.as_deref());
    apply_headers(response.headers_mut(), allowed);
    response
}

fn apply_headers(headers: &mut HeaderMap, allowed_origin: &str) {
    let origin = HeaderValue::from_str(allowed_origin).unwrap_or(HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
}
