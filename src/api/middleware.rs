use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::engine::RequestContext;
use crate::logging::ACCESS_TARGET;

const NGINX_REQUEST_ID: &str = "x-nginx-request-id";
const REQUEST_ID: &str = "x-request-id";

/// Assigns a request id, exposes it to handlers as a [`RequestContext`] and writes the access log.
pub async fn request_context(mut request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(request.headers())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    request.extensions_mut().insert(RequestContext::new(request_id.clone()));

    let span = info_span!("request", request_id = %request_id);
    let started = Instant::now();

    let mut response = async {
        debug!("Request Started: {method} {path}");
        next.run(request).await
    }
    .instrument(span.clone())
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID, value);
    }

    span.in_scope(|| {
        info!(target: ACCESS_TARGET, "{request_id} {method} {path} {} {:?}", response.status().as_u16(), started.elapsed());
    });

    response
}

fn incoming_request_id(headers: &HeaderMap) -> Option<String> {
    [NGINX_REQUEST_ID, REQUEST_ID].iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
