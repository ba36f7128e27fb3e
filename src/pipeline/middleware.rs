//! Axum glue weaving the pipeline into an HTTP service.
//!
//! The middleware buffers the request body, runs the REQUEST flow, either
//! writes a short-circuit response or forwards the (possibly substituted)
//! request to the inner handler, captures the handler's response, runs the
//! RESPONSE flow, and writes the final result. Pipeline failures map to 503,
//! conversion failures to 500, and short-circuits are written verbatim.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode, Uri};
use tracing::error;

use crate::pipeline::Pipeline;
use crate::proto::{HttpRequest, HttpResponse};

/// Upper bound on buffered request and response bodies.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Runs every HTTP exchange through the plugin pipeline.
///
/// Mount with
/// `axum::middleware::from_fn_with_state(pipeline, plugin_middleware)`.
pub async fn plugin_middleware(
    State(pipeline): State<Arc<Pipeline>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(error = %err, "failed to buffer request body");
            return conversion_failure();
        }
    };

    let wire = wire_request(&parts, &body_bytes);

    let verdict = match pipeline.run_request(wire).await {
        Ok(verdict) => verdict,
        Err(err) => {
            error!(error = %err, "pipeline request flow failed");
            return service_unavailable();
        }
    };

    if !verdict.r#continue {
        // A plugin answered directly (e.g. 429 rate limit, 401 auth).
        return write_wire_response(verdict);
    }

    let downstream = match verdict.modified_request {
        Some(modified) => apply_wire_request(parts, modified),
        None => Request::from_parts(parts, Body::from(body_bytes)),
    };

    let response = next.run(downstream).await;

    let (response_parts, response_body) = response.into_parts();
    let response_bytes = match to_bytes(response_body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(error = %err, "failed to buffer handler response");
            return conversion_failure();
        }
    };

    let wire_response = HttpResponse {
        status_code: i32::from(response_parts.status.as_u16()),
        headers: first_values(&response_parts.headers),
        body: response_bytes.to_vec(),
        r#continue: true,
        modified_request: None,
    };

    match pipeline.run_response(wire_response).await {
        Ok(final_response) => write_wire_response(final_response),
        Err(err) => {
            error!(error = %err, "pipeline response flow failed");
            service_unavailable()
        }
    }
}

/// Converts buffered request parts into the wire form. Headers keep the
/// first value only.
pub(crate) fn wire_request(parts: &http::request::Parts, body: &[u8]) -> HttpRequest {
    let remote_addr = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string())
        .unwrap_or_default();

    HttpRequest {
        method: parts.method.to_string(),
        url: parts.uri.to_string(),
        path: parts.uri.path().to_string(),
        headers: first_values(&parts.headers),
        body: body.to_vec(),
        remote_addr,
        request_uri: parts
            .uri
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| parts.uri.path().to_string()),
    }
}

/// Rebuilds the downstream request from a substituted wire request, keeping
/// the original parts' extensions. Unparseable fields keep their originals.
fn apply_wire_request(mut parts: http::request::Parts, wire: HttpRequest) -> Request {
    if let Ok(method) = wire.method.parse::<Method>() {
        parts.method = method;
    }
    if let Ok(uri) = wire.url.parse::<Uri>() {
        parts.uri = uri;
    }

    let mut headers = HeaderMap::with_capacity(wire.headers.len());
    for (name, value) in &wire.headers {
        if let (Ok(name), Ok(value)) = (
            name.parse::<HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }
    parts.headers = headers;

    Request::from_parts(parts, Body::from(wire.body))
}

/// Writes a wire response out as an HTTP response. A zero status code means
/// "no status set" and becomes 200.
fn write_wire_response(wire: HttpResponse) -> Response {
    let status = u16::try_from(wire.status_code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let mut response = Response::new(Body::from(wire.body));
    *response.status_mut() = status;
    for (name, value) in &wire.headers {
        if let (Ok(name), Ok(value)) = (
            name.parse::<HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            response.headers_mut().insert(name, value);
        }
    }
    response
}

fn first_values(headers: &HeaderMap) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(headers.len());
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            map.entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    map
}

fn service_unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable").into_response()
}

fn conversion_failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to process request").into_response()
}
