// HTTP surface of the daemon
//
// Maps requests onto `UpdateBridge::handle` and its reply back onto HTTP.
// No DynDNS logic lives here: authentication, validation and the provider
// flow are all decided in dynbridge-core.

use axum::extract::{ConnectInfo, Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use dynbridge_core::{Credentials, UpdateBridge, UpdateParams, UpdateReply};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Challenge sent with every 401
const AUTH_CHALLENGE: &str = "Basic realm=\"DynDNS\"";

/// Service name reported by the health endpoint
const SERVICE_NAME: &str = "hetzner-dns-bridge";

/// Build the application router
///
/// - `GET /update`, `GET /nic/update`: DynDNS update calls
/// - `GET /health`, `GET /`: liveness
///
/// Any other path also answers with the health document.
pub fn router(bridge: Arc<UpdateBridge>) -> Router {
    Router::new()
        .route("/update", get(update_handler))
        .route("/nic/update", get(update_handler))
        .route("/health", get(health_handler))
        .route("/", get(health_handler))
        .fallback(health_handler)
        .with_state(bridge)
}

async fn update_handler(
    State(bridge): State<Arc<UpdateBridge>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    // A malformed query must not skip authentication; treat it as empty
    let params = match Query::<Vec<(String, String)>>::try_from_uri(&uri) {
        Ok(Query(pairs)) => UpdateParams::from_pairs(pairs),
        Err(e) => {
            debug!("Ignoring unparseable query string: {}", e);
            UpdateParams::default()
        }
    };

    info!(
        "Update request from {} for hostname '{}'",
        client_ip(&headers, remote),
        params.hostname.as_deref().unwrap_or_default()
    );

    let credentials = basic_auth(&headers);
    let reply = bridge.handle(credentials.as_ref(), &params).await;
    reply_response(&reply)
}

/// Render a bridge reply as a plain-text response
fn reply_response(reply: &UpdateReply) -> Response {
    let status =
        StatusCode::from_u16(reply.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (
        status,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        reply.body(),
    )
        .into_response();

    if matches!(reply, UpdateReply::Unauthorized) {
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static(AUTH_CHALLENGE));
    }

    response
}

/// Decode `Authorization: Basic <base64(user:pass)>`
///
/// Returns `None` for a missing or malformed header; the bridge answers both
/// with 401.
fn basic_auth(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Credentials::new(username, password))
}

/// Requester address for logging
///
/// First `X-Forwarded-For` entry, then `X-Real-IP`, then the socket peer.
fn client_ip(headers: &HeaderMap, remote: SocketAddr) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        let first = forwarded.split(',').next().unwrap_or(forwarded);
        return first.trim().to_string();
    }

    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.to_string();
    }

    remote.ip().to_string()
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    timestamp: String,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
