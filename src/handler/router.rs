//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Content routes go to the store;
//! everything else is an asset request, and every asset request that does
//! not end in a served file gets the same 404, whatever the reason.

use super::content::{self, ContentRoute};
use crate::assets::{request, AssetFs};
use crate::config::{AppState, Config};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B, F>(
    req: Request<B>,
    state: Arc<AppState<F>>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    F: AssetFs,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    // Only content routes read the body
    let response = match content_route(&parts, &state.config) {
        Some(route) => content::respond(route, body, &state).await,
        None => route_request(&parts, &state).await,
    };

    if state.config.logging.access_log {
        let entry = access_entry(&parts, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn content_route(req: &Parts, config: &Config) -> Option<ContentRoute> {
    if !config.content.enabled {
        return None;
    }
    ContentRoute::from_request(&req.method, req.uri.path())
}

/// Only retrieval methods reach the responder
fn is_retrieval(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

/// Route request to the health check or the asset responder
pub async fn route_request<F>(req: &Parts, state: &AppState<F>) -> Response<Full<Bytes>>
where
    F: AssetFs,
{
    let method = &req.method;
    let path = req.uri.path();

    // 1. Method check, before anything looks at the path
    if !is_retrieval(method) {
        logger::log_method_rejected(method, path);
        return http::build_404_response();
    }
    let is_head = *method == Method::HEAD;

    // 2. Health check
    let health = &state.config.health;
    if health.enabled && path == health.path {
        return http::build_health_response(is_head);
    }

    // 3. Static assets
    let raw = path.strip_prefix('/').unwrap_or(path);
    let result = match request::decode_uri_path(raw) {
        Ok(decoded) => state.responder.serve(&decoded).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(asset) => http::build_asset_response(&asset, is_head),
        Err(e) => {
            logger::log_asset_error(&e);
            http::build_404_response()
        }
    }
}

fn access_entry(
    req: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = version_label(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
