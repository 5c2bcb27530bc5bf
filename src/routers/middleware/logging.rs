use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request, Response},
    middleware::Next,
};
use tokio::time::Instant;
use tracing::{Level, warn};

use crate::{
    build_info::{AXUM_VERSION, BUILD_TIME, RUST_VERSION},
    init::state::ServerState,
};

const ERROR_HEADERS: [&str; 5] = [
    "x-error-log-level",
    "x-error-status-code",
    "x-error-code",
    "x-error-message",
    "x-error-detail",
];

// debug and below are filtered out by default, so the level must be picked at runtime
macro_rules! log_codeerror {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN => tracing::warn!($($field)*),
            Level::INFO => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

pub async fn log_middleware(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(info): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();

    state.add_responses_handled();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let client_ip = client_ip(request.headers(), info);

    tracing::info!(kind = %"RECV", method = %method, path = %path, client_ip = ?client_ip);

    let mut response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();
    let headers = response.headers_mut();

    if status.is_success() {
        tracing::info!(kind = %"RESP", method = %method, path = %path, client_ip = ?client_ip, status_code = %status.as_u16(), duration = ?duration);
    } else {
        let log_level = header_value_to_str(headers.get("x-error-log-level"))
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::ERROR);
        let error_code = header_value_to_str(headers.get("x-error-code")).unwrap_or("");
        let message = header_value_to_str(headers.get("x-error-message")).unwrap_or("");
        let detail = header_value_to_str(headers.get("x-error-detail")).unwrap_or("");

        log_codeerror!(
            log_level,
            kind = %"ERSP",
            method = %method,
            path = %path,
            client_ip = ?client_ip,
            status_code = %status.as_u16(),
            duration = ?duration,
            error_code = %error_code,
            message = %message,
            detail = %detail
        );

        for name in ERROR_HEADERS {
            headers.remove(name);
        }
    }

    stamp_build_info(headers);

    response
}

/// First hop of `x-forwarded-for` when behind a proxy, the peer address otherwise.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> Option<IpAddr> {
    match headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
    {
        Some(forwarded) => match forwarded.trim().parse() {
            Ok(ip) => Some(ip),
            Err(e) => {
                warn!(error = ?e, forwarded, "Could not parse x-forwarded-for into IpAddr");
                None
            }
        },
        None => Some(peer.ip()),
    }
}

fn stamp_build_info(headers: &mut HeaderMap) {
    headers.insert("x-server-built-time", HeaderValue::from_static(BUILD_TIME));
    headers.insert("x-server-name", HeaderValue::from_static(AXUM_VERSION));
    headers.insert(
        "x-server-rust-version",
        HeaderValue::from_static(RUST_VERSION),
    );
}

fn header_value_to_str(value: Option<&HeaderValue>) -> Option<&str> {
    value.and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        assert_eq!(
            client_ip(&headers, peer),
            Some("203.0.113.7".parse().unwrap())
        );
    }

    #[test]
    fn falls_back_to_peer() {
        let peer: SocketAddr = "192.0.2.1:5000".parse().unwrap();
        assert_eq!(
            client_ip(&HeaderMap::new(), peer),
            Some("192.0.2.1".parse().unwrap())
        );
    }
}
