//! Client address extraction for rate limiting.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::state::AppState;

/// Key used when no address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// The address a request is attributed to.
///
/// The socket peer by default. With `TRUST_PROXY_HEADERS` on, the first
/// `X-Forwarded-For` entry wins, then `X-Real-IP`, then the peer. Falls
/// back to `"unknown"` when nothing is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    pub fn from_parts(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> Self {
        let proxied = trust_proxy.then(|| proxied_addr(headers)).flatten();

        let addr = proxied
            .map(str::to_string)
            .or_else(|| peer.map(|p| p.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

        ClientAddr(addr)
    }
}

fn proxied_addr(headers: &HeaderMap) -> Option<&str> {
    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded.or_else(|| {
        header_str(headers, "x-real-ip")
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

impl FromRequestParts<AppState> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientAddr::from_parts(
            &parts.headers,
            peer,
            state.config.trust_proxy_headers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut h = HeaderMap::new();
        for (k, v) in pairs {
            h.insert(*k, HeaderValue::from_str(v).unwrap());
        }
        h
    }

    fn peer() -> Option<SocketAddr> {
        Some("192.0.2.10:5555".parse().unwrap())
    }

    #[test]
    fn proxy_headers_are_ignored_by_default() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.7"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(ClientAddr::from_parts(&h, peer(), false).0, "192.0.2.10");
        assert_eq!(ClientAddr::from_parts(&h, None, false).0, UNKNOWN_CLIENT);
    }

    #[test]
    fn trusted_forwarded_for_takes_first_entry() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(ClientAddr::from_parts(&h, peer(), true).0, "203.0.113.7");
    }

    #[test]
    fn trusted_lookup_falls_back_through_real_ip_and_peer() {
        let h = headers(&[("x-forwarded-for", " "), ("x-real-ip", "198.51.100.2")]);
        assert_eq!(ClientAddr::from_parts(&h, peer(), true).0, "198.51.100.2");

        assert_eq!(ClientAddr::from_parts(&HeaderMap::new(), peer(), true).0, "192.0.2.10");
        assert_eq!(ClientAddr::from_parts(&HeaderMap::new(), None, true).0, UNKNOWN_CLIENT);
    }
}
