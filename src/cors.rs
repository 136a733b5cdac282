//! CORS policy for the workspace API
//!
//! The service is a local tool; only localhost origins may call the
//! API. External origins, other private IPs, and lookalike hosts
//! (`localhost.evil.com`) are all refused.

use std::time::Duration;

use http::{header::HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Headers the API accepts
pub const ALLOWED_HEADERS: [http::header::HeaderName; 1] = [http::header::CONTENT_TYPE];

/// Methods the API accepts
pub const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];

/// Preflight cache lifetime
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// Localhost-only CORS layer for the workspace routes.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| {
            is_localhost_origin(origin)
        }))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .max_age(Duration::from_secs(DEFAULT_MAX_AGE_SECS))
}

/// True when the Origin header names localhost, `127.0.0.1`, or `[::1]`
/// over http(s), optionally with a port or path.
pub fn is_localhost_origin(origin: &HeaderValue) -> bool {
    let Ok(origin_str) = origin.to_str() else {
        return false;
    };
    let origin = origin_str.to_lowercase();

    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };

    for host in ["localhost", "127.0.0.1", "[::1]"] {
        if let Some(after) = rest.strip_prefix(host) {
            return match after.as_bytes().first() {
                // Exact host match
                None => true,
                Some(b'/') => true,
                Some(b':') => {
                    let port = &after[1..];
                    let port = port.split('/').next().unwrap_or(port);
                    port.parse::<u16>().is_ok_and(|p| p > 0)
                }
                // "localhostevil.com" and friends
                Some(_) => false,
            };
        }
    }

    false
}
