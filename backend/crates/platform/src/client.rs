//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Maximum stored User-Agent length in bytes
pub const MAX_USER_AGENT_LENGTH: usize = 512;

/// Client metadata recorded alongside a session
///
/// Informational only: nothing is ever rejected because of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    /// User-Agent header, truncated to [`MAX_USER_AGENT_LENGTH`]
    pub user_agent: Option<String>,
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub address: Option<IpAddr>,
}

impl ClientMetadata {
    /// Get IP as string (for database storage)
    pub fn address_string(&self) -> Option<String> {
        self.address.map(|ip| ip.to_string())
    }
}

/// Extract client metadata from request headers
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Peer address of the connection, if known
pub fn extract_client_metadata(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientMetadata {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(|ua| truncate_on_char_boundary(ua, MAX_USER_AGENT_LENGTH).to_string());

    ClientMetadata {
        user_agent,
        address: extract_client_ip(headers, direct_ip),
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // First entry of X-Forwarded-For is the originating client
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
        && let Some(first_ip) = xff.split(',').next()
        && let Ok(ip) = first_ip.trim().parse::<IpAddr>()
    {
        return Some(ip);
    }
    direct_ip
}

fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
