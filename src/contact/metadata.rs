use std::net::IpAddr;

use axum::http::HeaderMap;
use ipnet::IpNet;

/// Resolve the visitor's address for rate limiting.
pub fn client_ip(headers: &HeaderMap, peer: IpAddr, trusted_proxies: &[IpNet]) -> IpAddr {
    let trusted = |ip: &IpAddr| trusted_proxies.iter().any(|net| net.contains(ip));

    // Only trust X-Forwarded-For if the direct connection is from a trusted proxy
    if !trusted(&peer) {
        return peer;
    }
    let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) else {
        return peer;
    };

    // Proxies append, so walk right to left and stop at the first hop we do not run.
    // Anything further left was written by the client.
    for entry in xff.rsplit(',').map(str::trim) {
        let Ok(ip) = entry.parse::<IpAddr>() else {
            break;
        };
        if !trusted(&ip) {
            return ip;
        }
    }

    peer
}
