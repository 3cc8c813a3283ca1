use std::net::IpAddr;

use axum::http::HeaderMap;
use ipnet::IpNet;

/// Resolve the submitting client's address.
///
/// `X-Forwarded-For` is only honoured when the direct peer is a trusted proxy.
/// Proxies append on the right, so the list is walked right to left and the
/// first hop that isn't ours wins. Entries left of it are client-supplied.
pub fn resolve(headers: &HeaderMap, peer: IpAddr, trusted_proxies: &[IpNet]) -> IpAddr {
    if trusted_proxies.is_empty() || !trusted_proxies.iter().any(|net| net.contains(&peer)) {
        return peer;
    }

    let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) else {
        return peer;
    };

    for hop in xff.rsplit(',').map(str::trim) {
        // Anything unparsable past our proxies can't be trusted either
        let Ok(ip) = hop.parse::<IpAddr>() else {
            return peer;
        };
        if !trusted_proxies.iter().any(|net| net.contains(&ip)) {
            return ip;
        }
    }

    peer
}
