//! Peer address access control.
//!
//! # Responsibilities
//! - Unconditional loopback bypass (IPv4 `127.0.0.1`, bracketed IPv6 `[::1]`)
//! - Lexical prefix match against the configured allow-list
//!
//! # Design Decisions
//! - Matching is string-level starts-with, never CIDR arithmetic. Operators
//!   must supply prefixes precise enough for a lexical match to be correct
//!   (e.g. `10.0.` matches that octet range lexically, not numerically).
//!   CIDR would change observable behavior, so it stays out.
//! - The compared string is the raw socket peer address, port suffix and
//!   IPv6 brackets included.

use crate::config::AllowList;

/// Returns true if a peer with the given socket address may proxy requests.
///
/// Pure predicate; no normalization, resolution, or side effects.
pub fn is_allowed(remote_addr: &str, allow_list: &AllowList) -> bool {
    // Requests from localhost are always allowed.
    if remote_addr.starts_with("[::1]") || remote_addr.starts_with("127.0.0.1") {
        return true;
    }

    allow_list
        .prefixes()
        .iter()
        .any(|prefix| remote_addr.starts_with(prefix.as_str()))
}
