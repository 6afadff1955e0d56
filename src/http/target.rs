//! Outbound target URL derivation.
//!
//! # Responsibilities
//! - Strip exactly one leading path separator from the inbound path+query
//! - Repair scheme separators mangled by the leading-slash convention
//!
//! # Design Decisions
//! - Pure string transform; no escaping or decoding beyond what the inbound
//!   URI parser already applied
//! - No validation here: a malformed result fails later at outbound URL
//!   parse time, which is the single point of rejection

/// Derive the outbound target URL from the inbound path+query string.
///
/// Callers request paths of the form `/http://target.example/resource`; the
/// leading slash is dropped and, where a client or intermediary collapsed
/// the `//` after the scheme, `http:`/`https:` are repaired to their full
/// `scheme://` form. An already well-formed `http://` is left untouched.
pub fn derive_target(path_and_query: &str) -> String {
    let stripped = path_and_query
        .strip_prefix('/')
        .unwrap_or(path_and_query);

    let repaired = repair_scheme(stripped, "http:");
    repair_scheme(&repaired, "https:")
}

/// Insert `//` after the first occurrence of `scheme` that lacks it.
fn repair_scheme(s: &str, scheme: &str) -> String {
    if let Some(idx) = s.find(scheme) {
        let after = idx + scheme.len();
        if !s[after..].starts_with("//") {
            let mut out = String::with_capacity(s.len() + 2);
            out.push_str(&s[..after]);
            out.push_str("//");
            out.push_str(&s[after..]);
            return out;
        }
    }
    s.to_string()
}
