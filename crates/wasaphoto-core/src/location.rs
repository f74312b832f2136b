//! Requested locations
//!
//! Accepts bare paths (`/profile/42?tab=photos`) as well as full
//! hash-history URLs (`http://localhost:5173/#/profile/42`).

use smallvec::SmallVec;
use std::fmt;

/// Query pairs, stack-allocated for the usual handful of entries
pub type Query = SmallVec<[(String, String); 4]>;

/// A location the user asked to navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path without query or hash, always starting with `/`, still encoded
    pub path: String,
    /// Decoded query pairs in order of appearance
    pub query: Query,
    /// Fragment after the path (without leading `#`)
    pub hash: Option<String>,
}

impl Location {
    /// Create a location for a path with no query or hash
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            query: SmallVec::new(),
            hash: None,
        }
    }

    /// Parse a location string
    ///
    /// Input with a scheme (`://`) is a hash-history URL: the part after the
    /// first `#` is routed, or `/` when there is none. Otherwise a `#`
    /// starts the fragment, except as the first character.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let routed = match input.strip_prefix('#') {
            Some(rest) => rest,
            None if input.contains("://") => match input.split_once('#') {
                Some((_, rest)) => rest,
                None => "/",
            },
            None => input,
        };

        let (before_hash, hash) = match routed.split_once('#') {
            Some((b, h)) => (b, Some(decode_component(h, false))),
            None => (routed, None),
        };
        let (path, query) = match before_hash.split_once('?') {
            Some((p, q)) => (p, parse_query(q)),
            None => (before_hash, SmallVec::new()),
        };

        Self {
            path: normalize_path(path),
            query,
            hash: hash.filter(|h| !h.is_empty()),
        }
    }

    /// Add a query pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the fragment
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Path, query and hash serialized back into one string
    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        if !self.query.is_empty() {
            out.push('?');
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
                .collect();
            out.push_str(&pairs.join("&"));
        }
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(&encode_component(hash));
        }
        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Location::parse(s)
    }
}

impl From<String> for Location {
    fn from(s: String) -> Self {
        Location::parse(&s)
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn parse_query(query: &str) -> Query {
    let mut params = SmallVec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.push((decode_component(key, true), decode_component(value, true)));
    }
    params
}

/// Percent-decode one URL component (no external dependency)
///
/// Invalid escapes are kept verbatim, and so is the whole input when the
/// decoded bytes are not UTF-8. `+` becomes a space only when
/// `plus_as_space` is set, which is the query-string convention.
pub fn decode_component(s: &str, plus_as_space: bool) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}

/// Percent-encode one URL component, leaving RFC 3986 unreserved bytes alone
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_path() {
        let loc = Location::parse("/stream");
        assert_eq!(loc.path, "/stream");
        assert!(loc.query.is_empty());
        assert_eq!(loc.hash, None);
    }

    #[test]
    fn test_hash_history_url() {
        let loc = Location::parse("http://localhost:5173/#/profile/42?tab=photos");
        assert_eq!(loc.path, "/profile/42");
        assert_eq!(loc.query_param("tab"), Some("photos"));
    }

    #[test]
    fn test_hash_history_root_url() {
        let loc = Location::parse("http://localhost:5173/");
        assert_eq!(loc.path, "/");
        assert_eq!(loc.hash, None);
        assert_eq!(Location::parse("https://wasaphoto.example/#").path, "/");
    }

    #[test]
    fn test_fragment_on_relative_path() {
        let loc = Location::parse("stream#top");
        assert_eq!(loc.path, "/stream");
        assert_eq!(loc.hash.as_deref(), Some("top"));
    }

    #[test]
    fn test_leading_hash() {
        let loc = Location::parse("#/stream");
        assert_eq!(loc.path, "/stream");
    }

    #[test]
    fn test_fragment_on_bare_path() {
        let loc = Location::parse("/photos/7/comments#latest");
        assert_eq!(loc.path, "/photos/7/comments");
        assert_eq!(loc.hash.as_deref(), Some("latest"));
    }

    #[test]
    fn test_missing_leading_slash() {
        assert_eq!(Location::parse("stream").path, "/stream");
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::new("login").path, "/login");
    }

    #[test]
    fn test_query_decoding() {
        let loc = Location::parse("/search?q=mario+rossi&tag=caf%C3%A9&flag");
        assert_eq!(loc.query_param("q"), Some("mario rossi"));
        assert_eq!(loc.query_param("tag"), Some("café"));
        assert_eq!(loc.query_param("flag"), Some(""));
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("a%20b", false), "a b");
        assert_eq!(decode_component("a+b", false), "a+b");
        assert_eq!(decode_component("a+b", true), "a b");
        assert_eq!(decode_component("100%", false), "100%");
        assert_eq!(decode_component("%zz", false), "%zz");
        assert_eq!(decode_component("%FF", false), "%FF");
        assert_eq!(decode_component("caf%C3%A9", false), "café");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("mario rossi"), "mario%20rossi");
        assert_eq!(encode_component("a/b"), "a%2Fb");
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(encode_component("safe-_.~"), "safe-_.~");
    }

    #[test]
    fn test_full_path() {
        let loc = Location::new("/search")
            .with_query("q", "mario rossi")
            .with_hash("top");
        assert_eq!(loc.full_path(), "/search?q=mario%20rossi#top");
        assert_eq!(loc.to_string(), loc.full_path());
    }
}
