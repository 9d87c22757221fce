//! # Page Headers
//!
//! Response headers attached to every [`PageEntry`](crate::table::PageEntry).
//!
//! An entry's headers are the common headers of the application overridden
//! key-by-key by the headers declared on its route. Names are compared
//! ASCII-case-insensitively (RFC 7230) and the first spelling seen is kept.
//! Insertion order is preserved so responses are emitted deterministically.
//!
//! Values are typed: plain text, integers, or dates. Dates are rendered as an
//! HTTP-date (`Thu, 01 Jan 1970 00:00:00 GMT`).

use crate::error::ResolveError;
use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 8;

/// `Cache-Control` applied to entries vetoed by an exclusion rule.
pub const EXCLUDED_CACHE_CONTROL: &str = "max-age=3600, public";

/// A typed header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    Integer(i64),
    Date(DateTime<Utc>),
}

impl HeaderValue {
    /// Parse a declared value according to its type tag.
    ///
    /// Accepted tags (case-insensitive): none/`string`, `integer`/`int`,
    /// `date`. Dates are given as milliseconds since the Unix epoch.
    pub fn parse(name: &str, kind: Option<&str>, raw: &str) -> Result<Self, ResolveError> {
        let invalid = |reason: String| ResolveError::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        let kind = kind.map(str::trim).unwrap_or("");
        if kind.is_empty() || kind.eq_ignore_ascii_case("string") {
            return Ok(HeaderValue::Text(raw.to_string()));
        }
        if kind.eq_ignore_ascii_case("integer") || kind.eq_ignore_ascii_case("int") {
            return raw
                .trim()
                .parse::<i64>()
                .map(HeaderValue::Integer)
                .map_err(|e| invalid(format!("'{raw}' is not an integer: {e}")));
        }
        if kind.eq_ignore_ascii_case("date") {
            let millis = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| invalid(format!("'{raw}' is not a millisecond timestamp: {e}")))?;
            return DateTime::<Utc>::from_timestamp_millis(millis)
                .map(HeaderValue::Date)
                .ok_or_else(|| invalid(format!("timestamp {millis} is out of range")));
        }
        Err(invalid(format!(
            "invalid header type [string|integer|date]: {kind}"
        )))
    }

    /// Value as it is written on the wire.
    #[must_use]
    pub fn to_header_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(s) => f.write_str(s),
            HeaderValue::Integer(n) => write!(f, "{n}"),
            HeaderValue::Date(d) => write!(f, "{}", d.format("%a, %d %b %Y %H:%M:%S GMT")),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Text(value)
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Integer(value)
    }
}

/// Ordered header map with unique, case-insensitive keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeaders {
    entries: SmallVec<[(Arc<str>, HeaderValue); MAX_INLINE_HEADERS]>,
}

impl PageHeaders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers sent when the application declares no common headers:
    /// disable every form of client-side caching.
    #[must_use]
    pub fn default_common() -> Self {
        let mut headers = Self::new();
        headers.insert("Pragma", "no-cache");
        headers.insert(
            "Cache-Control",
            "no-store, no-cache, must-revalidate, post-check=0, pre-check=0",
        );
        if let Some(expires) = DateTime::<Utc>::from_timestamp_millis(1) {
            headers.insert("Expires", HeaderValue::Date(expires));
        }
        headers
    }

    /// Insert or replace a header. A replaced header keeps its position.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<HeaderValue>) {
        let name = name.as_ref();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((Arc::from(name), value)),
        }
    }

    /// `base` overridden key-by-key by `overrides`; later declarations win.
    #[must_use]
    pub fn merged(base: &PageHeaders, overrides: &PageHeaders) -> Self {
        let mut merged = base.clone();
        for (name, value) in overrides.iter() {
            merged.insert(name, value.clone());
        }
        merged
    }

    /// Headers for an entry vetoed by an exclusion rule.
    #[must_use]
    pub fn for_excluded(common: &PageHeaders) -> Self {
        let mut headers = common.clone();
        headers.insert("Cache-Control", EXCLUDED_CACHE_CONTROL);
        headers
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: AsRef<str>, V: Into<HeaderValue>> FromIterator<(N, V)> for PageHeaders {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = PageHeaders::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}
