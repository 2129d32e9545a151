//! Header merging with line-break validation.

use std::collections::BTreeMap;

use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;

use super::Error;

/// Merged header set, ordered by name.
pub type Headers = BTreeMap<String, String>;

/// Caller-supplied headers.
#[derive(Debug, Clone)]
pub enum HeaderSource {
    /// Plain key/value mapping; keys are compared exactly as given.
    Map(Headers),
    /// Header collection; names are lowercased by [`HeaderMap`].
    Collection(HeaderMap),
}

impl From<Headers> for HeaderSource {
    fn from(map: Headers) -> Self {
        Self::Map(map)
    }
}

impl From<HeaderMap> for HeaderSource {
    fn from(map: HeaderMap) -> Self {
        Self::Collection(map)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for HeaderSource {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Header set every request starts from.
#[must_use]
pub fn default_headers() -> Headers {
    Headers::from([("Content-Type".to_string(), "application/json".to_string())])
}

/// Merges `incoming` over `defaults`.
///
/// Incoming entries overwrite defaults with the same key. The merge is
/// all-or-nothing: the first value carrying a line break aborts it.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] naming the key whose value contains
/// `\r` or `\n`.
pub fn merge_headers(defaults: &Headers, incoming: Option<&HeaderSource>) -> Result<Headers, Error> {
    let mut merged = defaults.clone();

    match incoming {
        None => {}
        Some(HeaderSource::Map(map)) => {
            for (name, value) in map {
                apply(&mut merged, name, value)?;
            }
        }
        Some(HeaderSource::Collection(map)) => {
            for (name, value) in map {
                let value = String::from_utf8_lossy(value.as_bytes());
                apply(&mut merged, name.as_str(), &value)?;
            }
        }
    }

    Ok(merged)
}

fn apply(merged: &mut Headers, name: &str, value: &str) -> Result<(), Error> {
    if value.contains(['\r', '\n']) {
        return Err(Error::invalid_header(name, "value contains a line break"));
    }
    merged.insert(name.to_string(), value.to_string());
    Ok(())
}

/// Converts merged headers into a [`HeaderMap`] for the transport.
///
/// Keys differing only in case collapse into one header. Entries whose key
/// is one of `defaults` are written first, so a caller's case variant of a
/// default name always replaces the default value.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] if a name or value is not valid HTTP.
pub fn to_header_map(defaults: &Headers, headers: &Headers) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::with_capacity(headers.len());

    let (from_defaults, from_caller): (Vec<_>, Vec<_>) = headers
        .iter()
        .partition(|(name, _)| defaults.contains_key(*name));

    for (name, value) in from_defaults.into_iter().chain(from_caller) {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::invalid_header(name, e.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}
