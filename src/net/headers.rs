//! Header normalization and merging.
//!
//! Callers can hand us headers in three shapes: a native [`HeaderMap`], an
//! ordered list of name/value pairs, or a plain mapping. All of them are
//! normalized into one single-valued `HeaderMap` before they are merged over
//! a base set.
//!
//! A plain mapping is kept sorted by name, so names that only differ in case
//! always resolve the same way: the entry whose name sorts last wins (`"a"`
//! beats `"A"`).
//!
//! ```
//! use http::HeaderMap;
//! use typed_fetch::net::{merge_headers, HeaderInput};
//!
//! let mut base = HeaderMap::new();
//! base.insert("x-api-version", "1".parse().unwrap());
//!
//! let merged = merge_headers(&base, Some(HeaderInput::from([("X-Api-Version", "2")]))).unwrap();
//! assert_eq!(merged["x-api-version"], "2");
//! ```
use std::collections::{BTreeMap, HashMap};

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::errors::HeaderError;
use crate::net::response::HeaderSet;

/// Header input in one of the accepted shapes.
#[derive(Debug, Clone)]
pub enum HeaderInput {
    /// Native case-insensitive header collection.
    Headers(HeaderMap),
    /// Ordered sequence of name/value pairs. Later entries win.
    Pairs(Vec<(String, String)>),
    /// Plain mapping of name to value, ordered by name.
    Record(BTreeMap<String, String>),
}

impl HeaderInput {
    /// Normalize into a `HeaderMap` holding exactly one value per name.
    pub fn into_header_map(self) -> Result<HeaderMap, HeaderError> {
        match self {
            HeaderInput::Headers(map) => Ok(collapse(&map)),
            HeaderInput::Pairs(pairs) => from_entries(pairs),
            HeaderInput::Record(record) => from_entries(record),
        }
    }
}

impl From<HeaderMap> for HeaderInput {
    fn from(map: HeaderMap) -> Self {
        HeaderInput::Headers(map)
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for HeaderInput {
    fn from(pairs: Vec<(K, V)>) -> Self {
        HeaderInput::Pairs(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for HeaderInput {
    fn from(pairs: [(K, V); N]) -> Self {
        HeaderInput::Pairs(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for HeaderInput {
    fn from(record: HashMap<K, V>) -> Self {
        HeaderInput::Record(record.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for HeaderInput {
    fn from(record: BTreeMap<K, V>) -> Self {
        HeaderInput::Record(record.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Merge `overrides` over `base`.
///
/// Every name present in the overrides replaces all values of the same
/// (case-insensitive) name in the base. Without overrides the base is
/// returned unchanged.
pub fn merge_headers(base: &HeaderMap, overrides: Option<HeaderInput>) -> Result<HeaderMap, HeaderError> {
    let mut merged = base.clone();

    let Some(overrides) = overrides else {
        return Ok(merged);
    };

    for (name, value) in overrides.into_header_map()?.into_iter() {
        // `into_iter` only yields `None` names for extra values of a name, and
        // the normalized map never has those.
        if let Some(name) = name {
            log::trace!("header override: {name}");
            merged.insert(name, value);
        }
    }

    Ok(merged)
}

/// Flatten a header map into a [`HeaderSet`].
///
/// Names are lower-case. Repeated values are joined with `", "`.
pub fn header_set(headers: &HeaderMap) -> HeaderSet {
    let mut set = HeaderSet::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        set.insert(name.as_str().to_string(), joined);
    }
    set
}

fn from_entries<I, K, V>(entries: I) -> Result<HeaderMap, HeaderError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut map = HeaderMap::new();
    for (name, value) in entries {
        let name = name.as_ref();
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| HeaderError::InvalidName(name.to_string()))?;
        let header_value = HeaderValue::from_str(value.as_ref())
            .map_err(|_| HeaderError::InvalidValue { name: name.to_string() })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn collapse(headers: &HeaderMap) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let mut values = headers.get_all(name).iter();
        let Some(first) = values.next() else { continue };

        let mut joined = first.as_bytes().to_vec();
        for value in values {
            joined.extend_from_slice(b", ");
            joined.extend_from_slice(value.as_bytes());
        }

        // Joining valid header values with ", " is always a valid header value.
        if let Ok(value) = HeaderValue::from_bytes(&joined) {
            map.insert(name.clone(), value);
        }
    }
    map
}
