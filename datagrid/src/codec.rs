//! Encoding of the grid's default order and default filter state.
//!
//! Both pieces of state are flat maps keyed by column name, persisted as a
//! single query string (`name=a&age=d`). The format is the one browsers use
//! for form submissions, so state can be pre-seeded straight from a URL.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use url::form_urlencoded;

use crate::error::{GridError, Result};

/// An insertion-ordered map of column name to state value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMap {
    entries: Vec<(String, String)>,
}

impl StateMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to `value`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StateMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StateMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for StateMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Serializes a map into its query-string form.
pub fn encode(map: &StateMap) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in map.iter() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Parses a query string into a map.
///
/// Repeated keys keep the position of their first occurrence and the value
/// of their last one. Malformed escapes are decoded lossily.
pub fn decode(input: &str) -> StateMap {
    form_urlencoded::parse(input.as_bytes())
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Direction of a default sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "a")]
    Ascending,
    #[serde(rename = "d")]
    Descending,
}

impl SortDirection {
    /// Spellings accepted by [`SortDirection::from_str`], compared case-insensitively.
    pub const ALLOWED: [&'static str; 4] = ["ASC", "DESC", "A", "D"];

    /// Single-character code stored in the encoded state.
    pub fn code(self) -> &'static str {
        match self {
            SortDirection::Ascending => "a",
            SortDirection::Descending => "d",
        }
    }

    /// Parses a stored code (`a` or `d`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" => Some(SortDirection::Ascending),
            "d" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

impl FromStr for SortDirection {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        if !Self::ALLOWED.iter().any(|allowed| allowed.eq_ignore_ascii_case(s)) {
            return Err(GridError::invalid_argument(format!(
                "Order must be in '{}', '{}' given.",
                Self::ALLOWED.join(", "),
                s
            )));
        }
        // Every allowed spelling starts with its direction letter.
        if s.starts_with(['a', 'A']) {
            Ok(SortDirection::Ascending)
        } else {
            Ok(SortDirection::Descending)
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
