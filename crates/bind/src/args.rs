//! The argument multimap both binders read from.
//!
//! [`Args`] keeps every `(key, value)` pair in submission order, which is what the nested
//! builder merges by, next to an index of distinct keys in order of first occurrence that
//! the flat scanner looks values up in.

use crate::error::BindError;
use http::Uri;
use indexmap::IndexMap;

/// Ordered multimap of parameter keys to one or more raw values.
///
/// # Example
/// ```
/// # use micro_bind::Args;
/// let args = Args::parse("tag=a&symbol=INFY&tag=b").unwrap();
///
/// assert_eq!(args.peek("symbol"), Some("INFY"));
/// assert_eq!(args.peek_multi("tag"), ["a", "b"]);
/// assert_eq!(args.keys().collect::<Vec<_>>(), ["tag", "symbol"]);
/// assert_eq!(args.pairs().collect::<Vec<_>>(), [("tag", "a"), ("symbol", "INFY"), ("tag", "b")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pairs: Vec<(String, String)>,
    index: IndexMap<String, Vec<String>>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `application/x-www-form-urlencoded` text, as found in a query string or a form body
    pub fn parse(input: &str) -> Result<Self, BindError> {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(input)?;
        Ok(pairs.into_iter().collect())
    }

    /// Same as [`Args::parse`], for a raw request body
    pub fn from_bytes(input: &[u8]) -> Result<Self, BindError> {
        let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(input)?;
        Ok(pairs.into_iter().collect())
    }

    /// Parses the query component of `uri`; a uri without one yields an empty multimap
    pub fn from_uri(uri: &Uri) -> Result<Self, BindError> {
        uri.query().map_or_else(|| Ok(Self::new()), Self::parse)
    }

    /// Appends `value` to the values of `key`
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.index.entry(key.clone()).or_default().push(value.clone());
        self.pairs.push((key, value));
    }

    /// Replaces every value of `key` with `value`, keeping the position of its first pair
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.pairs[first].1.clone_from(&value);
                let mut at = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = at <= first || *k != key;
                    at += 1;
                    keep
                });
            }
            None => self.pairs.push((key.clone(), value.clone())),
        }
        self.index.insert(key, vec![value]);
    }

    /// Removes `key`, returning its values
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let values = self.index.shift_remove(key)?;
        self.pairs.retain(|(k, _)| k != key);
        Some(values)
    }

    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the first value registered under `key`
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.peek_multi(key).first().map(String::as_str)
    }

    /// Returns every value registered under `key`, empty when the key is absent
    pub fn peek_multi(&self, key: &str) -> &[String] {
        match self.index.get(key) {
            Some(values) => values.as_slice(),
            None => &[],
        }
    }

    /// Returns the number of distinct keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Iterates distinct keys with their values, in order of first occurrence
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.index.iter().map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterates every `(key, value)` pair in submission order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Args {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        args.extend(iter);
        args
    }
}
