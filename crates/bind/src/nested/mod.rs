//! Nested-key tree builder
//!
//! Turns bracket-notation keys into a single JSON tree and decodes that tree with serde,
//! matching tree keys to fields by name. A query string like
//!
//! ```text
//! cat=1&bar%5Bone%5D%5Btwo%5D=2&bar[one][red]=112
//! ```
//!
//! becomes `{"cat":1,"bar":{"one":{"two":2,"red":112}}}`.
//!
//! Each `(key, value)` pair is first built into its own small tree, then merged into the
//! accumulated result in submission order:
//!
//! - objects merge key by key,
//! - arrays concatenate,
//! - any other pairing is overwritten by the later value.
//!
//! An empty bracket pair marks a collection, so `items[]=1&items[]=2` yields
//! `{"items":[1,2]}`. Numeric segments are object keys, not positions: `legs[1]=a` yields
//! `{"legs":{"1":"a"}}`.
//!
//! Leaf values are read as a JSON number, boolean or `null` when they parse as one, and as
//! a string otherwise.

mod key;
mod merge;

use crate::args::Args;
use crate::error::BindError;
use crate::utils::ensure;
use key::split_key;
use merge::merge;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Default limit on the number of bracket segments in a single key.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Builds and decodes nested parameter trees.
///
/// # Example
/// ```
/// use micro_bind::{Args, TreeBuilder};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Filter {
///     price: Range,
///     tags: Vec<String>,
/// }
///
/// #[derive(Deserialize)]
/// struct Range {
///     min: u32,
///     max: u32,
/// }
///
/// let args = Args::parse("price[min]=10&price[max]=20&tags[]=new&tags[]=sale").unwrap();
/// let filter: Filter = TreeBuilder::new().max_depth(4).decode(&args).unwrap();
///
/// assert_eq!((filter.price.min, filter.price.max), (10, 20));
/// assert_eq!(filter.tags, ["new", "sale"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many bracket segments a single key may carry
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builds the merged tree for every pair in `args`
    ///
    /// # Errors
    ///
    /// Fails on the first key with malformed brackets, or nested deeper than the limit.
    pub fn build(&self, args: &Args) -> Result<Value, BindError> {
        let mut tree = Value::Object(Map::new());

        for (key, value) in args.pairs() {
            let segments = split_key(key)?;
            ensure!(segments.len() - 1 <= self.max_depth, BindError::too_deep(key, self.max_depth));

            let mut node = Map::with_capacity(1);
            node.insert(segments[0].to_owned(), value_at(&segments, value));
            tree = merge(tree, Value::Object(node));
        }

        Ok(tree)
    }

    /// Builds the merged tree and serializes it to canonical JSON
    pub fn to_json(&self, args: &Args) -> Result<Vec<u8>, BindError> {
        let tree = self.build(args)?;
        Ok(serde_json::to_vec(&tree)?)
    }

    /// Builds the merged tree and decodes it into `T` by field name
    ///
    /// # Errors
    ///
    /// Besides the errors of [`TreeBuilder::build`], fails with [`BindError::Json`] when
    /// `T` can not represent the shape of the tree.
    pub fn decode<T: DeserializeOwned>(&self, args: &Args) -> Result<T, BindError> {
        let json = self.to_json(args)?;
        debug!(json = %String::from_utf8_lossy(&json), "decode nested args");
        Ok(serde_json::from_slice(&json)?)
    }
}

/// Builds the merged tree for `args` with the default depth limit.
pub fn to_tree(args: &Args) -> Result<Value, BindError> {
    TreeBuilder::default().build(args)
}

/// Builds the merged tree for `args` and serializes it to canonical JSON.
pub fn to_json(args: &Args) -> Result<Vec<u8>, BindError> {
    TreeBuilder::default().to_json(args)
}

/// Decodes bracket-notation `args` into `T`, matching keys to fields by name.
pub fn from_args<T: DeserializeOwned>(args: &Args) -> Result<T, BindError> {
    TreeBuilder::default().decode(args)
}

/// Returns the value stored under `segments[0]` for the remaining segments.
fn value_at(segments: &[&str], raw: &str) -> Value {
    match segments {
        [] | [_] => scalar(raw),
        [_, rest @ ..] => {
            let inner = value_at(rest, raw);
            // `[]` wraps the value as a one element collection
            if rest[0].is_empty() {
                Value::Array(vec![inner])
            } else {
                let mut map = Map::with_capacity(1);
                map.insert(rest[0].to_owned(), inner);
                Value::Object(map)
            }
        }
    }
}

fn scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Null | Value::Bool(_) | Value::Number(_))) => value,
        _ => Value::String(raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(query: &str) -> Value {
        to_tree(&Args::parse(query).unwrap()).unwrap()
    }

    #[test]
    fn readme_example() {
        let json = to_json(&Args::parse("cat=1&bar%5Bone%5D%5Btwo%5D=2&bar[one][red]=112").unwrap()).unwrap();
        assert_eq!(json, br#"{"cat":1,"bar":{"one":{"two":2,"red":112}}}"#);
    }

    #[test]
    fn siblings_survive() {
        assert_eq!(tree("bar[one][two]=2&bar[one][red]=112"), json!({"bar": {"one": {"two": 2, "red": 112}}}));
    }

    #[test]
    fn array_marker_concatenates() {
        assert_eq!(tree("items[]=1&items[]=2"), json!({"items": [1, 2]}));
        assert_eq!(tree("a[b][]=x&a[b][]=y"), json!({"a": {"b": ["x", "y"]}}));
        assert_eq!(tree("a[][b]=1&a[][c]=2"), json!({"a": [{"b": 1}, {"c": 2}]}));
    }

    #[test]
    fn numeric_segments_are_object_keys() {
        assert_eq!(tree("legs[1]=a&legs[0]=b"), json!({"legs": {"1": "a", "0": "b"}}));
    }

    #[test]
    fn scalar_inference() {
        assert_eq!(scalar("12"), json!(12));
        assert_eq!(scalar("-4.5"), json!(-4.5));
        assert_eq!(scalar("true"), json!(true));
        assert_eq!(scalar("null"), json!(null));
        assert_eq!(scalar("completed"), json!("completed"));
        // leading zeros are not a json number
        assert_eq!(scalar("007"), json!("007"));
        // json strings, arrays and objects stay literal text
        assert_eq!(scalar(r#""quoted""#), json!(r#""quoted""#));
        assert_eq!(scalar("[1,2]"), json!("[1,2]"));
        assert_eq!(scalar(r#"{"a":1}"#), json!(r#"{"a":1}"#));
        assert_eq!(scalar(""), json!(""));
    }

    #[test]
    fn last_writer_wins_by_submission_order() {
        assert_eq!(tree("a=1&a=2"), json!({"a": 2}));
        assert_eq!(tree("a[b]=1&a[b]=x"), json!({"a": {"b": "x"}}));
        assert_eq!(tree("a=1&a[b]=2&a=3"), json!({"a": 3}));
        assert_eq!(tree("a[b]=2&a=1"), json!({"a": 1}));
        assert_eq!(tree("a=1&a[b]=2"), json!({"a": {"b": 2}}));
    }

    #[test]
    fn interleaved_collections_keep_submission_order() {
        assert_eq!(
            tree("coupons[][code]=A&coupons[][qty]=1&coupons[][code]=B"),
            json!({"coupons": [{"code": "A"}, {"qty": 1}, {"code": "B"}]})
        );
        assert_eq!(tree("x[]=1&y[]=2&x[]=3"), json!({"x": [1, 3], "y": [2]}));
    }

    #[test]
    fn malformed_key_is_rejected() {
        let err = to_tree(&Args::parse("ok=1&a%5Bb=1").unwrap()).unwrap_err();
        assert!(matches!(err, BindError::InvalidKey { ref key, .. } if key == "a[b"));
    }

    #[test]
    fn depth_limit() {
        let args = Args::parse("a[b][c]=1").unwrap();

        assert!(TreeBuilder::new().max_depth(2).build(&args).is_ok());

        let err = TreeBuilder::new().max_depth(1).build(&args).unwrap_err();
        assert_eq!(err.to_string(), "key `a[b][c]` nests deeper than 1 levels");
    }

    #[test]
    fn empty_args() {
        assert_eq!(to_tree(&Args::new()).unwrap(), json!({}));
    }
}
