//! Flat tag scanner
//!
//! Binds annotated struct fields straight from an [`Args`] multimap. Every field listed by
//! the target's [`Bind`] implementation is visited in declaration order; a field takes part
//! only when it carries an annotation in the requested namespace, and the annotation's key
//! is present in the multimap.
//!
//! Scalars take the first value registered under the key, sequences take every value in
//! submission order, and byte sequences receive the raw bytes of the first value. The first
//! coercion failure aborts the scan. Fields assigned before the failure keep their new
//! values.

use crate::args::Args;
use crate::error::BindError;
use crate::field::{Bind, Shape};
use tracing::{debug, trace};

/// Annotation value excluding a field from binding.
pub const IGNORE: &str = "-";

/// A parsed field annotation of the form `key[,modifier...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'t> {
    key: &'t str,
    modifiers: Option<&'t str>,
}

impl<'t> Tag<'t> {
    /// Parses a raw annotation, returning `None` when it excludes the field from binding
    pub fn parse(raw: &'t str) -> Option<Self> {
        if raw.is_empty() || raw == IGNORE {
            return None;
        }

        let (key, modifiers) = match raw.split_once(',') {
            Some((key, modifiers)) => (key, Some(modifiers)),
            None => (raw, None),
        };

        if key.is_empty() {
            return None;
        }

        Some(Self { key, modifiers })
    }

    /// Returns the binding key
    pub fn key(&self) -> &'t str {
        self.key
    }

    pub fn modifiers(&self) -> impl Iterator<Item = &'t str> {
        self.modifiers.into_iter().flat_map(|m| m.split(',')).filter(|m| !m.is_empty())
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers().any(|m| m == modifier)
    }
}

/// Fills the fields of `target` annotated in `namespace` from `args`.
///
/// Returns the binding keys that were matched and coerced, in the order the fields were
/// visited. Byte fields are filled verbatim and left out of the returned keys. Keys missing from `args` leave their fields untouched
/// and are not errors.
///
/// # Errors
///
/// Returns [`BindError::Decode`] for the first value that fails to coerce into its field,
/// naming the binding key, the raw value and the expected kind.
pub fn scan_args<T>(args: &Args, target: &mut T, namespace: &str) -> Result<Vec<&'static str>, BindError>
where
    T: Bind + ?Sized,
{
    let mut matched = Vec::new();

    for mut field in target.fields() {
        let Some(tag) = field.tag(namespace).and_then(Tag::parse) else {
            continue;
        };

        let key = tag.key();
        let values = args.peek_multi(key);
        let Some(first) = values.first() else {
            continue;
        };

        let name = field.name();
        let slot = field.slot();
        match slot.shape() {
            Shape::Opaque => {
                trace!(field = name, key, "skip field which is not bindable");
                continue;
            }
            Shape::Bytes => {
                // assigned as is, but not reported as matched
                slot.set_bytes(first.as_bytes());
                continue;
            }
            Shape::Sequence => slot
                .set_sequence(values)
                .map_err(|rejected| BindError::decode(key, rejected.value, rejected.expected))?,
            Shape::Scalar => slot.set_scalar(first).map_err(|expected| BindError::decode(key, first, expected))?,
        }

        matched.push(key);
    }

    debug!(namespace, matched = ?matched, "scanned args");
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind_fields;

    #[derive(Debug, Default, PartialEq)]
    struct Test {
        str1: String,
        str_block: String,
        str_no_tag: Option<String>,
        strings: Vec<String>,
        bytes: Vec<u8>,
        int1: i64,
        ints: Vec<i64>,
        non_existent_ints: Vec<i64>,
        bool1: bool,
        bools: Vec<bool>,
        non_existent: Vec<String>,
        bad_num: i64,
        bad_num_slice: Vec<i64>,
        other_tag: String,
        omit_empty: String,
        other_tags: String,
        nan: f64,
    }

    bind_fields!(Test {
        str1: url = "str1";
        str_block: url = "-";
        str_no_tag;
        strings: url = "str";
        bytes: url = "bytes";
        int1: url = "int1";
        ints: url = "int";
        non_existent_ints: url = "nonint";
        bool1: url = "bool1";
        bools: url = "bool";
        non_existent: url = "non";
        bad_num: url = "badnum";
        bad_num_slice: url = "badnumslice";
        other_tag: form = "otherval";
        omit_empty: form = "otherval,omitempty";
        other_tags: url = "othertags", json = "othertags";
        nan: url = "nan", json = "nan";
    });

    fn args() -> Args {
        let mut args = Args::new();
        args.add("str1", "string1");
        args.add("str", "str1");
        args.add("str", "str2");
        args.add("str", "str3");
        args.add("bytes", "manybytes");
        args.add("int1", "123");
        args.add("int", "456");
        args.add("int", "789");
        args.add("bool1", "true");
        args.add("bool", "true");
        args.add("bool", "false");
        args.add("bool", "f");
        args.add("bool", "t");
        args
    }

    #[test]
    fn scan_struct() {
        let mut o = Test::default();

        let matched = scan_args(&args(), &mut o, "url").unwrap();

        let expected = Test {
            str1: "string1".into(),
            strings: vec!["str1".into(), "str2".into(), "str3".into()],
            bytes: b"manybytes".to_vec(),
            int1: 123,
            ints: vec![456, 789],
            bool1: true,
            bools: vec![true, false, false, true],
            ..Test::default()
        };
        assert_eq!(o, expected);
        assert_eq!(matched, ["str1", "str", "int1", "int", "bool1", "bool"]);
    }

    #[test]
    fn ignored_and_untagged_fields_are_untouched() {
        let mut args = args();
        args.add("-", "ignored");
        args.add("str_block", "ignored");
        args.add("str_no_tag", "ignored");
        let mut o = Test { str_block: "keep".into(), ..Test::default() };

        scan_args(&args, &mut o, "url").unwrap();

        assert_eq!(o.str_block, "keep");
        assert_eq!(o.str_no_tag, None);
    }

    #[test]
    fn bad_scalar() {
        let mut args = args();
        args.add("badnum", "abc");
        let mut o = Test::default();

        let err = scan_args(&args, &mut o, "url").unwrap_err();

        assert_eq!(err.to_string(), "failed to decode `badnum`, got: `abc` (expected int)");
    }

    #[test]
    fn bad_sequence_reports_first_bad_value() {
        let mut args = args();
        args.add("badnumslice", "abc");
        args.add("badnumslice", "def");
        let mut o = Test::default();

        let err = scan_args(&args, &mut o, "url").unwrap_err();

        assert_eq!(err.to_string(), "failed to decode `badnumslice`, got: `abc` (expected int)");
        assert!(o.bad_num_slice.is_empty());
    }

    #[test]
    fn failure_keeps_earlier_fields_and_stops() {
        let mut args = Args::new();
        args.add("othertags", "later");
        args.add("badnum", "x");
        args.add("str1", "earlier");
        let mut o = Test::default();

        assert!(matches!(scan_args(&args, &mut o, "url"), Err(BindError::Decode { .. })));

        // str1 is declared before badnum, othertags after it
        assert_eq!(o.str1, "earlier");
        assert_eq!(o.other_tags, "");
    }

    #[test]
    fn float_rejects_non_finite() {
        let mut args = Args::new();
        for raw in ["NaN", "nan", "Inf", "Infinity", "+INF", "-INF", "-inf", "infinity"] {
            args.set("nan", raw);
            let mut o = Test::default();
            let err = scan_args(&args, &mut o, "url").unwrap_err();
            assert_eq!(err.to_string(), format!("failed to decode `nan`, got: `{raw}` (expected decimal)"));
        }
    }

    #[test]
    fn float_accepts_finite() {
        let mut args = Args::new();
        for (raw, expected) in [("0", 0.0), ("0.0", 0.0), ("-0", 0.0), ("-1.2", -1.2), ("1.2", 1.2), ("1", 1.0), ("-1", -1.0)] {
            args.set("nan", raw);
            let mut o = Test::default();
            scan_args(&args, &mut o, "url").unwrap();
            assert_eq!(o.nan, expected, "{raw}");
        }
    }

    #[test]
    fn namespaces_are_independent() {
        let mut args = args();
        args.add("otherval", "other");
        let mut o = Test::default();

        let matched = scan_args(&args, &mut o, "form").unwrap();

        assert_eq!(matched, ["otherval", "otherval"]);
        assert_eq!(o.other_tag, "other");
        assert_eq!(o.omit_empty, "other");
        assert_eq!(o.str1, "");

        let matched = scan_args(&args, &mut o, "json").unwrap();
        assert!(matched.is_empty());
    }

    #[test]
    fn scalar_takes_first_value() {
        let args: Args = [("int1", "1"), ("int1", "oops")].into_iter().collect();
        let mut o = Test::default();

        scan_args(&args, &mut o, "url").unwrap();

        assert_eq!(o.int1, 1);
    }

    #[test]
    fn bytes_are_raw_first_value() {
        let args: Args = [("bytes", "1,2"), ("bytes", "second"), ("str1", "s")].into_iter().collect();
        let mut o = Test::default();

        let matched = scan_args(&args, &mut o, "url").unwrap();

        assert_eq!(o.bytes, b"1,2");
        assert_eq!(matched, ["str1"]);
    }

    #[test]
    fn parse_tag() {
        assert_eq!(Tag::parse(""), None);
        assert_eq!(Tag::parse("-"), None);
        assert_eq!(Tag::parse(",omitempty"), None);

        let tag = Tag::parse("name").unwrap();
        assert_eq!(tag.key(), "name");
        assert_eq!(tag.modifiers().count(), 0);

        let tag = Tag::parse("name,omitempty,required").unwrap();
        assert_eq!(tag.key(), "name");
        assert!(tag.has_modifier("omitempty"));
        assert!(tag.has_modifier("required"));
        assert!(!tag.has_modifier("name"));

        // a dash followed by a comma is a key named "-"
        assert_eq!(Tag::parse("-,").unwrap().key(), "-");
    }
}
