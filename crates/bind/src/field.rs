//! Field slots the flat scanner writes into.
//!
//! The scanner never inspects a target type directly. Each bindable struct hands out a
//! list of [`FieldRef`]s (usually generated by [`bind_fields!`](crate::bind_fields)),
//! and every field type describes how it is filled through the [`Field`] trait.

use crate::coerce::Coerce;
use crate::error::Expected;
use bytes::Bytes;
use std::fmt;

/// How a field consumes the values registered under its binding key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Takes the first value, coerced into the field's scalar kind.
    Scalar,
    /// Takes every value, each coerced into the element kind.
    Sequence,
    /// Takes the raw bytes of the first value, without coercion.
    Bytes,
    /// Not bindable; the scanner leaves it untouched.
    Opaque,
}

/// A raw value that failed to coerce while filling a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected<'v> {
    pub value: &'v str,
    pub expected: Expected,
}

/// A field the flat scanner knows how to fill.
///
/// The default implementation describes an opaque field, so `impl Field for MyType {}`
/// is enough to list a non-bindable field in [`bind_fields!`](crate::bind_fields).
pub trait Field {
    fn shape(&self) -> Shape {
        Shape::Opaque
    }

    fn set_scalar(&mut self, _raw: &str) -> Result<(), Expected> {
        Ok(())
    }

    fn set_sequence<'v>(&mut self, _raw: &'v [String]) -> Result<(), Rejected<'v>> {
        Ok(())
    }

    fn set_bytes(&mut self, _raw: &[u8]) {}
}

fn coerce_all<T: Coerce>(raw: &[String]) -> Result<Vec<T>, Rejected<'_>> {
    let mut values = Vec::with_capacity(raw.len());
    for value in raw {
        let coerced = T::coerce(value).map_err(|expected| Rejected { value, expected })?;
        values.push(coerced);
    }
    Ok(values)
}

macro_rules! impl_scalar_field {
    ($($ty:ty)*) => {
        $(
            impl Field for $ty {
                fn shape(&self) -> Shape {
                    Shape::Scalar
                }

                fn set_scalar(&mut self, raw: &str) -> Result<(), Expected> {
                    *self = <$ty>::coerce(raw)?;
                    Ok(())
                }
            }

            impl Field for Option<$ty> {
                fn shape(&self) -> Shape {
                    Shape::Scalar
                }

                fn set_scalar(&mut self, raw: &str) -> Result<(), Expected> {
                    *self = Some(<$ty>::coerce(raw)?);
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! impl_sequence_field {
    ($($ty:ty)*) => {
        $(
            impl Field for Vec<$ty> {
                fn shape(&self) -> Shape {
                    Shape::Sequence
                }

                fn set_sequence<'v>(&mut self, raw: &'v [String]) -> Result<(), Rejected<'v>> {
                    *self = coerce_all(raw)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_scalar_field! { i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize f32 f64 bool String }

// `Vec<u8>` is deliberately absent here, byte sequences bind raw
impl_sequence_field! { i8 i16 i32 i64 i128 isize u16 u32 u64 u128 usize f32 f64 bool String }

impl Field for Vec<u8> {
    fn shape(&self) -> Shape {
        Shape::Bytes
    }

    fn set_bytes(&mut self, raw: &[u8]) {
        *self = raw.to_vec();
    }
}

impl Field for Bytes {
    fn shape(&self) -> Shape {
        Shape::Bytes
    }

    fn set_bytes(&mut self, raw: &[u8]) {
        *self = Bytes::copy_from_slice(raw);
    }
}

/// One entry of a bindable struct's field table.
///
/// Carries the field's declared name, its annotations keyed by namespace (for example
/// `("url", "tradingsymbol")` or `("form", "symbol,omitempty")`), and a mutable handle
/// to the field itself.
pub struct FieldRef<'a> {
    name: &'static str,
    tags: &'static [(&'static str, &'static str)],
    slot: &'a mut dyn Field,
}

impl<'a> FieldRef<'a> {
    pub fn new(name: &'static str, tags: &'static [(&'static str, &'static str)], slot: &'a mut dyn Field) -> Self {
        Self { name, tags, slot }
    }

    /// Returns the declared field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the raw annotation declared for `namespace`, if any
    pub fn tag(&self, namespace: &str) -> Option<&'static str> {
        self.tags.iter().find(|(ns, _)| *ns == namespace).map(|(_, tag)| *tag)
    }

    pub fn slot(&mut self) -> &mut (dyn Field + 'a) {
        &mut *self.slot
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("shape", &self.slot.shape())
            .finish()
    }
}

/// A struct whose fields can be filled by the flat tag scanner.
///
/// Implementations return the fields in declaration order. Use
/// [`bind_fields!`](crate::bind_fields) rather than implementing this by hand.
pub trait Bind {
    fn fields(&mut self) -> Vec<FieldRef<'_>>;
}
