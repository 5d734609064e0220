//! Conversion of raw parameter text into scalar values.
//!
//! Every scalar kind the flat scanner understands implements [`Coerce`]. A failed
//! conversion reports the kind that was expected via [`Expected`], which the scanner
//! then combines with the binding key and the offending raw value.

use crate::error::Expected;

/// A scalar type that can be parsed out of a single raw parameter value.
pub trait Coerce: Sized {
    fn coerce(raw: &str) -> Result<Self, Expected>;
}

macro_rules! impl_coerce_signed {
    ($($ty:ty)*) => {
        $(
            impl Coerce for $ty {
                #[inline]
                fn coerce(raw: &str) -> Result<Self, Expected> {
                    raw.parse::<$ty>().ok().ok_or(Expected::Int)
                }
            }
        )*
    };
}

macro_rules! impl_coerce_unsigned {
    ($($ty:ty)*) => {
        $(
            impl Coerce for $ty {
                #[inline]
                fn coerce(raw: &str) -> Result<Self, Expected> {
                    // unsigned values carry no sign, not even `+`
                    if raw.starts_with('+') {
                        return Err(Expected::UnsignedInt);
                    }
                    raw.parse::<$ty>().ok().ok_or(Expected::UnsignedInt)
                }
            }
        )*
    };
}

// decimal and exponent notation only, hex float literals are rejected
macro_rules! impl_coerce_float {
    ($($ty:ty)*) => {
        $(
            impl Coerce for $ty {
                #[inline]
                fn coerce(raw: &str) -> Result<Self, Expected> {
                    match raw.parse::<$ty>() {
                        Ok(v) if v.is_finite() => Ok(v),
                        _ => Err(Expected::Decimal),
                    }
                }
            }
        )*
    };
}

impl_coerce_signed! { i8 i16 i32 i64 i128 isize }
impl_coerce_unsigned! { u8 u16 u32 u64 u128 usize }
impl_coerce_float! { f32 f64 }

impl Coerce for bool {
    fn coerce(raw: &str) -> Result<Self, Expected> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(Expected::Boolean),
        }
    }
}

impl Coerce for String {
    #[inline]
    fn coerce(raw: &str) -> Result<Self, Expected> {
        Ok(raw.to_owned())
    }
}
