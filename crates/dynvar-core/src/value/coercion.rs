//! Coerced accessors for `Value`.
//!
//! Numeric requests convert within the integer/real families through checked
//! `num-traits` casts: widening is exact, narrowing is range-checked, and
//! float→integer truncates toward zero. Out-of-range requests and wrong-family
//! requests both report `IncompatibleType`.

use crate::{
    error::ValueError,
    value::{
        Value,
        compare::{Numeric, numeric_repr},
    },
};
use num_traits::NumCast;

///
/// FromValue
///
/// Coercion target for [`Value::to`]. Implemented for `bool`, every native
/// integer width, both float widths, and `String`.
///

pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ValueError>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_bool().ok_or_else(|| incompatible("boolean", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_text()
            .map(ToString::to_string)
            .ok_or_else(|| incompatible("text", value))
    }
}

macro_rules! impl_from_value_numeric {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FromValue for $type {
                fn from_value(value: &Value) -> Result<Self, ValueError> {
                    cast_numeric(value).ok_or_else(|| incompatible(stringify!($type), value))
                }
            }
        )*
    };
}

impl_from_value_numeric! {
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64,
}

fn cast_numeric<T: NumCast>(value: &Value) -> Option<T> {
    match numeric_repr(value)? {
        Numeric::Int(i) => num_traits::cast(i),
        Numeric::Real(r) => num_traits::cast(r),
    }
}

fn incompatible(requested: &'static str, value: &Value) -> ValueError {
    ValueError::IncompatibleType {
        requested,
        actual: value.family().label(),
    }
}

///
/// TESTS
///
