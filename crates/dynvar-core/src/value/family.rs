//! Coarse family classification for `Value`.
//!
//! The family ("symbol") drives ordering precedence and coercion routing;
//! exact-alternative dispatch uses `ValueTag` instead.

use crate::value::Value;
use derive_more::Display;

///
/// Family
///
/// Coarse value classification: every alternative belongs to exactly one
/// family. Cross-family ordering precedence is family-rank driven, except for
/// the Integer/Real pair which compares numerically (see `compare`).
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Family {
    #[display("null")]
    Null,
    #[display("boolean")]
    Bool,
    #[display("integer")]
    Integer,
    #[display("real")]
    Real,
    #[display("text")]
    Text,
    #[display("list")]
    List,
    #[display("map")]
    Map,
}

impl Family {
    /// Canonical cross-family rank.
    ///
    /// IMPORTANT:
    /// Rank order is part of deterministic ordering behavior and must remain
    /// fixed.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool => 1,
            Self::Integer => 2,
            Self::Real => 3,
            Self::Text => 4,
            Self::List => 5,
            Self::Map => 6,
        }
    }

    /// Stable human-readable family label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
        }
    }

    /// Returns true when the family carries a numeric payload.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }
}

/// Coarse family of the live alternative.
#[must_use]
pub(super) const fn canonical_family(value: &Value) -> Family {
    match value {
        Value::Null => Family::Null,
        Value::Bool(_) => Family::Bool,
        Value::Int8(_)
        | Value::Int16(_)
        | Value::Int32(_)
        | Value::Int64(_)
        | Value::Uint8(_)
        | Value::Uint16(_)
        | Value::Uint32(_)
        | Value::Uint64(_) => Family::Integer,
        Value::Float32(_) | Value::Float64(_) => Family::Real,
        Value::Text(_) => Family::Text,
        Value::List(_) => Family::List,
        Value::Map(_) => Family::Map,
    }
}
