use crate::value::{Value, family};

///
/// Canonical Value Rank
///
/// Stable rank used for cross-family ordering precedence.
///
/// Numeric values (integer/real) share a rank band but compare by magnitude
/// across the two families; see `compare::canonical_cmp`.
///

#[must_use]
pub(super) const fn canonical_rank(value: &Value) -> u8 {
    family::canonical_family(value).rank()
}
