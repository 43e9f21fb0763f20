use crate::value::{Value, rank::canonical_rank};
use std::cmp::Ordering;

///
/// Numeric
///
/// Integer/real payload widened for cross-width comparison. Every integer
/// alternative fits `i128`; both float widths widen losslessly to `f64`.
///

pub(crate) enum Numeric {
    Int(i128),
    Real(f64),
}

/// Widened numeric payload of the live alternative, if any.
#[must_use]
pub(crate) fn numeric_repr(value: &Value) -> Option<Numeric> {
    match *value {
        Value::Int8(v) => Some(Numeric::Int(i128::from(v))),
        Value::Int16(v) => Some(Numeric::Int(i128::from(v))),
        Value::Int32(v) => Some(Numeric::Int(i128::from(v))),
        Value::Int64(v) => Some(Numeric::Int(i128::from(v))),
        Value::Uint8(v) => Some(Numeric::Int(i128::from(v))),
        Value::Uint16(v) => Some(Numeric::Int(i128::from(v))),
        Value::Uint32(v) => Some(Numeric::Int(i128::from(v))),
        Value::Uint64(v) => Some(Numeric::Int(i128::from(v))),
        Value::Float32(v) => Some(Numeric::Real(f64::from(v))),
        Value::Float64(v) => Some(Numeric::Real(v)),
        _ => None,
    }
}

/// Total canonical comparator backing `Ord`/`Eq` on `Value`.
///
/// Ordering rules:
/// 1. Integer/real operands compare by exact numeric value, across families.
/// 2. Otherwise, canonical family rank decides mixed-family pairs.
/// 3. Same-family pairs compare by content (recursively for containers).
///
/// The relation is a strict weak ordering: cross-width numeric equality is
/// an equivalence (`Int8(2)` equals `Int64(2)` equals `Float64(2.0)`).
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    if let (Some(a), Some(b)) = (numeric_repr(left), numeric_repr(right)) {
        return cmp_numeric(&a, &b);
    }

    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_family(left, right)
}

fn canonical_cmp_same_family(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_list(a, b),
        (Value::Map(a), Value::Map(b)) => canonical_cmp_map(a, b),
        // Numeric pairs are resolved before the rank comparison; remaining
        // mixed-family pairs are decided by rank alone.
        _ => Ordering::Equal,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn canonical_cmp_map(left: &[(Value, Value)], right: &[(Value, Value)]) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = canonical_cmp(left_key, right_key);
        if key_cmp != Ordering::Equal {
            return key_cmp;
        }

        let value_cmp = canonical_cmp(left_value, right_value);
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn cmp_numeric(left: &Numeric, right: &Numeric) -> Ordering {
    match (left, right) {
        (Numeric::Int(a), Numeric::Int(b)) => a.cmp(b),
        (Numeric::Real(a), Numeric::Real(b)) => cmp_real(*a, *b),
        (Numeric::Int(a), Numeric::Real(b)) => cmp_int_real(*a, *b),
        (Numeric::Real(a), Numeric::Int(b)) => cmp_int_real(*b, *a).reverse(),
    }
}

// -0.0 and 0.0 form one equivalence class; NaN payloads order by the IEEE
// total order so the relation stays total for non-finite input.
fn cmp_real(a: f64, b: f64) -> Ordering {
    if a == b { Ordering::Equal } else { a.total_cmp(&b) }
}

/// Exact integer-vs-float comparison. No precision-losing casts: magnitudes
/// beyond 2^53 compare through the float's truncated whole part.
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_real(int: i128, real: f64) -> Ordering {
    if real.is_nan() {
        // IEEE total order puts negative NaN below, positive NaN above,
        // every number.
        return if real.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if real == f64::INFINITY {
        return Ordering::Less;
    }
    if real == f64::NEG_INFINITY {
        return Ordering::Greater;
    }

    // Both bounds are powers of two, hence exact as f64.
    let truncated = real.trunc();
    if truncated >= i128::MAX as f64 {
        return Ordering::Less;
    }
    if truncated < i128::MIN as f64 {
        return Ordering::Greater;
    }

    // In-range integral f64 converts exactly.
    let whole = truncated as i128;
    match int.cmp(&whole) {
        Ordering::Equal => {
            // trunc() rounds toward zero, so the sign of the fractional part
            // decides the tie.
            if real > truncated {
                Ordering::Less
            } else if real < truncated {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        decided => decided,
    }
}
