//! Stable content fingerprints for `Value` trees.
//!
//! The digest agrees with canonical equality: equal values hash identically,
//! across numeric widths (`Int8(2)` and `Float64(2.0)` collide by design) and
//! independent of how a map was assembled.

use crate::value::{
    Value,
    compare::{Numeric, numeric_repr},
};
use sha2::{Digest, Sha256};

// Family-group bytes. Integer and real share one numeric group because
// canonical equality merges them.
const GROUP_NULL: u8 = 0x00;
const GROUP_BOOL: u8 = 0x01;
const GROUP_NUMBER: u8 = 0x02;
const GROUP_TEXT: u8 = 0x03;
const GROUP_LIST: u8 = 0x04;
const GROUP_MAP: u8 = 0x05;

const NUMBER_INT: u8 = 0x00;
const NUMBER_REAL: u8 = 0x01;

/// Stable 32-byte content digest of a value tree.
#[must_use]
pub(super) fn fingerprint(value: &Value) -> [u8; 32] {
    let mut hasher = Sha256::new();
    write_to_hasher(value, &mut hasher);
    hasher.finalize().into()
}

fn feed_u64(h: &mut Sha256, x: u64) {
    h.update(x.to_be_bytes());
}

fn feed_len(h: &mut Sha256, len: usize) {
    feed_u64(h, len as u64);
}

#[allow(clippy::cast_possible_truncation)]
fn write_to_hasher(value: &Value, h: &mut Sha256) {
    match value {
        Value::Null => h.update([GROUP_NULL]),
        Value::Bool(b) => h.update([GROUP_BOOL, u8::from(*b)]),
        Value::Text(s) => {
            h.update([GROUP_TEXT]);
            feed_len(h, s.len());
            h.update(s.as_bytes());
        }
        Value::List(items) => {
            h.update([GROUP_LIST]);
            feed_len(h, items.len());
            for item in items {
                write_to_hasher(item, h);
            }
        }
        Value::Map(entries) => {
            h.update([GROUP_MAP]);
            feed_len(h, entries.len());
            for (key, mapped) in entries {
                write_to_hasher(key, h);
                write_to_hasher(mapped, h);
            }
        }
        numeric => {
            // Every numeric alternative is covered by numeric_repr.
            let Some(repr) = numeric_repr(numeric) else {
                return;
            };

            match canonical_number(&repr) {
                CanonicalNumber::Int(i) => {
                    h.update([GROUP_NUMBER, NUMBER_INT]);
                    h.update(i.to_be_bytes());
                }
                CanonicalNumber::Real(bits) => {
                    h.update([GROUP_NUMBER, NUMBER_REAL]);
                    h.update(bits.to_be_bytes());
                }
            }
        }
    }
}

enum CanonicalNumber {
    Int(i128),
    Real(u64),
}

// Integral reals collapse into the integer form so `2`, `2u64`, and `2.0`
// share a digest, exactly as they share an equivalence class.
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
fn canonical_number(repr: &Numeric) -> CanonicalNumber {
    match *repr {
        Numeric::Int(i) => CanonicalNumber::Int(i),
        Numeric::Real(r) => {
            let integral =
                r.fract() == 0.0 && r >= i128::MIN as f64 && r < i128::MAX as f64;
            if integral {
                CanonicalNumber::Int(r as i128)
            } else {
                CanonicalNumber::Real(r.to_bits())
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::value::Value;

    #[test]
    fn equal_values_share_a_fingerprint_across_widths() {
        assert_eq!(
            Value::from(2i8).fingerprint(),
            Value::from(2u64).fingerprint()
        );
        assert_eq!(
            Value::from(2i8).fingerprint(),
            Value::from(2.0f64).fingerprint()
        );
        assert_eq!(
            Value::from(1.5f32).fingerprint(),
            Value::from(1.5f64).fingerprint()
        );
    }

    #[test]
    fn distinct_values_diverge() {
        assert_ne!(Value::from(2).fingerprint(), Value::from(3).fingerprint());
        assert_ne!(
            Value::from("2").fingerprint(),
            Value::from(2).fingerprint()
        );
        assert_ne!(Value::Null.fingerprint(), Value::from(0).fingerprint());
    }

    #[test]
    fn map_fingerprint_is_assembly_order_independent() {
        let forward = Value::from_map(vec![
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from(2)),
        ])
        .expect("map should normalize");
        let reverse = Value::from_map(vec![
            (Value::from("b"), Value::from(2)),
            (Value::from("a"), Value::from(1)),
        ])
        .expect("map should normalize");

        assert_eq!(forward.fingerprint(), reverse.fingerprint());
    }
}
