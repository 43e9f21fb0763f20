mod coercion;
mod compare;
mod family;
mod fingerprint;
mod iter;
mod rank;
mod tag;
mod wire;


use crate::error::ValueError;
use serde::Serialize;
use std::{
    cmp::Ordering,
    ops::{AddAssign, Index, IndexMut, Range},
    string::FromUtf16Error,
};
use thiserror::Error as ThisError;

// re-exports
pub use coercion::FromValue;
pub use compare::canonical_cmp;
pub use family::Family;
pub use iter::{Entries, Iter, IterMut, Keys};
pub use tag::ValueTag;

///
/// MapValueError
///
/// Invariant violations for `Value::Map` construction/normalization.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MapValueError {
    #[error("map contains duplicate keys at normalized positions {left_index} and {right_index}")]
    DuplicateKey {
        left_index: usize,
        right_index: usize,
    },
}

///
/// Value
///
/// Self-describing dynamic value. One alternative is live at a time; the
/// discriminant is the storage tag, exposed fine-grained as [`ValueTag`] and
/// coarse as [`Family`]. A value exclusively owns its subtree: cloning
/// deep-copies, moving transfers ownership, and no sub-value is ever shared
/// between two owners.
///
/// Equality and ordering go through the canonical comparator: values compare
/// by content, with numeric equality across widths (`Int8(2) == Uint64(2)`);
/// use [`Value::same`] to test the exact alternative instead.
///

#[derive(Clone, Debug, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Text(String),
    /// Ordered list of values. Element order is preserved.
    List(Vec<Self>),
    /// Canonical deterministic map representation.
    ///
    /// - Entries are always sorted ascending by canonical key order.
    /// - Keys are unique under canonical equality.
    /// - Prefer the [`Value::from_map`] factory and [`Value::insert`] over
    ///   constructing this variant by hand.
    Map(Vec<(Self, Self)>),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from a list literal.
    ///
    /// Intended for tests and inline construction.
    /// Requires `Clone` because items are borrowed.
    pub fn from_slice<T>(items: &[T]) -> Self
    where
        T: Into<Self> + Clone,
    {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a canonical `Value::Map` from owned key/value entries.
    ///
    /// Entries are sorted by canonical key order; duplicate keys are
    /// rejected.
    pub fn from_map(entries: Vec<(Self, Self)>) -> Result<Self, MapValueError> {
        let normalized = Self::normalize_map_entries(entries)?;
        Ok(Self::Map(normalized))
    }

    /// Normalize map entries into canonical deterministic order.
    pub fn normalize_map_entries(
        mut entries: Vec<(Self, Self)>,
    ) -> Result<Vec<(Self, Self)>, MapValueError> {
        entries.sort_by(|(left_key, _), (right_key, _)| canonical_cmp(left_key, right_key));

        for i in 1..entries.len() {
            let (left_key, _) = &entries[i - 1];
            let (right_key, _) = &entries[i];
            if canonical_cmp(left_key, right_key) == Ordering::Equal {
                return Err(MapValueError::DuplicateKey {
                    left_index: i - 1,
                    right_index: i,
                });
            }
        }

        Ok(entries)
    }

    /// Build a `Value::Text` by transcoding UTF-16 code units.
    ///
    /// All text is normalized into the single internal UTF-8 representation
    /// at construction time, so values built from different input widths
    /// compare with one lexicographic comparison.
    pub fn from_utf16(units: &[u16]) -> Result<Self, FromUtf16Error> {
        String::from_utf16(units).map(Self::Text)
    }

    ///
    /// DISCRIMINANTS
    ///

    /// Fine-grained alternative tag ("code") of the live alternative.
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    /// Coarse family ("symbol") of the live alternative.
    #[must_use]
    pub const fn family(&self) -> Family {
        family::canonical_family(self)
    }

    /// Returns true if the value's family matches `family`.
    #[must_use]
    pub const fn is(&self, family: Family) -> bool {
        self.family() as u8 == family as u8
    }

    /// Returns true only if the value's exact alternative matches `tag`.
    #[must_use]
    pub const fn same(&self, tag: ValueTag) -> bool {
        self.tag().to_u8() == tag.to_u8()
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self.family(), Family::Integer)
    }

    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self.family(), Family::Real)
    }

    /// Returns true when the value is numeric (integer or real family).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.family().is_numeric()
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        match self {
            Self::Null | Self::List(_) | Self::Map(_) => false,
            _ => true,
        }
    }

    ///
    /// ACCESS
    ///

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self { Some(*b) } else { None }
    }

    /// Integer-family payload widened to `i128`.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match compare::numeric_repr(self)? {
            compare::Numeric::Int(i) => Some(i),
            compare::Numeric::Real(_) => None,
        }
    }

    /// Integer-family payload, if it fits `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_i128().and_then(|i| i64::try_from(i).ok())
    }

    /// Integer-family payload, if it fits `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i128().and_then(|i| u64::try_from(i).ok())
    }

    /// Real-family payload widened to `f64`.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(items) = self {
            Some(items.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Self>> {
        if let Self::List(items) = self {
            Some(items)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&[(Self, Self)]> {
        if let Self::Map(entries) = self {
            Some(entries.as_slice())
        } else {
            None
        }
    }

    /// Contents coerced to the requested target type.
    ///
    /// Numeric requests convert within the integer/real families (checked,
    /// truncating toward zero for float→integer); text requests succeed only
    /// for text values. Anything else fails with
    /// [`ErrorKind::IncompatibleType`](crate::error::ErrorKind).
    pub fn to<T: FromValue>(&self) -> Result<T, ValueError> {
        T::from_value(self)
    }

    /// Slot-style variant of [`Value::to`]: writes the failure into `error`
    /// and returns `T::default()`. Both forms share one coercion path.
    pub fn to_with<T: FromValue + Default>(&self, error: &mut Option<ValueError>) -> T {
        match T::from_value(self) {
            Ok(value) => value,
            Err(err) => {
                *error = Some(err);
                T::default()
            }
        }
    }

    ///
    /// INDEXING
    ///

    /// Bounds-checked list element access.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Self> {
        if let Self::List(items) = self {
            items.get(index)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Self> {
        if let Self::List(items) = self {
            items.get_mut(index)
        } else {
            None
        }
    }

    /// Read-only map lookup by key. Never vivifies.
    pub fn lookup(&self, key: &Self) -> Result<&Self, ValueError> {
        let Self::Map(entries) = self else {
            return Err(incompatible(Family::Map, self.family()));
        };

        match entries.binary_search_by(|(existing, _)| canonical_cmp(existing, key)) {
            Ok(index) => Ok(&entries[index].1),
            Err(_) => Err(ValueError::KeyNotFound { key: key.clone() }),
        }
    }

    /// Mutable map lookup by key. Missing keys are an error; use
    /// [`Value::entry`] to insert-if-absent.
    pub fn lookup_mut(&mut self, key: &Self) -> Result<&mut Self, ValueError> {
        let family = self.family();
        let Self::Map(entries) = self else {
            return Err(incompatible(Family::Map, family));
        };

        match entries.binary_search_by(|(existing, _)| canonical_cmp(existing, key)) {
            Ok(index) => Ok(&mut entries[index].1),
            Err(_) => Err(ValueError::KeyNotFound { key: key.clone() }),
        }
    }

    /// Map insert-if-absent: returns the value slot for `key`, inserting
    /// `Null` when the key is new. A `Null` value vivifies into an empty map
    /// first; any other non-map family is an error.
    pub fn entry(&mut self, key: Self) -> Result<&mut Self, ValueError> {
        if self.is_null() {
            *self = Self::Map(Vec::new());
        }

        let family = self.family();
        let Self::Map(entries) = self else {
            return Err(incompatible(Family::Map, family));
        };

        let index = match entries.binary_search_by(|(existing, _)| canonical_cmp(existing, &key)) {
            Ok(index) => index,
            Err(index) => {
                entries.insert(index, (key, Self::Null));
                index
            }
        };

        Ok(&mut entries[index].1)
    }

    ///
    /// SEARCH
    ///

    /// Position of the first element (map: key) equal to `probe` under
    /// canonical equality.
    #[must_use]
    pub fn find(&self, probe: &Self) -> Option<usize> {
        match self {
            Self::Null => None,
            Self::List(items) => items.iter().position(|item| item == probe),
            Self::Map(entries) => entries
                .binary_search_by(|(key, _)| canonical_cmp(key, probe))
                .ok(),
            scalar => (scalar == probe).then_some(0),
        }
    }

    /// Number of elements (map: keys) equal to `probe`.
    #[must_use]
    pub fn count(&self, probe: &Self) -> usize {
        match self {
            Self::Null => 0,
            Self::List(items) => items.iter().filter(|item| *item == probe).count(),
            Self::Map(_) => usize::from(self.find(probe).is_some()),
            scalar => usize::from(scalar == probe),
        }
    }

    /// First position whose element is not less than `probe`, over the same
    /// element range [`Value::iter`] walks. The classic sorted-range search:
    /// meaningful when the range is partitioned with respect to `probe`.
    #[must_use]
    pub fn lower_bound(&self, probe: &Self) -> usize {
        match self {
            Self::Null => 0,
            Self::List(items) => {
                items.partition_point(|item| canonical_cmp(item, probe) == Ordering::Less)
            }
            Self::Map(entries) => {
                entries.partition_point(|(_, value)| canonical_cmp(value, probe) == Ordering::Less)
            }
            scalar => usize::from(canonical_cmp(scalar, probe) == Ordering::Less),
        }
    }

    /// First position whose key is not less than `probe`, over the same key
    /// range [`Value::keys`] walks (map keys; synthesized indices otherwise).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn lower_bound_key(&self, probe: &Self) -> usize {
        match self {
            Self::Null => 0,
            Self::Map(entries) => {
                entries.partition_point(|(key, _)| canonical_cmp(key, probe) == Ordering::Less)
            }
            Self::List(items) => {
                let len = items.len();
                (0..len)
                    .find(|&index| {
                        canonical_cmp(&Self::Uint64(index as u64), probe) != Ordering::Less
                    })
                    .unwrap_or(len)
            }
            _ => usize::from(canonical_cmp(&Self::Uint64(0), probe) == Ordering::Less),
        }
    }

    ///
    /// MUTATION
    ///

    /// Append an element to a list. A `Null` value vivifies into an empty
    /// list first; any other non-list family is an error.
    pub fn push(&mut self, value: Self) -> Result<(), ValueError> {
        if self.is_null() {
            *self = Self::List(Vec::new());
        }

        let family = self.family();
        let Self::List(items) = self else {
            return Err(incompatible(Family::List, family));
        };

        items.push(value);
        Ok(())
    }

    /// Map insert-or-update, preserving ascending key order. Returns the
    /// previous value when `key` was present. A `Null` value vivifies into
    /// an empty map first.
    pub fn insert(&mut self, key: Self, value: Self) -> Result<Option<Self>, ValueError> {
        if self.is_null() {
            *self = Self::Map(Vec::new());
        }

        let family = self.family();
        let Self::Map(entries) = self else {
            return Err(incompatible(Family::Map, family));
        };

        Ok(map_insert(entries, key, value))
    }

    /// Remove the first element (map: entry) whose element (map: key) equals
    /// `probe`; returns the removed element (map: mapped value).
    pub fn remove(&mut self, probe: &Self) -> Option<Self> {
        match self {
            Self::List(items) => {
                let index = items.iter().position(|item| item == probe)?;
                Some(items.remove(index))
            }
            Self::Map(entries) => {
                match entries.binary_search_by(|(key, _)| canonical_cmp(key, probe)) {
                    Ok(index) => Some(entries.remove(index).1),
                    Err(_) => None,
                }
            }
            _ => None,
        }
    }

    /// Remove the element (map: entry) at `index`; returns the removed
    /// element (map: mapped value). The element that followed the removal,
    /// if any, now lives at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Self> {
        match self {
            Self::List(items) if index < items.len() => Some(items.remove(index)),
            Self::Map(entries) if index < entries.len() => Some(entries.remove(index).1),
            _ => None,
        }
    }

    /// Remove the elements (map: entries) in `range`, clamped to the
    /// container length. Returns the number removed.
    pub fn remove_range(&mut self, range: Range<usize>) -> usize {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        match self {
            Self::List(items) => items.drain(start..end).count(),
            Self::Map(entries) => entries.drain(start..end).count(),
            _ => 0,
        }
    }

    /// Concatenate: list appends the other list's elements, map merges
    /// entries (insert-or-update). `Null` is the identity and takes the
    /// other operand; any other family mix is an error.
    pub fn concat(&mut self, other: Self) -> Result<(), ValueError> {
        if self.is_null() {
            *self = other;
            return Ok(());
        }

        match (&mut *self, other) {
            (Self::List(items), Self::List(other_items)) => {
                items.extend(other_items);
                Ok(())
            }
            (Self::Map(entries), Self::Map(other_entries)) => {
                for (key, value) in other_entries {
                    map_insert(entries, key, value);
                }
                Ok(())
            }
            (left, right) => Err(incompatible(left.family(), right.family())),
        }
    }

    /// Reset to the `Null` alternative, releasing the whole subtree.
    pub fn clear(&mut self) {
        *self = Self::Null;
    }

    ///
    /// CAPACITY
    ///

    /// `Null` is empty; a scalar is one value; containers count elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::List(items) => items.len(),
            Self::Map(entries) => entries.len(),
            _ => 1,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// ITERATION
    ///

    /// Elements in order: nothing for `Null`, the value itself for scalars,
    /// list elements, or map values in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut::new(self)
    }

    /// Keys over the same range [`Value::iter`] walks: map keys, or
    /// synthesized zero-based indices for list/scalar ranges.
    #[must_use]
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self)
    }

    /// Map entries in ascending key order; empty for every other family.
    #[must_use]
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    ///
    /// FINGERPRINT
    ///

    /// Stable content digest agreeing with canonical equality: equal values
    /// produce equal digests, across numeric widths and map entry orderings.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint::fingerprint(self)
    }
}

/// Insert-or-update into sorted map entries; returns the previous value.
pub(crate) fn map_insert(
    entries: &mut Vec<(Value, Value)>,
    key: Value,
    value: Value,
) -> Option<Value> {
    match entries.binary_search_by(|(existing, _)| canonical_cmp(existing, &key)) {
        Ok(index) => Some(std::mem::replace(&mut entries[index].1, value)),
        Err(index) => {
            entries.insert(index, (key, value));
            None
        }
    }
}

const fn incompatible(requested: Family, actual: Family) -> ValueError {
    ValueError::IncompatibleType {
        requested: requested.label(),
        actual: actual.label(),
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool   => Bool,
    i8     => Int8,
    i16    => Int16,
    i32    => Int32,
    i64    => Int64,
    u8     => Uint8,
    u16    => Uint16,
    u32    => Uint32,
    u64    => Uint64,
    f32    => Float32,
    f64    => Float64,
    &str   => Text,
    String => Text,
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

// NOTE:
// There is intentionally no `From<Vec<Value>>`: a raw container converts only
// through the `from_list`/`from_map` factories, so "a list value" can never be
// confused with "a value that happens to hold one list".
impl TryFrom<Vec<(Self, Self)>> for Value {
    type Error = MapValueError;

    fn try_from(entries: Vec<(Self, Self)>) -> Result<Self, Self::Error> {
        Self::from_map(entries)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        canonical_cmp(self, other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(self, other)
    }
}

impl Index<usize> for Value {
    type Output = Self;

    /// List element access. Panics when the value is not a list or the index
    /// is out of bounds; use [`Value::get`] for the checked form.
    fn index(&self, index: usize) -> &Self {
        let family = self.family();
        self.get(index)
            .unwrap_or_else(|| panic!("index {index} out of bounds for {family} value"))
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Self {
        let family = self.family();
        self.get_mut(index)
            .unwrap_or_else(|| panic!("index {index} out of bounds for {family} value"))
    }
}

impl Index<&str> for Value {
    type Output = Self;

    /// Map lookup by text key. Panics on a miss or a non-map value; use
    /// [`Value::lookup`] for the checked form.
    fn index(&self, key: &str) -> &Self {
        self.lookup(&Self::from(key))
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

impl IndexMut<&str> for Value {
    /// Map insert-if-absent by text key, vivifying a `Null` value into an
    /// empty map. Panics on other non-map families; use [`Value::entry`] for
    /// the checked form.
    fn index_mut(&mut self, key: &str) -> &mut Self {
        self.entry(Self::from(key))
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

impl AddAssign for Value {
    /// Operator form of [`Value::concat`]. Panics when the operand families
    /// cannot concatenate.
    fn add_assign(&mut self, rhs: Self) {
        if let Err(err) = self.concat(rhs) {
            panic!("{err}")
        }
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Value {
    type Item = &'a mut Value;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> IterMut<'a> {
        self.iter_mut()
    }
}
