use crate::value::{MapValueError, Value};
use serde::{Deserialize, Deserializer};

///
/// ValueWire
/// Serde decode shape used to re-check `Value::Map` invariants during
/// deserialization.
///

#[derive(Deserialize)]
enum ValueWire {
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
    List(Vec<Self>),
    Map(Vec<(Self, Self)>),
}

impl ValueWire {
    // Decode recursively while re-establishing the map ordering invariant.
    fn into_value(self) -> Result<Value, MapValueError> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Bool(v) => Ok(Value::Bool(v)),
            Self::Int8(v) => Ok(Value::Int8(v)),
            Self::Int16(v) => Ok(Value::Int16(v)),
            Self::Int32(v) => Ok(Value::Int32(v)),
            Self::Int64(v) => Ok(Value::Int64(v)),
            Self::Uint8(v) => Ok(Value::Uint8(v)),
            Self::Uint16(v) => Ok(Value::Uint16(v)),
            Self::Uint32(v) => Ok(Value::Uint32(v)),
            Self::Uint64(v) => Ok(Value::Uint64(v)),
            Self::Float32(v) => Ok(Value::Float32(v)),
            Self::Float64(v) => Ok(Value::Float64(v)),
            Self::Text(v) => Ok(Value::Text(v)),
            Self::List(items) => {
                let items = items
                    .into_iter()
                    .map(Self::into_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(items))
            }
            Self::Map(entries) => {
                let entries = entries
                    .into_iter()
                    .map(|(key, value)| Ok((key.into_value()?, value.into_value()?)))
                    .collect::<Result<Vec<_>, MapValueError>>()?;
                Value::from_map(entries)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = ValueWire::deserialize(deserializer)?;
        wire.into_value().map_err(serde::de::Error::custom)
    }
}
