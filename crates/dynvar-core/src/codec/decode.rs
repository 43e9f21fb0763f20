use crate::{
    codec::{CodecError, MAX_DECODE_DEPTH, ScalarToken, TokenSource, TokenSymbol},
    value::{Value, map_insert},
};

/// Rebuild a value tree from `source`, driven by the next token's symbol.
///
/// Numeric tokens compact to the narrowest alternative that exactly
/// represents the decoded magnitude, so round trips preserve value equality
/// though not necessarily the exact alternative. Map entries load
/// insert-or-update, keeping the key-order invariant.
pub fn decode<S>(source: &mut S) -> Result<Value, CodecError>
where
    S: TokenSource + ?Sized,
{
    decode_value(source, 0)
}

fn decode_value<S>(source: &mut S, depth: usize) -> Result<Value, CodecError>
where
    S: TokenSource + ?Sized,
{
    if depth >= MAX_DECODE_DEPTH {
        return Err(CodecError::DepthExceeded {
            limit: MAX_DECODE_DEPTH,
        });
    }

    match source.peek()? {
        TokenSymbol::Null
        | TokenSymbol::Bool
        | TokenSymbol::Integer
        | TokenSymbol::Real
        | TokenSymbol::Text => decode_scalar(source),
        TokenSymbol::BeginList => {
            source.expect(TokenSymbol::BeginList)?;
            let mut items = Vec::new();
            while !source.at(TokenSymbol::EndList) {
                items.push(decode_value(source, depth + 1)?);
            }
            source.expect(TokenSymbol::EndList)?;

            Ok(Value::List(items))
        }
        TokenSymbol::BeginMap => {
            source.expect(TokenSymbol::BeginMap)?;
            let mut entries = Vec::new();
            while !source.at(TokenSymbol::EndMap) {
                let key = decode_value(source, depth + 1)?;
                let value = decode_value(source, depth + 1)?;
                map_insert(&mut entries, key, value);
            }
            source.expect(TokenSymbol::EndMap)?;

            Ok(Value::Map(entries))
        }
        found @ (TokenSymbol::EndList | TokenSymbol::EndMap) => Err(CodecError::Malformed {
            reason: format!("token {found} in value position"),
        }),
    }
}

fn decode_scalar<S>(source: &mut S) -> Result<Value, CodecError>
where
    S: TokenSource + ?Sized,
{
    let value = match source.read_scalar()? {
        ScalarToken::Null => Value::Null,
        ScalarToken::Bool(v) => Value::Bool(v),
        ScalarToken::Integer(v) => compact_integer(v)?,
        ScalarToken::Real(v) => compact_real(v),
        ScalarToken::Text(v) => Value::Text(v),
    };

    Ok(value)
}

/// Narrowest integer alternative that exactly represents `value`, trying
/// signed then unsigned at each width.
fn compact_integer(value: i128) -> Result<Value, CodecError> {
    if let Ok(v) = i8::try_from(value) {
        return Ok(Value::Int8(v));
    }
    if let Ok(v) = u8::try_from(value) {
        return Ok(Value::Uint8(v));
    }
    if let Ok(v) = i16::try_from(value) {
        return Ok(Value::Int16(v));
    }
    if let Ok(v) = u16::try_from(value) {
        return Ok(Value::Uint16(v));
    }
    if let Ok(v) = i32::try_from(value) {
        return Ok(Value::Int32(v));
    }
    if let Ok(v) = u32::try_from(value) {
        return Ok(Value::Uint32(v));
    }
    if let Ok(v) = i64::try_from(value) {
        return Ok(Value::Int64(v));
    }
    if let Ok(v) = u64::try_from(value) {
        return Ok(Value::Uint64(v));
    }

    Err(CodecError::Malformed {
        reason: format!("integer {value} outside the representable range"),
    })
}

/// Narrowest real alternative that exactly represents `value`.
#[allow(clippy::cast_possible_truncation)]
fn compact_real(value: f64) -> Value {
    let narrow = value as f32;
    if f64::from(narrow) == value {
        Value::Float32(narrow)
    } else {
        Value::Float64(value)
    }
}
