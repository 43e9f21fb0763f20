use crate::{
    codec::{CodecError, ScalarToken, TokenSink},
    value::Value,
};

/// Recursively serialize a value tree into `sink`, token by token.
///
/// Scalars emit one scalar token carrying the widened native payload; a list
/// emits begin/end delimiters around its elements in order; a map emits
/// begin/end delimiters around key-then-value pairs in ascending key order.
///
/// Recursion depth equals the value's own nesting depth, which the owning
/// tree already bounds.
pub fn encode<S>(value: &Value, sink: &mut S) -> Result<(), CodecError>
where
    S: TokenSink + ?Sized,
{
    match value {
        Value::Null => sink.scalar(ScalarToken::Null),
        Value::Bool(v) => sink.scalar(ScalarToken::Bool(*v)),
        Value::Int8(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Int16(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Int32(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Int64(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Uint8(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Uint16(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Uint32(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Uint64(v) => sink.scalar(ScalarToken::Integer(i128::from(*v))),
        Value::Float32(v) => sink.scalar(ScalarToken::Real(f64::from(*v))),
        Value::Float64(v) => sink.scalar(ScalarToken::Real(*v)),
        Value::Text(s) => sink.scalar(ScalarToken::Text(s.clone())),
        Value::List(_) => {
            sink.begin_list()?;
            for item in value.iter() {
                encode(item, sink)?;
            }
            sink.end_list()
        }
        Value::Map(_) => {
            sink.begin_map()?;
            for (key, mapped) in value.entries() {
                encode(key, sink)?;
                encode(mapped, sink)?;
            }
            sink.end_map()
        }
    }
}
