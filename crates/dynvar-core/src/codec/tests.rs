use crate::{
    codec::{
        CodecError, MAX_DECODE_DEPTH, ScalarToken, TokenBuffer, TokenSink, TokenSource,
        TokenSymbol, decode, encode,
    },
    error::ErrorKind,
    value::{Value, ValueTag},
};

// ---- helpers -----------------------------------------------------------

fn round_trip(value: &Value) -> Value {
    let mut buffer = TokenBuffer::new();
    encode(value, &mut buffer).expect("encode");
    let decoded = decode(&mut buffer).expect("decode");
    assert!(buffer.is_empty(), "decode must consume every token");
    decoded
}

/// Sink that records every callback in document order.
#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
}

impl TokenSink for RecordingSink {
    fn begin_list(&mut self) -> Result<(), CodecError> {
        self.events.push("begin-list".to_string());
        Ok(())
    }

    fn end_list(&mut self) -> Result<(), CodecError> {
        self.events.push("end-list".to_string());
        Ok(())
    }

    fn begin_map(&mut self) -> Result<(), CodecError> {
        self.events.push("begin-map".to_string());
        Ok(())
    }

    fn end_map(&mut self) -> Result<(), CodecError> {
        self.events.push("end-map".to_string());
        Ok(())
    }

    fn scalar(&mut self, token: ScalarToken) -> Result<(), CodecError> {
        let event = match token {
            ScalarToken::Null => "null".to_string(),
            ScalarToken::Bool(b) => format!("bool:{b}"),
            ScalarToken::Integer(i) => format!("int:{i}"),
            ScalarToken::Real(r) => format!("real:{r}"),
            ScalarToken::Text(s) => format!("text:{s}"),
        };
        self.events.push(event);
        Ok(())
    }
}

/// Sink whose scalar callback always fails.
struct RejectingSink;

impl TokenSink for RejectingSink {
    fn begin_list(&mut self) -> Result<(), CodecError> {
        Ok(())
    }

    fn end_list(&mut self) -> Result<(), CodecError> {
        Ok(())
    }

    fn begin_map(&mut self) -> Result<(), CodecError> {
        Ok(())
    }

    fn end_map(&mut self) -> Result<(), CodecError> {
        Ok(())
    }

    fn scalar(&mut self, _token: ScalarToken) -> Result<(), CodecError> {
        Err(CodecError::Incompatible { label: "scalar" })
    }
}

// ---- round trips -------------------------------------------------------

#[test]
fn scalars_round_trip_under_value_equality() {
    for value in [
        Value::Null,
        Value::Bool(true),
        Value::Int64(-7),
        Value::Uint64(u64::MAX),
        Value::Float64(2.5),
        Value::Text("alpha".to_string()),
    ] {
        assert_eq!(round_trip(&value), value, "value: {value:?}");
    }
}

#[test]
fn single_entry_map_round_trips() {
    let map = Value::from_map(vec![(Value::from("k"), Value::from(1))]).expect("map");
    let decoded = round_trip(&map);

    let entries = decoded.as_map().expect("decoded map");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, Value::from("k"));
    assert_eq!(entries[0].1, Value::from(1));
}

#[test]
fn nested_containers_round_trip() {
    let tree = Value::from_map(vec![
        (
            Value::from("items"),
            Value::from_list(vec![Value::from(1), Value::Null, Value::from("x")]),
        ),
        (
            Value::from("inner"),
            Value::from_map(vec![(Value::from("k"), Value::from(true))]).expect("inner map"),
        ),
    ])
    .expect("outer map");

    assert_eq!(round_trip(&tree), tree);
}

#[test]
fn empty_containers_round_trip() {
    assert_eq!(round_trip(&Value::List(vec![])), Value::List(vec![]));
    assert_eq!(round_trip(&Value::Map(vec![])), Value::Map(vec![]));
}

// ---- compaction --------------------------------------------------------

#[test]
fn integers_decode_to_the_narrowest_exact_alternative() {
    let cases: &[(i128, ValueTag)] = &[
        (0, ValueTag::Int8),
        (127, ValueTag::Int8),
        (-128, ValueTag::Int8),
        (128, ValueTag::Uint8),
        (255, ValueTag::Uint8),
        (256, ValueTag::Int16),
        (-129, ValueTag::Int16),
        (40_000, ValueTag::Uint16),
        (70_000, ValueTag::Int32),
        (i128::from(u32::MAX), ValueTag::Uint32),
        (i128::from(i64::MAX), ValueTag::Int64),
        (i128::from(i64::MIN), ValueTag::Int64),
        (i128::from(u64::MAX), ValueTag::Uint64),
    ];

    for &(input, expected) in cases {
        let mut buffer = TokenBuffer::new();
        buffer
            .scalar(ScalarToken::Integer(input))
            .expect("buffer scalar");
        let decoded = decode(&mut buffer).expect("decode integer");

        assert_eq!(decoded.tag(), expected, "input: {input}");
        assert!(decoded.is_integer());
    }
}

#[test]
fn reals_decode_to_the_narrowest_exact_alternative() {
    let narrow: &[f64] = &[0.0, 1.5, 3.0, -2.25];
    for &input in narrow {
        let mut buffer = TokenBuffer::new();
        buffer
            .scalar(ScalarToken::Real(input))
            .expect("buffer scalar");
        let decoded = decode(&mut buffer).expect("decode real");
        assert_eq!(decoded.tag(), ValueTag::Float32, "input: {input}");
    }

    let wide: &[f64] = &[0.1, 1.0e300, f64::from(f32::MAX) * 2.0];
    for &input in wide {
        let mut buffer = TokenBuffer::new();
        buffer
            .scalar(ScalarToken::Real(input))
            .expect("buffer scalar");
        let decoded = decode(&mut buffer).expect("decode real");
        assert_eq!(decoded.tag(), ValueTag::Float64, "input: {input}");
    }
}

#[test]
fn real_tokens_stay_in_the_real_family() {
    // 3.0 decodes as a float even though an integer could hold it
    let mut buffer = TokenBuffer::new();
    buffer.scalar(ScalarToken::Real(3.0)).expect("buffer scalar");
    let decoded = decode(&mut buffer).expect("decode real");

    assert!(decoded.is_real());
    assert_eq!(decoded, Value::Int32(3)); // value equality still holds
}

#[test]
fn width_may_change_but_value_equality_holds() {
    let original = Value::Int64(2);
    let decoded = round_trip(&original);

    assert_eq!(decoded, original);
    assert_ne!(decoded.tag(), original.tag());
    assert_eq!(decoded.tag(), ValueTag::Int8);
}

#[test]
fn out_of_range_integer_tokens_are_malformed() {
    let mut buffer = TokenBuffer::new();
    buffer
        .scalar(ScalarToken::Integer(i128::from(u64::MAX) + 1))
        .expect("buffer scalar");

    let err = decode(&mut buffer).expect_err("oversized integer");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

// ---- emission order ----------------------------------------------------

#[test]
fn map_entries_are_emitted_key_then_value_in_ascending_key_order() {
    let map = Value::from_map(vec![
        (Value::from("b"), Value::from(2)),
        (Value::from("a"), Value::from(1)),
    ])
    .expect("map");

    let mut sink = RecordingSink::default();
    encode(&map, &mut sink).expect("encode");

    assert_eq!(
        sink.events,
        vec!["begin-map", "text:a", "int:1", "text:b", "int:2", "end-map"]
    );
}

#[test]
fn list_elements_are_emitted_in_order() {
    let list = Value::from_list(vec![Value::from(true), Value::from(2), Value::Null]);

    let mut sink = RecordingSink::default();
    encode(&list, &mut sink).expect("encode");

    assert_eq!(
        sink.events,
        vec!["begin-list", "bool:true", "int:2", "null", "end-list"]
    );
}

#[test]
fn sink_failures_abort_the_encode() {
    let mut sink = RejectingSink;
    let err = encode(&Value::from(1), &mut sink).expect_err("sink rejects scalars");
    assert_eq!(err.kind(), ErrorKind::IncompatibleType);
}

// ---- malformed input ---------------------------------------------------

#[test]
fn end_token_in_value_position_is_malformed() {
    let mut buffer = TokenBuffer::new();
    buffer.end_list().expect("buffer token");

    let err = decode(&mut buffer).expect_err("end token in value position");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn truncated_input_is_malformed() {
    let mut buffer = TokenBuffer::new();
    buffer.begin_list().expect("buffer token");
    buffer.scalar(ScalarToken::Bool(true)).expect("buffer token");
    // missing end-list

    let err = decode(&mut buffer).expect_err("truncated list");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn empty_input_is_malformed() {
    let mut buffer = TokenBuffer::new();
    let err = decode(&mut buffer).expect_err("no tokens");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn unbalanced_map_pair_is_malformed() {
    let mut buffer = TokenBuffer::new();
    buffer.begin_map().expect("buffer token");
    buffer
        .scalar(ScalarToken::Text("key".to_string()))
        .expect("buffer token");
    buffer.end_map().expect("buffer token");

    // the end-map token lands in value position after the dangling key
    let err = decode(&mut buffer).expect_err("dangling key");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn duplicate_keys_in_input_merge_insert_or_update() {
    let mut buffer = TokenBuffer::new();
    buffer.begin_map().expect("buffer token");
    buffer
        .scalar(ScalarToken::Text("k".to_string()))
        .expect("buffer token");
    buffer.scalar(ScalarToken::Integer(1)).expect("buffer token");
    buffer
        .scalar(ScalarToken::Text("k".to_string()))
        .expect("buffer token");
    buffer.scalar(ScalarToken::Integer(2)).expect("buffer token");
    buffer.end_map().expect("buffer token");

    let decoded = decode(&mut buffer).expect("decode map");
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.lookup(&Value::from("k")), Ok(&Value::from(2)));
}

// ---- depth bound -------------------------------------------------------

#[test]
fn over_deep_input_is_rejected_not_overflowed() {
    let mut buffer = TokenBuffer::new();
    for _ in 0..=MAX_DECODE_DEPTH {
        buffer.begin_list().expect("buffer token");
    }
    buffer.scalar(ScalarToken::Null).expect("buffer token");
    for _ in 0..=MAX_DECODE_DEPTH {
        buffer.end_list().expect("buffer token");
    }

    let err = decode(&mut buffer).expect_err("over-deep input");
    assert_eq!(
        err,
        CodecError::DepthExceeded {
            limit: MAX_DECODE_DEPTH
        }
    );
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn input_at_the_depth_limit_decodes() {
    let depth = MAX_DECODE_DEPTH - 1;
    let mut buffer = TokenBuffer::new();
    for _ in 0..depth {
        buffer.begin_list().expect("buffer token");
    }
    for _ in 0..depth {
        buffer.end_list().expect("buffer token");
    }

    let decoded = decode(&mut buffer).expect("decode at limit");
    assert!(decoded.is_list());
}

// ---- source misuse -----------------------------------------------------

#[test]
fn expect_reports_the_found_symbol() {
    let mut buffer = TokenBuffer::new();
    buffer.scalar(ScalarToken::Bool(true)).expect("buffer token");

    let err = buffer
        .expect(TokenSymbol::BeginList)
        .expect_err("mismatched expect");
    assert_eq!(
        err,
        CodecError::UnexpectedToken {
            expected: TokenSymbol::BeginList,
            found: TokenSymbol::Bool,
        }
    );
}

#[test]
fn only_end_delimiters_do_not_introduce_values() {
    for symbol in [
        TokenSymbol::Null,
        TokenSymbol::Bool,
        TokenSymbol::Integer,
        TokenSymbol::Real,
        TokenSymbol::Text,
        TokenSymbol::BeginList,
        TokenSymbol::BeginMap,
    ] {
        assert!(symbol.introduces_value(), "symbol: {symbol}");
    }
    assert!(!TokenSymbol::EndList.introduces_value());
    assert!(!TokenSymbol::EndMap.introduces_value());
}

#[test]
fn at_is_a_non_consuming_peek() {
    let mut buffer = TokenBuffer::new();
    buffer.begin_list().expect("buffer token");
    buffer.end_list().expect("buffer token");

    assert!(buffer.at(TokenSymbol::BeginList));
    assert!(!buffer.at(TokenSymbol::EndList));
    assert_eq!(buffer.len(), 2);
}
