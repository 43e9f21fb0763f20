use crate::codec::{CodecError, ScalarToken, TokenSink, TokenSource, TokenSymbol};
use std::collections::VecDeque;

///
/// TokenBuffer
///
/// In-memory token queue implementing both sides of the codec interface:
/// encode into it, then decode back out. This is the reference collaborator
/// for round-trip tests; real wire formats implement the same traits over
/// their tokenizer/writer instead.
///

#[derive(Debug, Default)]
pub struct TokenBuffer {
    tokens: VecDeque<Token>,
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Scalar(ScalarToken),
    BeginList,
    EndList,
    BeginMap,
    EndMap,
}

impl Token {
    const fn symbol(&self) -> TokenSymbol {
        match self {
            Self::Scalar(scalar) => scalar.symbol(),
            Self::BeginList => TokenSymbol::BeginList,
            Self::EndList => TokenSymbol::EndList,
            Self::BeginMap => TokenSymbol::BeginMap,
            Self::EndMap => TokenSymbol::EndMap,
        }
    }
}

impl TokenBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    // Result-shaped to match the sink contract; buffering itself cannot fail.
    #[allow(clippy::unnecessary_wraps)]
    fn push(&mut self, token: Token) -> Result<(), CodecError> {
        self.tokens.push_back(token);
        Ok(())
    }

    fn underflow() -> CodecError {
        CodecError::Malformed {
            reason: "unexpected end of input".to_string(),
        }
    }
}

impl TokenSink for TokenBuffer {
    fn begin_list(&mut self) -> Result<(), CodecError> {
        self.push(Token::BeginList)
    }

    fn end_list(&mut self) -> Result<(), CodecError> {
        self.push(Token::EndList)
    }

    fn begin_map(&mut self) -> Result<(), CodecError> {
        self.push(Token::BeginMap)
    }

    fn end_map(&mut self) -> Result<(), CodecError> {
        self.push(Token::EndMap)
    }

    fn scalar(&mut self, token: ScalarToken) -> Result<(), CodecError> {
        self.push(Token::Scalar(token))
    }
}

impl TokenSource for TokenBuffer {
    fn peek(&self) -> Result<TokenSymbol, CodecError> {
        self.tokens
            .front()
            .map(Token::symbol)
            .ok_or_else(Self::underflow)
    }

    fn read_scalar(&mut self) -> Result<ScalarToken, CodecError> {
        match self.tokens.pop_front() {
            Some(Token::Scalar(scalar)) => Ok(scalar),
            Some(token) => {
                let reason = format!("expected a scalar token, found {}", token.symbol());
                self.tokens.push_front(token);
                Err(CodecError::Malformed { reason })
            }
            None => Err(Self::underflow()),
        }
    }

    fn expect(&mut self, symbol: TokenSymbol) -> Result<(), CodecError> {
        let found = self.peek()?;
        if found == symbol {
            self.tokens.pop_front();
            Ok(())
        } else {
            Err(CodecError::UnexpectedToken {
                expected: symbol,
                found,
            })
        }
    }
}
