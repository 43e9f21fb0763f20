use derive_more::Display;

///
/// TokenSymbol
///
/// Coarse classification of a wire token: the value-introducing scalars plus
/// the container delimiters.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TokenSymbol {
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
    #[display("begin-list")]
    BeginList,
    #[display("end-list")]
    EndList,
    #[display("begin-map")]
    BeginMap,
    #[display("end-map")]
    EndMap,
}

impl TokenSymbol {
    /// Returns true for symbols that introduce a value (scalars and the two
    /// begin delimiters).
    #[must_use]
    pub const fn introduces_value(self) -> bool {
        !matches!(self, Self::EndList | Self::EndMap)
    }
}

///
/// ScalarToken
///
/// Payload of a scalar wire token. Integer payloads travel as `i128` so the
/// full unsigned 64-bit magnitude survives transport; real payloads travel as
/// `f64`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ScalarToken {
    Null,
    Bool(bool),
    Integer(i128),
    Real(f64),
    Text(String),
}

impl ScalarToken {
    /// Symbol classification of this scalar.
    #[must_use]
    pub const fn symbol(&self) -> TokenSymbol {
        match self {
            Self::Null => TokenSymbol::Null,
            Self::Bool(_) => TokenSymbol::Bool,
            Self::Integer(_) => TokenSymbol::Integer,
            Self::Real(_) => TokenSymbol::Real,
            Self::Text(_) => TokenSymbol::Text,
        }
    }
}
