//! dynvar — a self-describing dynamic value with a canonical total order and
//! a token-tree codec.
//!
//! ## Crate layout
//! - `core::value`: the dynamic [`Value`], discriminants, ordering engine,
//!   iteration cursors, fingerprints, and the serde wire layer.
//! - `core::codec`: the recursive token-tree codec and its sink/source
//!   traits.
//! - `core::serialize`: CBOR persistence helpers.
//! - `core::error`: stable error kinds shared by every reported failure.
//!
//! The `prelude` module mirrors the vocabulary most call sites need.

pub use dynvar_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// flattened vocabulary
pub use dynvar_core::{
    codec::{
        CodecError, ScalarToken, TokenBuffer, TokenSink, TokenSource, TokenSymbol, decode, encode,
    },
    error::{ErrorKind, ValueError},
    serialize::{deserialize, serialize},
    value::{Family, FromValue, MapValueError, Value, ValueTag},
};

///
/// Prelude
///

pub mod prelude {
    pub use dynvar_core::prelude::*;
}
