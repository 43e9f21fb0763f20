//! Core runtime for dynvar: the self-describing dynamic [`value::Value`], its
//! canonical total ordering, the iteration cursors, and the token-tree codec.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod codec;
pub mod error;
pub mod serialize;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No serializers, buffers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        codec::{TokenSink, TokenSource, decode, encode},
        error::{ErrorKind, ValueError},
        value::{Family, Value, ValueTag},
    };
}
