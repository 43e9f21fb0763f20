use crate::value::Value;
use thiserror::Error as ThisError;

///
/// ErrorKind
///
/// Stable failure classification shared by every reported error surface.
///
/// IMPORTANT:
/// Kinds are part of stable behavior; callers dispatch on them and they must
/// remain fixed across releases.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The requested conversion/operation is not defined for the families
    /// involved.
    IncompatibleType,
    /// Read-only map lookup missed.
    KeyNotFound,
    /// A token source produced something other than a well-formed value.
    MalformedInput,
}

///
/// ValueError
///
/// Accessor and mutation failures on a [`Value`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueError {
    #[error("incompatible type: requested {requested}, actual {actual}")]
    IncompatibleType {
        requested: &'static str,
        actual: &'static str,
    },

    #[error("key not found: {key:?}")]
    KeyNotFound { key: Value },
}

impl ValueError {
    /// Stable kind classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IncompatibleType { .. } => ErrorKind::IncompatibleType,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
        }
    }
}
