//! Error types for matrix lookups.

use std::fmt;

/// Errors from reading a [`KaseMatrix`](crate::KaseMatrix).
///
/// A missing bucket is a configuration error on the caller's side: the
/// matrix reports it instead of silently producing zero combinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// No bucket is registered under the requested key.
    MissingKey {
        /// Name of the requested key.
        name: &'static str,
        /// Value type the key was declared with.
        value_type: &'static str,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { name, value_type } => {
                write!(f, "matrix has no bucket for key '{name}' ({value_type})")
            }
        }
    }
}

impl std::error::Error for MatrixError {}
