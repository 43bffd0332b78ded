//! Errors raised while turning a raw argument into a typed value.
//!
//! A [`Coercion`](crate::Coercion) fails with a [`ValueError`]. Some messages
//! are part of the observable contract of the parser and are worded exactly
//! the way users see them (`Path /tmp/x does not exist`).

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

/// A raw argument could not be converted or failed a filesystem check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The literal is not a valid value of the expected type.
    #[error("invalid {expected} value {value:?}: {reason}")]
    Invalid {
        expected: String,
        value: String,
        reason: String,
    },
    /// The literal is not one of the accepted boolean spellings.
    #[error("Invalid boolean value {0:?}")]
    InvalidBoolean(String),
    /// A `read_file` or `dir` path is missing.
    #[error("Path {} does not exist", .0.display())]
    PathNotFound(PathBuf),
    /// A `dir` path exists but is a regular file.
    #[error("Path {} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// A `dir_glob` pattern is malformed.
    #[error("invalid glob pattern {pattern:?}: {reason}")]
    InvalidGlob { pattern: String, reason: String },
}

impl ValueError {
    /// Shorthand for [`ValueError::Invalid`].
    ///
    /// # Examples
    ///
    /// ```
    /// use easy_options_core::ValueError;
    ///
    /// let err = ValueError::invalid("integer", "x1", "invalid digit found in string");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid integer value \"x1\": invalid digit found in string"
    /// );
    /// ```
    pub fn invalid(expected: &str, value: &str, reason: impl Display) -> Self {
        Self::Invalid {
            expected: expected.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is a filesystem check failure rather than a bad literal.
    pub fn is_path_check(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::NotADirectory(_))
    }
}
