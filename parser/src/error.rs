//! Error types for option registration and parsing.
//!
//! Every failure is fatal for the call that raised it: there is no partial
//! result. Missing required options are not an error; they are reported as
//! [`ParseOutcome::MissingRequired`](crate::ParseOutcome::MissingRequired).

use easy_options_core::{FlagError, ValueError};
use thiserror::Error;

/// Errors that can occur while declaring options or parsing arguments.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// No coercion rule accepts the type tag.
    #[error("unknown option type {0:?}")]
    UnknownType(String),

    /// A supplied argument failed its coercion or path check.
    #[error("{source}")]
    InvalidValue { option: String, source: ValueError },

    /// A default declared in a setup file failed its coercion.
    #[error("invalid default for option {option}: {source}")]
    InvalidDefault { option: String, source: ValueError },

    /// Short-flag allocation failed.
    #[error(transparent)]
    Flags(#[from] FlagError),

    /// Option declared with an empty name.
    #[error("option name cannot be empty")]
    EmptyName,

    /// Option name does not start with an ASCII letter or digit, so its long
    /// switch would begin with `-`.
    #[error("option name {0:?} must start with an ASCII letter or digit")]
    InvalidName(String),

    /// Option name collides with the built-in help switch.
    #[error("option name {0:?} is reserved")]
    ReservedName(String),

    /// Unknown flag, missing flag value or another tokenizer failure.
    #[error(transparent)]
    Arguments(#[from] clap::Error),

    /// Writing help or diagnostics, or reading a setup file, failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON setup parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML setup parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl OptionsError {
    /// Name of the option whose value was rejected, if any.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { option, .. } | Self::InvalidDefault { option, .. } => {
                Some(option)
            }
            _ => None,
        }
    }
}

/// Convenience alias for results with [`OptionsError`].
pub type Result<T> = std::result::Result<T, OptionsError>;
