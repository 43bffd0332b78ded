//! Core types for declarative command-line options.
//!
//! This crate defines the data model shared by the parser and its callers:
//!
//! - [`OptionSpec`]: a declared option (name, type, description, default,
//!   required flag) and the names derived from it.
//! - [`OptionType`] and [`Coercion`]: how raw argument strings become typed
//!   [`OptionValue`]s.
//! - [`FlagAllocator`]: deterministic single-letter switch assignment.
//! - [`find_missing`] and [`MissingOptions`]: required-option checks and
//!   their `a, b and c must be specified` message.
//! - [`OptionSink`] and [`ParsedOptions`]: where parsed values land.
//!
//! It has no knowledge of argv tokenizing or the filesystem; see the
//! `easy-options` crate for the parser itself.
//!
//! # Example
//!
//! ```
//! use easy_options_core::*;
//!
//! let spec = OptionSpec::new("batch_size", "integer")
//!     .with_description("Records per batch")
//!     .with_default(100_i64);
//! assert_eq!(spec.long_flag(), "--batch-size");
//! assert_eq!(spec.help_description(), "Records per batch (default: 100)");
//!
//! let mut flags = FlagAllocator::new();
//! assert_eq!(flags.allocate(&spec.name).unwrap(), 'b');
//! ```

mod error;
mod flags;
mod output;
mod types;
mod validate;

pub use error::ValueError;
pub use flags::{FlagAllocator, FlagError, ShortFlagTable};
pub use output::{OptionSink, ParsedOptions};
pub use types::*;
pub use validate::{MissingOptions, find_missing, to_sentence};
