//! Declarative command-line option parsing.
//!
//! Declare options with a name, a type tag, an optional description, an
//! optional default and a required flag. The parser assigns each option a
//! single-letter switch and a `--long-name` switch, tokenizes arguments with
//! clap, coerces the raw strings through the option's type and reports
//! unset required options by name.
//!
//! # Example
//!
//! ```
//! use easy_options::{OptionsParser, ParseOutcome, ParserConfig};
//! use easy_options_core::OptionSpec;
//!
//! let mut parser = OptionsParser::with_config(
//!     ParserConfig::default()
//!         .with_description("Import records")
//!         .with_program("import.sh"),
//! );
//! parser
//!     .add_option(OptionSpec::new("input", "string").with_required(true))?
//!     .add_option(OptionSpec::new("batch_size", "integer").with_default(100_i64))?;
//!
//! let mut out = Vec::new();
//! let outcome = parser.parse_with_writer(["--batch-size", "10"], &mut out)?;
//! assert!(matches!(outcome, ParseOutcome::MissingRequired(_)));
//! assert!(String::from_utf8(out).unwrap().starts_with(
//!     "input must be specified, use --help for options\nImport records\n"
//! ));
//! # Ok::<(), easy_options::OptionsError>(())
//! ```
//!
//! Parsers can also be described in YAML or JSON; see [`OptionsSetup`].

pub mod coerce;
mod config;
mod error;
mod help;
mod parser;
mod registry;
mod resolve;
mod setup;

pub use config::{DEFAULT_HELP_INDENT, DEFAULT_HELP_WIDTH, FALLBACK_PROGRAM, ParserConfig};
pub use error::{OptionsError, Result};
pub use help::{banner, render_help};
pub use parser::{OptionsParser, ParseOutcome};
pub use registry::{HELP_LONG, HELP_SHORT, OptionRegistry, RegisteredOption};
pub use resolve::{CoercionRule, TypeResolver};
pub use setup::{OptionDeclaration, OptionsSetup};
