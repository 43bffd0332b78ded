//! Required-option checks.
//!
//! After parsing, every required option that ended up without a value is
//! reported in declaration order, phrased as a sentence:
//!
//! ```
//! use easy_options_core::{OptionSpec, find_missing};
//!
//! let specs = [
//!     OptionSpec::new("option_1", "string").with_required(true),
//!     OptionSpec::new("option_2", "array").with_required(true),
//!     OptionSpec::new("option_3", "string").with_required(true),
//! ];
//! let missing = find_missing(&specs, |field| field == "option_2");
//! assert_eq!(missing.to_string(), "option_1 and option_3 must be specified");
//! ```

use std::fmt;

use crate::types::OptionSpec;

/// Required options that have no value, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingOptions {
    names: Vec<String>,
}

impl MissingOptions {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl fmt::Display for MissingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be specified", to_sentence(&self.names))
    }
}

/// Collects required options for which `is_set` returns `false`.
///
/// `is_set` receives the option's accessor name.
pub fn find_missing<'a, I, F>(specs: I, is_set: F) -> MissingOptions
where
    I: IntoIterator<Item = &'a OptionSpec>,
    F: Fn(&str) -> bool,
{
    let names = specs
        .into_iter()
        .filter(|spec| spec.required)
        .map(OptionSpec::accessor)
        .filter(|field| !is_set(field))
        .collect();

    MissingOptions { names }
}

/// Joins words as `a`, `a and b`, `a, b and c`.
///
/// # Examples
///
/// ```
/// use easy_options_core::to_sentence;
///
/// assert_eq!(to_sentence(&["a"]), "a");
/// assert_eq!(to_sentence(&["a", "b", "c"]), "a, b and c");
/// ```
pub fn to_sentence<S: AsRef<str>>(words: &[S]) -> String {
    match words {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|word| word.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");
            format!("{head} and {}", last.as_ref())
        }
    }
}
