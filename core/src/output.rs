//! Targets that receive parsed option values.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{OptionValue, accessor_name};

/// Anything that can receive parsed option values.
///
/// The parser calls [`set`](OptionSink::set) once per declared option to
/// apply its default (`None` when it has none), then again for every value
/// supplied on the command line. `field` is the option's accessor name.
///
/// # Examples
///
/// ```
/// use easy_options_core::{OptionSink, OptionValue};
///
/// #[derive(Default)]
/// struct Settings {
///     verbose: bool,
/// }
///
/// impl OptionSink for Settings {
///     fn set(&mut self, field: &str, value: Option<OptionValue>) {
///         if field == "verbose" {
///             self.verbose = value.and_then(|v| v.as_bool()).unwrap_or(false);
///         }
///     }
/// }
///
/// let mut settings = Settings::default();
/// settings.set("verbose", Some(OptionValue::Boolean(true)));
/// assert!(settings.verbose);
/// ```
pub trait OptionSink {
    fn set(&mut self, field: &str, value: Option<OptionValue>);
}

impl OptionSink for HashMap<String, Option<OptionValue>> {
    fn set(&mut self, field: &str, value: Option<OptionValue>) {
        self.insert(field.to_string(), value);
    }
}

impl OptionSink for BTreeMap<String, Option<OptionValue>> {
    fn set(&mut self, field: &str, value: Option<OptionValue>) {
        self.insert(field.to_string(), value);
    }
}

/// Output record with one field per declared option.
///
/// Fields keep declaration order. Lookups accept either the accessor
/// (`my_option`) or the declared name (`my-option`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedOptions {
    options: IndexMap<String, Option<OptionValue>>,
    remaining: Vec<String>,
}

impl ParsedOptions {
    /// Creates a record whose fields are all unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use easy_options_core::ParsedOptions;
    ///
    /// let parsed = ParsedOptions::with_fields(["option_1", "option_2"]);
    /// assert!(parsed.has_field("option_1"));
    /// assert!(!parsed.is_set("option_1"));
    /// assert_eq!(parsed.len(), 2);
    /// ```
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: fields.into_iter().map(|f| (f.into(), None)).collect(),
            remaining: Vec::new(),
        }
    }

    /// Value of a field, if it has one.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .get(accessor_name(name).as_str())
            .and_then(Option::as_ref)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.options.contains_key(accessor_name(name).as_str())
    }

    /// Fields and their values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&OptionValue>)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Arguments that were not option flags or their values.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn set_remaining(&mut self, remaining: Vec<String>) {
        self.remaining = remaining;
    }
}

impl OptionSink for ParsedOptions {
    fn set(&mut self, field: &str, value: Option<OptionValue>) {
        self.options.insert(field.to_string(), value);
    }
}
