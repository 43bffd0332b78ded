//! Option declarations and typed option values.
//!
//! An [`OptionSpec`] is one declared command-line option: its name, how raw
//! arguments are converted ([`OptionType`]), help text, default and whether
//! it must be supplied. Parsed arguments become [`OptionValue`]s.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValueError;

/// Tag used when an option is declared without a type.
pub const DEFAULT_TYPE_TAG: &str = "string";

/// A typed option value.
///
/// Values serialize without a type wrapper (`"text"`, `42`, `["a", "b"]`),
/// decimals as exact decimal strings and timestamps as RFC 3339.
///
/// # Examples
///
/// ```
/// use easy_options_core::OptionValue;
///
/// let list = OptionValue::from(vec!["1", "2"]);
/// assert_eq!(list.to_string(), "[1, 2]");
/// assert_eq!(list.as_list().map(|v| v.len()), Some(2));
/// assert_eq!(OptionValue::from(true).as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    /// Identifier-like value (the `symbol` type).
    Symbol(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    /// Timestamp whose naive input was read in the local time zone.
    Time(DateTime<FixedOffset>),
    /// A checked filesystem path (`read_file`, `dir`, `dir_glob` entries).
    Path(PathBuf),
    List(Vec<OptionValue>),
}

impl OptionValue {
    /// Text of a `String` or `Symbol` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Float value; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Timestamp of a `DateTime` or `Time` value.
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) | Self::Time(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Symbol(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) | Self::Time(dt) => f.write_str(&dt.to_rfc3339()),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for OptionValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for OptionValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for OptionValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<PathBuf> for OptionValue {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

type CoercionFn = dyn Fn(&str) -> Result<OptionValue, ValueError> + Send + Sync;

/// A function turning one raw argument into an [`OptionValue`].
///
/// Cheap to clone; clones share the same function.
///
/// # Examples
///
/// ```
/// use easy_options_core::{Coercion, OptionValue, ValueError};
///
/// let upper = Coercion::new("upper", |raw: &str| Ok(OptionValue::from(raw.to_uppercase())));
/// assert_eq!(upper.apply("abc"), Ok(OptionValue::from("ABC")));
/// assert_eq!(upper.label(), "upper");
/// ```
#[derive(Clone)]
pub struct Coercion {
    label: Arc<str>,
    func: Arc<CoercionFn>,
}

impl Coercion {
    pub fn new<F>(label: &str, func: F) -> Self
    where
        F: Fn(&str) -> Result<OptionValue, ValueError> + Send + Sync + 'static,
    {
        Self {
            label: Arc::from(label),
            func: Arc::new(func),
        }
    }

    /// Converts a raw argument.
    pub fn apply(&self, raw: &str) -> Result<OptionValue, ValueError> {
        (self.func)(raw)
    }

    /// Name of the type this coercion produces, used in logs and debug output.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Coercion").field(&self.label).finish()
    }
}

/// How the raw arguments of an option are converted.
///
/// Either a symbolic tag resolved by the parser's type resolver (`"integer"`,
/// `"array:date"`), or a coercion the caller already built, which is used
/// as-is.
#[derive(Debug, Clone)]
pub enum OptionType {
    Tag(String),
    Coercion(Coercion),
}

impl OptionType {
    /// Tag text, or the coercion label for pre-resolved types.
    pub fn label(&self) -> &str {
        match self {
            Self::Tag(tag) => tag,
            Self::Coercion(coercion) => coercion.label(),
        }
    }
}

impl Default for OptionType {
    fn default() -> Self {
        Self::Tag(DEFAULT_TYPE_TAG.to_string())
    }
}

impl From<&str> for OptionType {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_string())
    }
}

impl From<String> for OptionType {
    fn from(tag: String) -> Self {
        Self::Tag(tag)
    }
}

impl From<Coercion> for OptionType {
    fn from(coercion: Coercion) -> Self {
        Self::Coercion(coercion)
    }
}

/// One declared command-line option.
///
/// The long flag, the field name in the parsed output and the help
/// placeholder are all derived from `name`.
///
/// # Examples
///
/// ```
/// use easy_options_core::OptionSpec;
///
/// let spec = OptionSpec::new("output_dir", "dir")
///     .with_description("Where to write")
///     .with_required(true);
/// assert_eq!(spec.long_flag(), "--output-dir");
/// assert_eq!(spec.accessor(), "output_dir");
/// assert_eq!(spec.placeholder(), "OUTPUT_DIR");
/// assert_eq!(spec.help_description(), "Where to write (required)");
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Declared name, e.g. `option_1`
    pub name: String,
    /// Conversion applied to every supplied value
    pub option_type: OptionType,
    /// Help text
    pub description: Option<String>,
    /// Value used when the option is never supplied
    pub default: Option<OptionValue>,
    /// Whether parsing reports the option as missing when unset
    pub required: bool,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, option_type: impl Into<OptionType>) -> Self {
        Self {
            name: name.into(),
            option_type: option_type.into(),
            description: None,
            default: None,
            required: false,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Sets the value applied when the option is not supplied.
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Field name in the parsed output.
    pub fn accessor(&self) -> String {
        accessor_name(&self.name)
    }

    /// Long flag without the leading dashes.
    pub fn long_name(&self) -> String {
        long_name(&self.name)
    }

    /// Long flag including the leading dashes.
    pub fn long_flag(&self) -> String {
        format!("--{}", self.long_name())
    }

    /// Value placeholder shown in help.
    pub fn placeholder(&self) -> String {
        self.accessor().to_uppercase()
    }

    /// Description with the `(default: ...)` or `(required)` suffix.
    ///
    /// A default takes precedence over the required marker.
    pub fn help_description(&self) -> String {
        let base = self.description.as_deref().unwrap_or("").trim_end();
        let suffix = match (&self.default, self.required) {
            (Some(default), _) => Some(format!("(default: {default})")),
            (None, true) => Some("(required)".to_string()),
            (None, false) => None,
        };

        match suffix {
            Some(suffix) if base.is_empty() => suffix,
            Some(suffix) => format!("{base} {suffix}"),
            None => base.to_string(),
        }
    }
}

/// Replaces every non-word character with `_`.
///
/// # Examples
///
/// ```
/// assert_eq!(easy_options_core::accessor_name("dry-run.v2"), "dry_run_v2");
/// ```
pub fn accessor_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Replaces every non-alphanumeric character with `-`.
///
/// # Examples
///
/// ```
/// assert_eq!(easy_options_core::long_name("option_1"), "option-1");
/// ```
pub fn long_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
