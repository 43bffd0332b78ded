//! Option declarations loaded from YAML or JSON setup files.
//!
//! ```yaml
//! description: Import records
//! program: import.sh
//! options:
//!   - name: input
//!     type: read_file
//!     description: Source file
//!     required: true
//!   - name: batch_size
//!     type: integer
//!     default: 500
//!   - name: tags
//!     type: array
//!     default: [a, b]
//! ```
//!
//! Defaults are written as plain literals and run through the option's
//! coercion when the setup is applied, so `default: 2.45` on a
//! `big_decimal` option yields an exact decimal.
//!
//! Unquoted numbers are read as `i64` or `f64` first, so trailing zeros are
//! lost (`1.10` becomes `1.1`). Quote decimal defaults whose scale matters:
//! `default: "1.10"`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use easy_options_core::{DEFAULT_TYPE_TAG, OptionSpec, OptionType};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{OptionsError, Result};
use crate::parser::OptionsParser;

/// A parser definition: banner settings plus option declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsSetup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionDeclaration>,
}

/// One declared option as written in a setup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDeclaration {
    pub name: String,
    #[serde(rename = "type", default = "default_type_tag")]
    pub option_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw default, in the form it would be typed on the command line.
    /// Unquoted floats are normalised by their `f64` value.
    #[serde(
        default,
        deserialize_with = "deserialize_literal",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
}

fn default_type_tag() -> String {
    DEFAULT_TYPE_TAG.to_string()
}

/// Scalar or list literal accepted for `default`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Literal {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Literal>),
}

impl Literal {
    fn into_raw(self) -> String {
        match self {
            Self::Boolean(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value,
            Self::List(items) => items
                .into_iter()
                .map(Literal::into_raw)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

fn deserialize_literal<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Literal>::deserialize(deserializer)?.map(Literal::into_raw))
}

impl OptionsSetup {
    /// Loads a setup file. `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let setup: Self = if is_json {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };

        debug!(path = %path.display(), options = setup.options.len(), "Loaded setup");
        Ok(setup)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Declares every option on `parser`, in file order.
    ///
    /// A description in the file replaces the parser's. Defaults are coerced
    /// with the parser's resolver; a default that fails its coercion
    /// (including a path default that does not exist) is an
    /// [`OptionsError::InvalidDefault`].
    pub fn apply(&self, parser: &mut OptionsParser) -> Result<()> {
        if let Some(description) = &self.description {
            parser.set_description(description.clone());
        }

        for declaration in &self.options {
            let spec = declaration.to_spec(parser)?;
            parser.add_option(spec)?;
        }
        Ok(())
    }

    /// Builds a parser from this setup. Fields set in the file override the
    /// matching fields of `config`.
    pub fn build(&self, mut config: ParserConfig) -> Result<OptionsParser> {
        if let Some(program) = &self.program {
            config.program = Some(program.clone());
        }

        let mut parser = OptionsParser::with_config(config);
        self.apply(&mut parser)?;
        Ok(parser)
    }
}

impl OptionDeclaration {
    fn to_spec(&self, parser: &OptionsParser) -> Result<OptionSpec> {
        let option_type = OptionType::Tag(self.option_type.clone());
        let mut spec = OptionSpec::new(self.name.clone(), option_type.clone())
            .with_required(self.required);
        if let Some(description) = &self.description {
            spec = spec.with_description(description);
        }

        if let Some(raw) = &self.default {
            let coercion = parser.resolver().resolve(&option_type)?;
            let value = coercion
                .apply(raw)
                .map_err(|source| OptionsError::InvalidDefault {
                    option: self.name.clone(),
                    source,
                })?;
            spec = spec.with_default(value);
        }

        Ok(spec)
    }
}
