//! Type-tag resolution.
//!
//! A [`TypeResolver`] is an ordered table of [`CoercionRule`]s. Resolving a
//! tag walks the table and the first rule that accepts the tag builds the
//! coercion, so built-ins and user rules share one dispatch path. Rules added
//! with [`TypeResolver::prepend`] shadow built-ins; rules added with
//! [`TypeResolver::append`] only see tags nothing else accepted.
//!
//! # Examples
//!
//! ```
//! use easy_options::TypeResolver;
//! use easy_options_core::{Coercion, OptionValue};
//!
//! let mut resolver = TypeResolver::new();
//! resolver.register_named(
//!     "upper",
//!     Coercion::new("upper", |raw: &str| Ok(OptionValue::from(raw.to_uppercase()))),
//! );
//!
//! let upper = resolver.resolve_tag("array:upper").unwrap();
//! assert_eq!(upper.apply("a,b").unwrap().to_string(), "[A, B]");
//! assert!(resolver.resolve_tag("nonsense").is_err());
//! ```

use std::fmt;

use easy_options_core::{Coercion, OptionType, OptionValue};
use tracing::debug;

use crate::coerce;
use crate::error::{OptionsError, Result};

type TagPredicate = dyn Fn(&str) -> bool + Send + Sync;
type RuleBuilder = dyn Fn(&str, &TypeResolver) -> Result<Coercion> + Send + Sync;

/// One entry of the resolution table: a tag predicate and how to build the
/// coercion for an accepted tag.
pub struct CoercionRule {
    name: String,
    accepts: Box<TagPredicate>,
    build: Box<RuleBuilder>,
}

impl CoercionRule {
    /// General rule. `build` receives the accepted tag and the resolver, so
    /// composite types can resolve their element types recursively.
    pub fn new<P, B>(name: &str, accepts: P, build: B) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
        B: Fn(&str, &TypeResolver) -> Result<Coercion> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            accepts: Box::new(accepts),
            build: Box::new(build),
        }
    }

    /// Rule accepting tags for which `accepts` holds, always yielding
    /// `coercion`.
    pub fn matching<P>(name: &str, accepts: P, coercion: Coercion) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(name, accepts, move |_, _| Ok(coercion.clone()))
    }

    /// Rule accepting exactly one tag.
    pub fn exact(tag: &str, coercion: Coercion) -> Self {
        let expected = tag.to_string();
        Self::matching(tag, move |candidate| candidate == expected, coercion)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self, tag: &str) -> bool {
        (self.accepts)(tag)
    }
}

impl fmt::Debug for CoercionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CoercionRule").field(&self.name).finish()
    }
}

/// Ordered, first-match-wins table of coercion rules.
#[derive(Debug)]
pub struct TypeResolver {
    rules: Vec<CoercionRule>,
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeResolver {
    /// Resolver with the built-in tags registered.
    ///
    /// Built-ins: `boolean`, `big_decimal`, `date`, `read_file` (alias
    /// `file`), `dir`, `time`, `array` / `array:<subtype>`, `dir_glob`,
    /// `datetime` (alias `date_time`), `integer`, `float`, `symbol`, `string`.
    pub fn new() -> Self {
        let mut resolver = Self::empty();
        resolver.rules = builtin_rules();
        resolver
    }

    /// Resolver with no rules at all.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule consulted after every existing rule.
    pub fn append(&mut self, rule: CoercionRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Adds a rule consulted before every existing rule.
    pub fn prepend(&mut self, rule: CoercionRule) -> &mut Self {
        self.rules.insert(0, rule);
        self
    }

    /// Makes `name` usable as a type tag (and as an array subtype).
    pub fn register_named(&mut self, name: &str, coercion: Coercion) -> &mut Self {
        self.append(CoercionRule::exact(name, coercion))
    }

    /// Whether any rule accepts `tag`.
    pub fn accepts(&self, tag: &str) -> bool {
        self.rules.iter().any(|rule| rule.accepts(tag))
    }

    /// Names of the rules, in lookup order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(CoercionRule::name)
    }

    /// Resolves an option type. Pre-resolved coercions are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownType`] when no rule accepts the tag.
    pub fn resolve(&self, option_type: &OptionType) -> Result<Coercion> {
        match option_type {
            OptionType::Coercion(coercion) => Ok(coercion.clone()),
            OptionType::Tag(tag) => self.resolve_tag(tag),
        }
    }

    pub fn resolve_tag(&self, tag: &str) -> Result<Coercion> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.accepts(tag))
            .ok_or_else(|| OptionsError::UnknownType(tag.to_string()))?;

        debug!(tag, rule = rule.name(), "Resolved option type");
        (rule.build)(tag, self)
    }
}

fn builtin_rules() -> Vec<CoercionRule> {
    vec![
        CoercionRule::exact("boolean", Coercion::new("boolean", coerce::boolean)),
        CoercionRule::exact("big_decimal", Coercion::new("big_decimal", coerce::big_decimal)),
        CoercionRule::exact("date", Coercion::new("date", coerce::date)),
        CoercionRule::matching(
            "read_file",
            |tag| tag == "read_file" || tag == "file",
            Coercion::new("read_file", coerce::read_file),
        ),
        CoercionRule::exact("dir", Coercion::new("dir", coerce::dir)),
        CoercionRule::exact("time", Coercion::new("time", coerce::time)),
        CoercionRule::new(
            "array",
            |tag| tag == "array" || tag.starts_with("array:"),
            array_rule,
        ),
        CoercionRule::exact("dir_glob", Coercion::new("dir_glob", coerce::dir_glob)),
        CoercionRule::matching(
            "datetime",
            |tag| tag == "datetime" || tag == "date_time",
            Coercion::new("datetime", coerce::datetime),
        ),
        CoercionRule::exact("integer", Coercion::new("integer", coerce::integer)),
        CoercionRule::exact("float", Coercion::new("float", coerce::float)),
        CoercionRule::exact("symbol", Coercion::new("symbol", coerce::symbol)),
        CoercionRule::exact("string", Coercion::new("string", coerce::string)),
    ]
}

/// `array` splits into strings; `array:<subtype>` coerces every element
/// through the subtype, failing on the first bad element.
fn array_rule(tag: &str, resolver: &TypeResolver) -> Result<Coercion> {
    let subtype = tag
        .split_once(':')
        .and_then(|(_, rest)| rest.rsplit(':').next())
        .filter(|subtype| !subtype.is_empty());

    let Some(subtype) = subtype else {
        return Ok(Coercion::new("array", |raw: &str| {
            Ok(OptionValue::List(
                coerce::split_list(raw)
                    .into_iter()
                    .map(|item| OptionValue::String(item.to_string()))
                    .collect(),
            ))
        }));
    };

    let element = resolver.resolve_tag(subtype)?;
    Ok(Coercion::new(tag, move |raw: &str| {
        coerce::split_list(raw)
            .into_iter()
            .map(|item| element.apply(item))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(OptionValue::List)
    }))
}
