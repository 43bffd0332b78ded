//! Declared options, in declaration order.

use easy_options_core::{Coercion, FlagAllocator, OptionSpec, ShortFlagTable};
use tracing::debug;

use crate::error::{OptionsError, Result};
use crate::resolve::TypeResolver;

/// Short switch and long name of the built-in help flag.
pub const HELP_SHORT: char = 'h';
pub const HELP_LONG: &str = "help";

/// A declared option with its short flag and resolved coercion.
#[derive(Debug, Clone)]
pub struct RegisteredOption {
    pub spec: OptionSpec,
    pub short: char,
    pub coercion: Coercion,
}

impl RegisteredOption {
    /// Switch column of the help line, e.g. `-o, --option-1 OPTION_1`.
    pub fn switches(&self) -> String {
        format!(
            "-{}, {} {}",
            self.short,
            self.spec.long_flag(),
            self.spec.placeholder()
        )
    }
}

/// Ordered option table plus the short flags handed out so far.
///
/// Options are keyed by accessor name: declaring `my-option` after
/// `my_option` replaces the earlier entry in place and keeps its short flag.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    options: Vec<RegisteredOption>,
    flags: FlagAllocator,
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionRegistry {
    /// Empty registry with `-h` reserved for help.
    pub fn new() -> Self {
        let mut flags = FlagAllocator::new();
        flags.reserve(HELP_SHORT, HELP_LONG);
        Self {
            options: Vec::new(),
            flags,
        }
    }

    /// Declares an option and returns its short flag.
    ///
    /// The type is resolved before a flag is allocated, so an unknown type
    /// leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// [`OptionsError::EmptyName`], [`OptionsError::InvalidName`],
    /// [`OptionsError::ReservedName`],
    /// [`OptionsError::UnknownType`], or [`OptionsError::Flags`] once every
    /// letter is taken.
    pub fn add(&mut self, spec: OptionSpec, resolver: &TypeResolver) -> Result<char> {
        if spec.name.is_empty() {
            return Err(OptionsError::EmptyName);
        }
        if !spec.name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(OptionsError::InvalidName(spec.name));
        }
        if spec.long_name() == HELP_LONG {
            return Err(OptionsError::ReservedName(spec.name));
        }

        let coercion = resolver.resolve(&spec.option_type)?;
        let accessor = spec.accessor();

        if let Some(existing) = self
            .options
            .iter_mut()
            .find(|option| option.spec.accessor() == accessor)
        {
            debug!(option = %spec.name, short = %existing.short, "Redeclared option");
            existing.spec = spec;
            existing.coercion = coercion;
            return Ok(existing.short);
        }

        let short = self.flags.allocate(&spec.name)?;
        debug!(
            option = %spec.name,
            short = %short,
            option_type = spec.option_type.label(),
            required = spec.required,
            "Registered option"
        );
        self.options.push(RegisteredOption {
            spec,
            short,
            coercion,
        });
        Ok(short)
    }

    /// Looks an option up by declared or accessor name.
    pub fn get(&self, name: &str) -> Option<&RegisteredOption> {
        let accessor = easy_options_core::accessor_name(name);
        self.options
            .iter()
            .find(|option| option.spec.accessor() == accessor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredOption> {
        self.options.iter()
    }

    /// Declarations in order.
    pub fn specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().map(|option| &option.spec)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Every allocated short flag, including the help switch.
    pub fn short_flags(&self) -> &ShortFlagTable {
        self.flags.table()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use easy_options_core::{FlagError, OptionValue};

    use super::*;

    fn spec(name: &str) -> OptionSpec {
        OptionSpec::new(name, "string")
    }

    #[test]
    fn test_short_flags_follow_declaration_order() {
        let resolver = TypeResolver::new();
        let mut registry = OptionRegistry::new();

        assert_eq!(registry.add(spec("option_1"), &resolver).unwrap(), 'o');
        assert_eq!(registry.add(spec("option_2"), &resolver).unwrap(), 'p');
        assert_eq!(registry.add(spec("option_3"), &resolver).unwrap(), 't');
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_help_letter_is_never_allocated() {
        let resolver = TypeResolver::new();
        let mut registry = OptionRegistry::new();

        assert_eq!(registry.add(spec("host"), &resolver).unwrap(), 'o');
        assert_eq!(registry.short_flags().owner('h'), Some(HELP_LONG));
    }

    #[test]
    fn test_redeclaration_replaces_in_place() {
        let resolver = TypeResolver::new();
        let mut registry = OptionRegistry::new();
        registry.add(spec("my_option"), &resolver).unwrap();
        registry.add(spec("other"), &resolver).unwrap();

        let short = registry
            .add(
                OptionSpec::new("my-option", "integer")
                    .with_default(3_i64)
                    .with_required(true),
                &resolver,
            )
            .unwrap();

        assert_eq!(short, 'm');
        assert_eq!(registry.len(), 2);
        let option = registry.get("my_option").unwrap();
        assert_eq!(option.spec.default, Some(OptionValue::Integer(3)));
        assert!(option.spec.required);
        assert_eq!(option.coercion.label(), "integer");
        assert_eq!(registry.iter().next().unwrap().spec.name, "my-option");
    }

    #[test]
    fn test_unknown_type_leaves_registry_untouched() {
        let resolver = TypeResolver::new();
        let mut registry = OptionRegistry::new();

        let err = registry
            .add(OptionSpec::new("my_option", "widget"), &resolver)
            .unwrap_err();
        assert!(matches!(err, OptionsError::UnknownType(_)));
        assert!(registry.is_empty());
        assert!(!registry.short_flags().contains('m'));
    }

    #[test]
    fn test_reserved_and_empty_names() {
        let resolver = TypeResolver::new();
        let mut registry = OptionRegistry::new();

        assert!(matches!(
            registry.add(spec("help"), &resolver),
            Err(OptionsError::ReservedName(_))
        ));
        assert!(matches!(
            registry.add(spec(""), &resolver),
            Err(OptionsError::EmptyName)
        ));
    }

    #[test]
    fn test_names_must_start_with_letter_or_digit() {
        let resolver = TypeResolver::new();
        let mut registry = OptionRegistry::new();

        for name in ["_private", "-verbose", "über"] {
            let err = registry.add(spec(name), &resolver).unwrap_err();
            assert!(matches!(&err, OptionsError::InvalidName(n) if n == name), "{name}");
        }
        assert!(registry.is_empty());
        assert!(registry.short_flags().owner('p').is_none());
        assert_eq!(registry.add(spec("2fa_code"), &resolver).unwrap(), 'f');
    }

    #[test]
    fn test_flags_are_distinct_until_exhausted() {
        let resolver = TypeResolver::new();
        let mut registry = OptionRegistry::new();
        let mut seen = HashSet::new();

        for idx in 0..25 {
            let short = registry.add(spec(&format!("opt_{idx}")), &resolver).unwrap();
            assert_ne!(short, HELP_SHORT);
            assert!(seen.insert(short));
        }

        let err = registry.add(spec("opt_25"), &resolver).unwrap_err();
        assert!(matches!(err, OptionsError::Flags(FlagError::Exhausted(_))));
    }
}
