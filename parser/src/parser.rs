//! The option parser.
//!
//! [`OptionsParser`] owns the declared options and drives clap as a plain
//! tokenizer: clap matches `-x VALUE`, `-xVALUE`, `--long VALUE` and
//! `--long=VALUE` and hands back raw strings, which are then coerced in
//! command-line order. A parse ends in one of three [`ParseOutcome`]s; only
//! tokenizer failures, bad values and I/O problems are errors.

use std::collections::HashSet;
use std::ffi::OsString;
use std::io::{self, Write};

use clap::{Arg, ArgAction, ArgMatches, Command};
use easy_options_core::{
    MissingOptions, OptionSink, OptionSpec, ParsedOptions, find_missing,
};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{OptionsError, Result};
use crate::help;
use crate::registry::{HELP_LONG, HELP_SHORT, OptionRegistry, RegisteredOption};
use crate::resolve::TypeResolver;

const HELP_ID: &str = "@help";
const REMAINING_ID: &str = "@remaining";

/// How a parse ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// Every supplied value coerced and every required option is set.
    Completed(T),
    /// `-h`/`--help` was given; help text has been written.
    HelpPrinted,
    /// Required options are unset; the diagnostic and help text have been
    /// written.
    MissingRequired(MissingOptions),
}

impl<T> ParseOutcome<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ParseOutcome<U> {
        match self {
            Self::Completed(value) => ParseOutcome::Completed(f(value)),
            Self::HelpPrinted => ParseOutcome::HelpPrinted,
            Self::MissingRequired(missing) => ParseOutcome::MissingRequired(missing),
        }
    }

    /// The parsed value, if the parse completed.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Process exit status a command-line entry point should use.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed(_) | Self::HelpPrinted => 0,
            Self::MissingRequired(_) => 1,
        }
    }
}

/// Declarative command-line option parser.
///
/// # Examples
///
/// ```
/// use easy_options::{OptionsParser, ParseOutcome};
/// use easy_options_core::{OptionSpec, OptionValue};
///
/// let mut parser = OptionsParser::new();
/// parser
///     .add_option(OptionSpec::new("my_option", "string").with_description("My option"))?
///     .add_option(OptionSpec::new("count", "integer").with_default(1_i64))?;
///
/// let mut help = Vec::new();
/// let outcome = parser.parse_with_writer(["-m", "value", "--count=3"], &mut help)?;
/// let options = outcome.completed().unwrap();
/// assert_eq!(options.get("my_option"), Some(&OptionValue::from("value")));
/// assert_eq!(options.get("count"), Some(&OptionValue::Integer(3)));
/// # Ok::<(), easy_options::OptionsError>(())
/// ```
#[derive(Debug)]
pub struct OptionsParser {
    config: ParserConfig,
    resolver: TypeResolver,
    registry: OptionRegistry,
}

impl Default for OptionsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            resolver: TypeResolver::new(),
            registry: OptionRegistry::new(),
        }
    }

    /// Replaces the type resolver. Options already declared keep the
    /// coercions they were resolved with.
    pub fn with_resolver(mut self, resolver: TypeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolver used for options declared from now on.
    pub fn resolver_mut(&mut self) -> &mut TypeResolver {
        &mut self.resolver
    }

    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Overrides the text printed above the usage line.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.config.description = Some(description.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    /// Declares an option. Chainable with `?`.
    ///
    /// # Errors
    ///
    /// Fails when the type tag is unknown, the name is empty, `help` or
    /// starts with something other than an ASCII letter or digit, or no
    /// short flag is left.
    pub fn add_option(&mut self, spec: OptionSpec) -> Result<&mut Self> {
        self.registry.add(spec, &self.resolver)?;
        Ok(self)
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Description and usage line.
    pub fn banner(&self) -> String {
        help::banner(self.description(), &self.config.program_name())
    }

    /// Complete help text as printed by `--help`.
    pub fn help_text(&self) -> String {
        help::render_help(&self.config, &self.registry)
    }

    /// Parses the current process arguments (without `argv[0]`), printing
    /// help and diagnostics to stdout.
    pub fn parse_env(&self) -> Result<ParseOutcome<ParsedOptions>> {
        self.parse(std::env::args_os().skip(1))
    }

    /// Parses `args` (without the program name), printing help and
    /// diagnostics to stdout.
    pub fn parse<I, S>(&self, args: I) -> Result<ParseOutcome<ParsedOptions>>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.parse_with_writer(args, &mut out)
    }

    /// Parses `args` into a fresh [`ParsedOptions`] with one field per
    /// declared option.
    pub fn parse_with_writer<I, S, W>(
        &self,
        args: I,
        out: &mut W,
    ) -> Result<ParseOutcome<ParsedOptions>>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
        W: Write + ?Sized,
    {
        let mut options = ParsedOptions::with_fields(self.registry.specs().map(OptionSpec::accessor));
        let outcome = self.parse_into(&mut options, args, out)?;

        Ok(outcome.map(|remaining| {
            options.set_remaining(remaining);
            options
        }))
    }

    /// Parses `args` into a caller-supplied target.
    ///
    /// Defaults are written first, then every supplied value in
    /// command-line order; the last occurrence of a repeated flag wins. A
    /// completed parse yields the arguments that were not options.
    ///
    /// A failed coercion aborts immediately; the target may then hold
    /// defaults and values coerced before the failure.
    pub fn parse_into<T, I, S, W>(
        &self,
        target: &mut T,
        args: I,
        out: &mut W,
    ) -> Result<ParseOutcome<Vec<String>>>
    where
        T: OptionSink + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
        W: Write + ?Sized,
    {
        let program = self.config.program_name();
        let mut set_fields = self.apply_defaults(target);

        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let argv = std::iter::once(OsString::from(program.as_str())).chain(args.iter().cloned());
        let matches = match self.command(&program).try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) if self.help_before_unknown_switch(&args) => {
                debug!(error = ?err.kind(), "Help requested ahead of a tokenizer error");
                return self.print_help(out);
            }
            Err(err) => return Err(err.into()),
        };

        if matches.get_flag(HELP_ID) {
            return self.print_help(out);
        }

        for (option, raw) in supplied_values(&self.registry, &matches) {
            let value = option
                .coercion
                .apply(raw)
                .map_err(|source| OptionsError::InvalidValue {
                    option: option.spec.name.clone(),
                    source,
                })?;
            debug!(option = %option.spec.name, coercion = option.coercion.label(), "Coerced value");

            let field = option.spec.accessor();
            target.set(&field, Some(value));
            set_fields.insert(field);
        }

        let missing = find_missing(self.registry.specs(), |field| set_fields.contains(field));
        if !missing.is_empty() {
            debug!(missing = ?missing.names(), "Required options missing");
            writeln!(out, "{missing}, use --{HELP_LONG} for options")?;
            out.write_all(self.help_text().as_bytes())?;
            out.flush()?;
            return Ok(ParseOutcome::MissingRequired(missing));
        }

        let remaining = matches
            .get_many::<String>(REMAINING_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(ParseOutcome::Completed(remaining))
    }

    fn print_help<W, R>(&self, out: &mut W) -> Result<ParseOutcome<R>>
    where
        W: Write + ?Sized,
    {
        debug!("Help requested");
        out.write_all(self.help_text().as_bytes())?;
        out.flush()?;
        Ok(ParseOutcome::HelpPrinted)
    }

    /// Walks `args` in order and reports whether `-h`/`--help` shows up
    /// before the first unknown switch or the `--` terminator. Values of
    /// declared options are skipped, so `-m -h` does not count as help.
    fn help_before_unknown_switch(&self, args: &[OsString]) -> bool {
        let help_short = format!("-{HELP_SHORT}");
        let help_long = format!("--{HELP_LONG}");
        let mut tokens = args.iter().map(|arg| arg.to_str());

        while let Some(token) = tokens.next() {
            let Some(token) = token else { continue };
            if token == "--" {
                return false;
            }
            if token == help_short || token == help_long {
                return true;
            }
            if !token.starts_with('-') || token == "-" {
                continue;
            }

            let Some(option) = self.registry.iter().find(|option| {
                matches_switch(token, option.short, &option.spec.long_name())
            }) else {
                return false;
            };
            let takes_next = token == format!("-{}", option.short)
                || token == option.spec.long_flag();
            if takes_next {
                tokens.next();
            }
        }
        false
    }

    /// Writes every default (or `None`) and returns the fields that now
    /// hold a value.
    fn apply_defaults<T: OptionSink + ?Sized>(&self, target: &mut T) -> HashSet<String> {
        let mut set_fields = HashSet::new();
        for spec in self.registry.specs() {
            let field = spec.accessor();
            if spec.default.is_some() {
                set_fields.insert(field.clone());
            }
            target.set(&field, spec.default.clone());
        }
        set_fields
    }

    /// Tokenizer definition for the current registry. Rebuilt per parse, so
    /// repeated parses never register a flag twice.
    fn command(&self, program: &str) -> Command {
        let mut command = Command::new(program.to_string())
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(
                Arg::new(HELP_ID)
                    .short(HELP_SHORT)
                    .long(HELP_LONG)
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new(REMAINING_ID)
                    .value_name("ARGS")
                    .action(ArgAction::Append)
                    .num_args(1..)
                    .hide(true),
            );

        for option in self.registry.iter() {
            command = command.arg(
                Arg::new(option.spec.accessor())
                    .short(option.short)
                    .long(option.spec.long_name())
                    .value_name(option.spec.placeholder())
                    .num_args(1)
                    .allow_hyphen_values(true)
                    .action(ArgAction::Append),
            );
        }

        command
    }
}

/// Whether `token` is a use of the switch `-short` / `--long`, with the
/// value attached or separate.
fn matches_switch(token: &str, short: char, long: &str) -> bool {
    if let Some(rest) = token.strip_prefix("--") {
        return rest == long || rest.strip_prefix(long).is_some_and(|tail| tail.starts_with('='));
    }
    token
        .strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(short))
}

/// Supplied raw values paired with their option, in command-line order.
fn supplied_values<'a>(
    registry: &'a OptionRegistry,
    matches: &'a ArgMatches,
) -> Vec<(&'a RegisteredOption, &'a str)> {
    let mut supplied: Vec<(usize, &RegisteredOption, &str)> = Vec::new();

    for option in registry.iter() {
        let id = option.spec.accessor();
        let (Some(values), Some(indices)) = (
            matches.get_many::<String>(&id),
            matches.indices_of(&id),
        ) else {
            continue;
        };
        supplied.extend(
            indices
                .zip(values)
                .map(|(index, raw)| (index, option, raw.as_str())),
        );
    }

    supplied.sort_by_key(|(index, ..)| *index);
    supplied
        .into_iter()
        .map(|(_, option, raw)| (option, raw))
        .collect()
}
