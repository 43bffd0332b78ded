//! Parser configuration.

/// Width of the switch column in help output.
pub const DEFAULT_HELP_WIDTH: usize = 32;
/// Indentation of every help line.
pub const DEFAULT_HELP_INDENT: usize = 4;
/// Program name used when the process has no `argv[0]`.
pub const FALLBACK_PROGRAM: &str = "main";

/// Settings for an [`OptionsParser`](crate::OptionsParser).
///
/// # Examples
///
/// ```
/// use easy_options::ParserConfig;
///
/// let config = ParserConfig::default()
///     .with_description("Import records")
///     .with_program("import.sh");
/// assert_eq!(config.program_name(), "import.sh");
/// assert_eq!(config.help_width, 32);
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Text printed above the usage line.
    pub description: Option<String>,
    /// Program named in the usage line; defaults to `argv[0]`.
    pub program: Option<String>,
    pub help_width: usize,
    pub help_indent: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            description: None,
            program: None,
            help_width: DEFAULT_HELP_WIDTH,
            help_indent: DEFAULT_HELP_INDENT,
        }
    }
}

impl ParserConfig {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Configured program, else the running executable's `argv[0]`
    /// (lossily decoded when it is not UTF-8).
    pub fn program_name(&self) -> String {
        self.program
            .clone()
            .or_else(|| {
                std::env::args_os()
                    .next()
                    .map(|arg| arg.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| FALLBACK_PROGRAM.to_string())
    }
}
