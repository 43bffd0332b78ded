//! Help text rendering.
//!
//! ```text
//! Import records
//! Usage: import.sh [options]
//!     -h, --help                       Prints this help
//!     -i, --input INPUT                Source file (required)
//! ```

use crate::config::ParserConfig;
use crate::registry::{HELP_LONG, HELP_SHORT, OptionRegistry};

const HELP_DESCRIPTION: &str = "Prints this help";

/// Optional description line followed by the usage line.
pub fn banner(description: Option<&str>, program: &str) -> String {
    match description {
        Some(description) => format!("{description}\nUsage: {program} [options]"),
        None => format!("Usage: {program} [options]"),
    }
}

/// Full help text: banner, help switch, then one line per option.
pub fn render_help(config: &ParserConfig, registry: &OptionRegistry) -> String {
    let mut out = banner(config.description.as_deref(), &config.program_name());
    out.push('\n');

    let help_switches = format!("-{HELP_SHORT}, --{HELP_LONG}");
    push_entry(&mut out, config, &help_switches, HELP_DESCRIPTION);

    for option in registry.iter() {
        push_entry(
            &mut out,
            config,
            &option.switches(),
            &option.spec.help_description(),
        );
    }

    out
}

fn push_entry(out: &mut String, config: &ParserConfig, switches: &str, description: &str) {
    let indent = " ".repeat(config.help_indent);
    let width = config.help_width;

    if description.is_empty() {
        out.push_str(&format!("{indent}{switches}\n"));
    } else if switches.len() > width {
        let pad = " ".repeat(config.help_indent + width + 1);
        out.push_str(&format!("{indent}{switches}\n{pad}{description}\n"));
    } else {
        out.push_str(&format!("{indent}{switches:<width$} {description}\n"));
    }
}
