//! # Terminal Output
//!
//! Styling for the human-readable summaries the CLI prints. Diagnostics go
//! through `log`; this module only decides how the final report looks.
//!
//! Color is controlled by `--color=always|never|auto`. In `auto` mode it is
//! turned off by `NO_COLOR` (any value), `CLICOLOR=0`, `TERM=dumb`, or a
//! non-terminal stdout, and forced on by `CLICOLOR_FORCE=1`.

use std::env;
use std::fmt::Display;

use console::style;

/// Output configuration for controlling colors and status markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

/// Kind of status line in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Info,
    Warn,
    Fail,
}

impl OutputConfig {
    /// Build from the `--color` flag value and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_ascii_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => detect_color_support(),
        };
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Leading marker for a status line.
    pub fn marker(&self, status: Status) -> String {
        let (glyph, text) = match status {
            Status::Ok => ("✔", "[ok]"),
            Status::Info => ("•", "[..]"),
            Status::Warn => ("!", "[warn]"),
            Status::Fail => ("✘", "[fail]"),
        };
        if !self.use_color {
            return text.to_string();
        }
        match status {
            Status::Ok => style(glyph).green().to_string(),
            Status::Info => style(glyph).cyan().to_string(),
            Status::Warn => style(glyph).yellow().to_string(),
            Status::Fail => style(glyph).red().bold().to_string(),
        }
    }

    /// Render a path or other value with emphasis when color is on.
    pub fn emphasize(&self, value: impl Display) -> String {
        if self.use_color {
            style(value).bold().to_string()
        } else {
            value.to_string()
        }
    }

    /// Render secondary detail (scopes, counts) dimmed when color is on.
    pub fn dim(&self, value: impl Display) -> String {
        if self.use_color {
            style(value).dim().to_string()
        } else {
            value.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}
