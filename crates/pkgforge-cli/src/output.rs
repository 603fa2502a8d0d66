//! User-facing output.
//!
//! Progress lines go to stdout through [`OutputManager`]; diagnostics go
//! through `tracing` to stderr.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::error::{CliError, CliResult};

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags.
    pub fn new(args: &GlobalArgs) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet mode and under JSON output.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.is_quiet() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Command output proper (`config get`, `config show`); printed even in
    /// quiet mode.
    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Pretty JSON of `value`, printed even in quiet mode.
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CliError::Output {
            message: e.to_string(),
        })?;
        Ok(self.term.write_line(&text)?)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2713}", msg, |s| s.green().bold().to_string())
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{26a0}", msg, |s| s.yellow().bold().to_string())
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2139}", msg, |s| s.blue().bold().to_string())
    }

    /// Dimmed `· <msg>` for things left untouched.
    pub fn skipped(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{00b7}", msg, |s| s.dimmed().to_string())
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.is_quiet() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    fn marked(&self, mark: &str, msg: &str, paint: impl Fn(&str) -> String) -> io::Result<()> {
        if self.is_quiet() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{mark} {msg}")
        } else {
            format!("{} {}", paint(mark), msg)
        };
        self.term.write_line(&line)
    }

    /// Progress output is off: `--quiet`, or stdout carries JSON.
    pub fn is_quiet(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color: false,
            config: None,
            defaults: None,
            output_format: format,
        };
        OutputManager::new(&args)
    }

    #[test]
    fn quiet_suppresses_progress() {
        let out = make_manager(true, OutputFormat::Plain);
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }

    #[test]
    fn json_format_silences_progress() {
        assert!(make_manager(false, OutputFormat::Json).is_quiet());
        assert!(!make_manager(false, OutputFormat::Plain).is_quiet());
    }

    #[test]
    fn explicit_format_is_kept() {
        assert_eq!(make_manager(false, OutputFormat::Json).format(), OutputFormat::Json);
        assert_eq!(make_manager(false, OutputFormat::Plain).format(), OutputFormat::Plain);
    }

    #[test]
    fn plain_output_has_no_color() {
        assert!(make_manager(false, OutputFormat::Plain).no_color);
        assert!(!make_manager(false, OutputFormat::Human).no_color);
    }
}
