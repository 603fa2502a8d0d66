//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Diagnostics on stderr: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More diagnostics on stderr (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only errors; progress lines are dropped too.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors and command output only"
    )]
    pub quiet: bool,

    /// Plain output without ANSI colours. `NO_COLOR=1` has the same effect.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Project configuration file (default: `./pkgforge.toml`).
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Project configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Replacement defaults document.
    #[arg(
        long = "defaults",
        global = true,
        value_name = "FILE",
        env = "PKGFORGE_DEFAULTS",
        help = "Defaults document replacing the builtin one"
    )]
    pub defaults: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed on stdout"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise.
    #[default]
    Auto,
    /// Coloured progress lines.
    Human,
    /// Progress lines without colour.
    Plain,
    /// One JSON document; progress lines are suppressed.
    Json,
}
