//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pkgforge",
    bin_name = "pkgforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Idempotent Julia package scaffolding",
    long_about = "pkgforge generates Julia packages from layered configuration \
                  (builtin defaults, pkgforge.toml, identity environment). \
                  Re-running it never clobbers files you have edited.",
    after_help = "EXAMPLES:\n\
        \x20 pkgforge setup --name \"Ada Lovelace\" --user ada --email ada@example.com --dir ~/julia\n\
        \x20 pkgforge init\n\
        \x20 pkgforge generate\n\
        \x20 pkgforge config get features.docs",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store author identity for all future projects.
    #[command(
        about = "Save your identity (name, GitHub user, email, projects directory)",
        after_help = "EXAMPLES:\n\
            \x20 pkgforge setup                      # prompts for every value\n\
            \x20 pkgforge setup --user ada --force   # prompts for the rest, replaces the file"
    )]
    Setup(SetupArgs),

    /// Write a starter `pkgforge.toml`.
    #[command(
        about = "Create pkgforge.toml in the current directory",
        after_help = "EXAMPLES:\n\
            \x20 pkgforge init\n\
            \x20 pkgforge init --force"
    )]
    Init(InitArgs),

    /// Generate (or regenerate) the package.
    #[command(
        visible_alias = "gen",
        about = "Generate the package described by the configuration",
        after_help = "EXAMPLES:\n\
            \x20 pkgforge generate\n\
            \x20 pkgforge generate --no-hooks\n\
            \x20 pkgforge generate --force --templates ./my-templates"
    )]
    Generate(GenerateArgs),

    /// Inspect the merged configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 pkgforge config show\n\
            \x20 pkgforge config get formatter.margin\n\
            \x20 pkgforge config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pkgforge completions bash > ~/.local/share/bash-completion/completions/pkgforge\n\
            \x20 pkgforge completions zsh  > ~/.zfunc/_pkgforge\n\
            \x20 pkgforge completions fish > ~/.config/fish/completions/pkgforge.fish"
    )]
    Completions(CompletionsArgs),
}

// ── setup ─────────────────────────────────────────────────────────────────────

/// Arguments for `pkgforge setup`. Values not given are prompted for.
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Author full name.
    #[arg(long = "name", value_name = "NAME", help = "Author full name")]
    pub name: Option<String>,

    /// GitHub account handle.
    #[arg(long = "user", value_name = "HANDLE", help = "GitHub user name")]
    pub user: Option<String>,

    /// Contact email.
    #[arg(long = "email", value_name = "EMAIL", help = "Contact email")]
    pub email: Option<String>,

    /// Directory new packages are created in.
    #[arg(long = "dir", value_name = "DIR", help = "Projects directory")]
    pub dir: Option<String>,

    /// Replace an existing identity file.
    #[arg(short = 'f', long = "force", help = "Overwrite the existing identity file")]
    pub force: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `pkgforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `pkgforge generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Replace files that already exist.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Skip git, Pkg and GitHub commands after generation.
    #[arg(long = "no-hooks", help = "Do not run post-generation commands")]
    pub no_hooks: bool,

    /// Directory whose files override builtin templates.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template override directory"
    )]
    pub templates: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pkgforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `pkgforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration.
    Show,
    /// Print one merged value.
    Get {
        /// Dotted key path, e.g. `formatter.margin`.
        key: String,
    },
    /// Print where each configuration source is read from.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_flags() {
        let cli = Cli::parse_from([
            "pkgforge",
            "generate",
            "--force",
            "--no-hooks",
            "--templates",
            "tpl",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert!(args.force && args.no_hooks);
        assert_eq!(args.templates, Some(PathBuf::from("tpl")));
    }

    #[test]
    fn gen_alias() {
        let cli = Cli::parse_from(["pkgforge", "gen"]);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pkgforge", "config", "show", "-c", "other.toml", "-vv"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("other.toml")));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["pkgforge", "--quiet", "--verbose", "init"]);
        assert!(result.is_err());
    }
}
