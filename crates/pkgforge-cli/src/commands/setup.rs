//! `pkgforge setup`: store the author identity used by every project.

use tracing::info;

use pkgforge_core::{
    domain::{
        EnvMap, ValidationError,
        merge::{AUTHOR_EMAIL, AUTHOR_NAME, GITHUB_USER, PROJECTS_DIR},
        rules,
    },
    error::ForgeError,
};

use crate::{
    cli::SetupArgs,
    config::Sources,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: SetupArgs, sources: &Sources, output: &OutputManager) -> CliResult<()> {
    let existing = sources.env.identity_file().filter(|p| p.exists());
    if let Some(path) = existing.filter(|_| !args.force) {
        output.warning(&format!(
            "Identity already stored at {} (use --force to replace it)",
            path.display()
        ))?;
        return Ok(());
    }

    let name = value_or_prompt(args.name, "--name", "Full name", None)?;
    let user = value_or_prompt(args.user, "--user", "GitHub user name", None)?;
    let email = value_or_prompt(args.email, "--email", "Email", None)?;
    let dir = value_or_prompt(args.dir, "--dir", "Projects directory", Some("~/julia"))?;

    let mut problems = Vec::new();
    if name.trim().is_empty() {
        problems.push("Author name must not be empty".to_string());
    }
    rules::account_handle(&user, &mut problems);
    rules::contact_email(&email, &mut problems);
    if dir.trim().is_empty() {
        problems.push("Projects directory must not be empty".to_string());
    }
    if !problems.is_empty() {
        return Err(ForgeError::Validation(ValidationError::new(problems)).into());
    }

    let entries: EnvMap = [
        (AUTHOR_NAME, name),
        (GITHUB_USER, user),
        (AUTHOR_EMAIL, email),
        (PROJECTS_DIR, dir),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.trim().to_string()))
    .collect();

    let path = sources.env.write_identity(&entries, args.force)?;
    info!(path = %path.display(), "Identity written");
    output.success(&format!("Identity saved to {}", path.display()))?;
    Ok(())
}

fn value_or_prompt(
    value: Option<String>,
    flag: &'static str,
    prompt: &str,
    default: Option<&str>,
) -> CliResult<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt_for(flag, prompt, default),
    }
}

#[cfg(feature = "interactive")]
fn prompt_for(flag: &'static str, prompt: &str, default: Option<&str>) -> CliResult<String> {
    use dialoguer::{Input, theme::ColorfulTheme};
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Err(missing(flag));
    }

    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    input.interact_text().map_err(|e| CliError::InvalidInput {
        message: format!("could not read {flag}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(not(feature = "interactive"))]
fn prompt_for(flag: &'static str, _prompt: &str, _default: Option<&str>) -> CliResult<String> {
    Err(missing(flag))
}

fn missing(flag: &'static str) -> CliError {
    CliError::InvalidInput {
        message: format!("{flag} is required when not running interactively"),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_values_are_not_prompted_for() {
        assert_eq!(
            value_or_prompt(Some("ada".into()), "--user", "GitHub user name", None).unwrap(),
            "ada"
        );
    }

    #[test]
    fn missing_flag_names_the_flag() {
        assert!(missing("--email").to_string().contains("--email"));
    }
}
