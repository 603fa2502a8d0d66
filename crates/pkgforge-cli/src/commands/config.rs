//! `pkgforge config`: inspect the merged configuration.

use serde_json::Value;

use pkgforge_adapters::{DefaultsSource, LayeredStore, TEMPLATES_DIR_ENV};

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::{Sources, lookup, snapshot_view},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, sources: &Sources, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let view = snapshot_view(&sources.load()?);
            if output.format() == OutputFormat::Json {
                return output.json(&view);
            }
            let text = toml::to_string_pretty(&view).map_err(|e| CliError::Output {
                message: e.to_string(),
            })?;
            output.data(text.trim_end())?;
        }

        ConfigCommands::Get { key } => {
            let view = snapshot_view(&sources.load()?);
            let value = lookup(&view, &key).ok_or_else(|| CliError::UnknownKey { key })?;
            if output.format() == OutputFormat::Json {
                return output.json(value);
            }
            output.data(&render_scalar(value))?;
        }

        ConfigCommands::Path => {
            let defaults = match sources.loader.defaults_source() {
                DefaultsSource::Builtin => "<builtin>".to_string(),
                DefaultsSource::File(path) => path.display().to_string(),
            };
            let identity = sources
                .env
                .identity_file()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into());
            let templates = match LayeredStore::override_dir() {
                Some(dir) => dir.display().to_string(),
                None => format!("<builtin> (set {TEMPLATES_DIR_ENV} to override)"),
            };

            output.data(&format!("defaults:  {defaults}"))?;
            output.data(&format!(
                "config:    {}",
                sources.loader.user_config_path().display()
            ))?;
            output.data(&format!("identity:  {identity}"))?;
            output.data(&format!("env:       {}", sources.env.local_file().display()))?;
            output.data(&format!("templates: {templates}"))?;
        }
    }

    Ok(())
}

/// Strings print bare, everything else as JSON.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_print_without_quotes() {
        assert_eq!(render_scalar(&json!("MIT")), "MIT");
        assert_eq!(render_scalar(&json!(92)), "92");
        assert_eq!(render_scalar(&json!(["1.10", "1"])), "[\"1.10\",\"1\"]");
    }
}
