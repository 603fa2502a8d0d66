//! Jinja-style rendering via `minijinja`.

use minijinja::{Environment, UndefinedBehavior};
use tracing::instrument;

use crate::env_loader::quote_env_value;
use pkgforge_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::DataBag,
    error::ForgeResult,
};

/// Renders template text against the data bag.
///
/// Undefined variables are errors, so a typo in a template surfaces as a
/// warning in the generation report instead of silently rendering empty.
///
/// Two filters quote user text for the files that embed it: `toml` emits a
/// TOML string literal and `dotenv` a double-quoted dotenv value.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("toml", |value: String| toml::Value::String(value).to_string());
        env.add_filter("dotenv", |value: String| quote_env_value(&value));
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    #[instrument(skip_all)]
    fn render(&self, template: &str, data: &DataBag) -> ForgeResult<String> {
        self.env.render_str(template, data).map_err(|e| {
            ApplicationError::RenderingFailed {
                template: e.name().unwrap_or("<inline>").to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
