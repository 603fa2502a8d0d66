//! Templates embedded at compile time.

use pkgforge_core::application::ports::TemplateStore;

macro_rules! embedded {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name)))),*]
    };
}

static TEMPLATES: &[(&str, &str)] = embedded![
    "base/Project.toml",
    "base/src/Package.jl",
    "base/README.md",
    "base/gitignore",
    "licenses/MIT",
    "licenses/Apache-2.0",
    "licenses/BSD-3-Clause",
    "test/runtests.jl",
    "test/Project.toml",
    "docs/make.jl",
    "docs/src/index.md",
    "docs/Project.toml",
    "github/workflows/CI.yml",
    "github/workflows/TagBot.yml",
    "github/workflows/CompatHelper.yml",
    "formatter/JuliaFormatter.toml",
    "dev/setup.jl",
    "benchmark/benchmarks.jl",
    "benchmark/Project.toml",
    "src/logging.jl",
    "src/Result.jl",
    "scripts/analysis.jl",
    "notebooks/analysis.jl",
    "env",
];

/// The templates shipped with pkgforge.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStore;

impl BuiltinStore {
    pub fn new() -> Self {
        Self
    }

    /// Every builtin template reference.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        TEMPLATES.iter().map(|(name, _)| *name)
    }
}

impl TemplateStore for BuiltinStore {
    fn get(&self, template_ref: &str) -> Option<String> {
        TEMPLATES
            .iter()
            .find(|(name, _)| *name == template_ref)
            .map(|(_, text)| (*text).to_string())
    }
}
