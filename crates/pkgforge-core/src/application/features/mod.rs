//! Open feature registry.
//!
//! A feature is an independently toggleable slice of scaffolding. Each one
//! is a plain function registered under its `[features]` key; the engine
//! looks handlers up by name, so adding a feature means registering a
//! handler, not touching the dispatcher. Looking up a name nobody
//! registered yields `None`, which the engine reports as unavailable.

use std::collections::BTreeMap;

use crate::{application::services::GenerationContext, error::ForgeResult};

mod docs;
mod quality;
mod science;
mod workflows;
mod workspace;

pub use docs::DOCS_MARKER;
pub use science::SCIENTIFIC_MARKER;

/// A feature generator. Handlers only add files below the project root.
pub type FeatureHandler = fn(&GenerationContext<'_>) -> ForgeResult<()>;

#[derive(Clone, Default)]
pub struct FeatureRegistry {
    handlers: BTreeMap<String, FeatureHandler>,
}

impl FeatureRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every feature pkgforge ships.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("tests", quality::tests);
        registry.register("formatter", quality::formatter);
        registry.register("benchmark", quality::benchmark);
        registry.register("docs", docs::docs);
        registry.register("ci", workflows::ci);
        registry.register("tagbot", workflows::tagbot);
        registry.register("compathelper", workflows::compathelper);
        registry.register("dev", workspace::dev);
        registry.register("logging", workspace::logging);
        registry.register("result", workspace::result);
        registry.register("scientific", science::scientific);
        registry.register("notebooks", science::notebooks);
        registry
    }

    /// Register `handler` under `name`, returning any handler it replaces.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: FeatureHandler,
    ) -> Option<FeatureHandler> {
        self.handlers.insert(name.into(), handler)
    }

    pub fn get(&self, name: &str) -> Option<FeatureHandler> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateRenderer, MockTemplateStore};
    use crate::application::ApplicationError;
    use crate::application::services::{GenerationReport, GenerationService};
    use crate::domain::ProjectUuid;
    use crate::testing::SnapshotBuilder;

    fn noop(_: &GenerationContext<'_>) -> ForgeResult<()> {
        Ok(())
    }

    #[test]
    fn builtin_registry_covers_all_features() {
        let registry = FeatureRegistry::builtin();
        for name in [
            "tests",
            "docs",
            "ci",
            "formatter",
            "dev",
            "benchmark",
            "logging",
            "scientific",
            "notebooks",
            "result",
            "tagbot",
            "compathelper",
        ] {
            assert!(registry.contains(name), "{name}");
        }
        assert_eq!(registry.names().count(), 12);
    }

    #[test]
    fn unknown_name_yields_none() {
        assert!(FeatureRegistry::builtin().get("quantum").is_none());
    }

    #[test]
    fn register_extends_and_replaces() {
        let mut registry = FeatureRegistry::new();
        assert!(registry.register("custom", noop).is_none());
        assert!(registry.register("custom", noop).is_some());
        assert!(registry.get("custom").is_some());
    }

    /// Run a generation against mocks where every template exists and no
    /// file exists yet; returns the report and every written path.
    fn generate(features: &[&str], extra: &[(&str, bool)]) -> (GenerationReport, Vec<PathBuf>) {
        generate_failing(features, extra, None)
    }

    /// Like [`generate`], but writing the relative path `failing` errors.
    fn generate_failing(
        features: &[&str],
        extra: &[(&str, bool)],
        failing: Option<&'static str>,
    ) -> (GenerationReport, Vec<PathBuf>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);

        let mut store = MockTemplateStore::new();
        store.expect_get().returning(|r| Some(format!("template {r}")));
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|t, _| Ok(t.to_string()));
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().returning(move |p, _| {
            if failing.is_some_and(|rel| p == Path::new("/projects/Demo").join(rel).as_path()) {
                return Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into());
            }
            sink.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });

        let mut builder = SnapshotBuilder::valid()
            .target_dir("/projects")
            .name("Demo")
            .only_features(features);
        for (name, on) in extra {
            builder = builder.feature(name, *on);
        }
        let config = builder.build().with_uuid(ProjectUuid::existing("u"));

        let engine = GenerationService::new(Box::new(fs), Box::new(store), Box::new(renderer))
            .with_year(2026);
        let report = engine.generate_project(&config, false);
        let paths = written.lock().unwrap().clone();
        (report, paths)
    }

    fn wrote(paths: &[PathBuf], rel: &str) -> bool {
        paths.iter().any(|p| p == &Path::new("/projects/Demo").join(rel))
    }

    #[test]
    fn base_structure_is_always_written() {
        let (report, paths) = generate(&[], &[]);
        for rel in ["Project.toml", "src/Demo.jl", "README.md", "LICENSE", ".gitignore", ".env"] {
            assert!(wrote(&paths, rel), "{rel}");
        }
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn ci_cascades_into_release_workflows() {
        let (report, paths) = generate(&["ci"], &[]);
        assert!(wrote(&paths, ".github/workflows/CI.yml"));
        assert!(wrote(&paths, ".github/workflows/TagBot.yml"));
        assert!(wrote(&paths, ".github/workflows/CompatHelper.yml"));
        assert_eq!(report.features, vec!["ci", "tagbot", "compathelper"]);
    }

    #[test]
    fn explicit_false_stops_the_cascade() {
        let (report, paths) = generate(&["ci"], &[("tagbot", false)]);
        assert!(!wrote(&paths, ".github/workflows/TagBot.yml"));
        assert!(wrote(&paths, ".github/workflows/CompatHelper.yml"));
        assert!(!report.features.contains(&"tagbot".to_string()));
    }

    #[test]
    fn cascaded_feature_that_is_also_enabled_runs_once() {
        let (report, _) = generate(&["ci", "tagbot"], &[]);
        let runs = report.features.iter().filter(|f| *f == "tagbot").count();
        assert_eq!(runs, 1);
    }

    #[test]
    fn scientific_implies_notebooks() {
        let (report, paths) = generate(&["scientific"], &[]);
        assert!(wrote(&paths, "scripts/analysis.jl"));
        assert!(wrote(&paths, "notebooks/analysis.jl"));
        let dirs: Vec<String> = report.directories.iter().map(|d| d.to_string()).collect();
        assert_eq!(dirs, vec!["data", "scripts", "results"]);
    }

    #[test]
    fn disabled_features_write_nothing() {
        let (_, paths) = generate(&["tests"], &[("logging", false)]);
        assert!(wrote(&paths, "test/runtests.jl"));
        assert!(!wrote(&paths, "src/logging.jl"));
        assert!(!wrote(&paths, "docs/make.jl"));
    }

    #[test]
    fn failed_write_does_not_drop_the_rest_of_the_feature() {
        let (report, paths) = generate_failing(&["docs"], &[], Some("docs/make.jl"));
        assert!(!wrote(&paths, "docs/make.jl"));
        assert!(wrote(&paths, "docs/src/index.md"));
        assert!(wrote(&paths, "docs/Project.toml"));
        assert!(report.appended.iter().any(|p| p.to_string() == ".gitignore"));
        assert_eq!(report.warnings.len(), 1, "{:#?}", report.warnings);
        assert!(report.warnings[0].contains("docs/make.jl"));
    }

    #[test]
    fn failed_workflow_still_cascades() {
        let (report, paths) = generate_failing(&["ci"], &[], Some(".github/workflows/CI.yml"));
        assert!(wrote(&paths, ".github/workflows/TagBot.yml"));
        assert!(wrote(&paths, ".github/workflows/CompatHelper.yml"));
        assert_eq!(report.features, vec!["ci", "tagbot", "compathelper"]);
        assert_eq!(report.warnings.len(), 1);
    }
}
