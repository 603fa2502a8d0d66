//! End-to-end generation against the real filesystem, builtin templates and
//! the minijinja renderer.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use pkgforge_adapters::{
    BuiltinStore, ConfigLoader, DirectoryStore, EnvLoader, LayeredStore, LocalFilesystem,
    MemoryFilesystem, MiniJinjaRenderer, PathToolLocator, TomlManifestReader,
};
use pkgforge_core::application::{DOCS_MARKER, SCIENTIFIC_MARKER};
use pkgforge_core::prelude::*;
use pkgforge_core::testing::SnapshotBuilder;

const ALL_FEATURES: &[&str] = &[
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
];

fn engine() -> GenerationService {
    GenerationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(BuiltinStore::new()),
        Box::new(MiniJinjaRenderer::new()),
    )
    .with_year(2026)
}

fn config_in(dir: &Path, features: &[&str]) -> ResolvedConfig {
    SnapshotBuilder::valid()
        .name("FullTestPkg")
        .target_dir(&dir.display().to_string())
        .only_features(features)
        .env_var("JULIA_NUM_THREADS", "4")
        .resolved()
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

#[test]
fn every_feature_renders_without_warnings() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), ALL_FEATURES);
    let report = engine().generate_project(&config, false);

    assert!(report.warnings.is_empty(), "{:#?}", report.warnings);
    assert!(report.unavailable.is_empty());

    let root = dir.path().join("FullTestPkg");
    for rel in [
        "Project.toml",
        "src/FullTestPkg.jl",
        "README.md",
        "LICENSE",
        ".gitignore",
        ".env",
        "test/runtests.jl",
        "test/Project.toml",
        "docs/make.jl",
        "docs/src/index.md",
        "docs/Project.toml",
        ".github/workflows/CI.yml",
        ".github/workflows/TagBot.yml",
        ".github/workflows/CompatHelper.yml",
        ".JuliaFormatter.toml",
        "dev/setup.jl",
        "benchmark/benchmarks.jl",
        "benchmark/Project.toml",
        "src/logging.jl",
        "src/Result.jl",
        "scripts/analysis.jl",
        "notebooks/analysis.jl",
    ] {
        assert!(root.join(rel).is_file(), "missing {rel}");
    }
    for dir in ["data", "scripts", "results"] {
        assert!(root.join(dir).is_dir(), "missing {dir}/");
    }

    let manifest = read(&root, "Project.toml");
    assert!(manifest.contains("name = \"FullTestPkg\""));
    assert!(manifest.contains("uuid = \"00000000-0000-4000-8000-000000000000\""));
    assert!(manifest.contains("authors = [\"Ada Lovelace <ada@example.com>\"]"));
    assert!(manifest.contains("Logging = "));

    let module = read(&root, "src/FullTestPkg.jl");
    assert!(module.contains("include(\"logging.jl\")"));
    assert!(module.contains("include(\"Result.jl\")"));

    let ci = read(&root, ".github/workflows/CI.yml");
    assert!(ci.contains("${{ matrix.version }}"));
    assert!(ci.contains("- '1.10'"));
    assert!(ci.contains("julia-docdeploy"));

    assert!(read(&root, ".JuliaFormatter.toml").contains("margin = 92"));
    assert!(read(&root, "LICENSE").contains("Copyright (c) 2026 Ada Lovelace"));
    assert!(read(&root, ".env").contains("JULIA_NUM_THREADS=4"));
    assert!(read(&root, "test/runtests.jl").contains("Aqua.test_all(FullTestPkg)"));
}

#[test]
fn gitignore_blocks_are_appended_once() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), &["docs", "scientific"]);
    let engine = engine();

    engine.generate_project(&config, false);
    let second = engine.generate_project(&config, false);
    assert!(second.appended.is_empty());

    let gitignore = read(&dir.path().join("FullTestPkg"), ".gitignore");
    assert_eq!(gitignore.matches(DOCS_MARKER).count(), 1);
    assert_eq!(gitignore.matches(SCIENTIFIC_MARKER).count(), 1);
    assert_eq!(gitignore.matches("docs/build/").count(), 1);
}

#[test]
fn rerun_keeps_user_edits_unless_forced() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), &["tests"]);
    let engine = engine();
    let root = dir.path().join("FullTestPkg");

    engine.generate_project(&config, false);
    fs::write(root.join("README.md"), "my notes\n").unwrap();

    let rerun = engine.generate_project(&config, false);
    assert_eq!(rerun.outcome_of("README.md"), Some(WriteOutcome::Skipped));
    assert_eq!(rerun.written().count(), 0);
    assert_eq!(read(&root, "README.md"), "my notes\n");

    let forced = engine.generate_project(&config, true);
    assert_eq!(forced.outcome_of("README.md"), Some(WriteOutcome::Overwritten));
    assert!(read(&root, "README.md").starts_with("# FullTestPkg.jl"));
}

#[test]
fn uuid_survives_regeneration() {
    let dir = TempDir::new().unwrap();
    let snapshot = SnapshotBuilder::valid()
        .name("FullTestPkg")
        .target_dir(&dir.path().display().to_string())
        .only_features(&[])
        .build();
    let identity = IdentityService::new(Box::new(TomlManifestReader::new()));

    let first = identity.resolve_uuid(&snapshot.project_path());
    engine().generate_project(&snapshot.with_uuid(first.clone()), false);

    let second = identity.resolve_uuid(&snapshot.project_path());
    assert_eq!(first, second);
    engine().generate_project(&snapshot.with_uuid(second), true);

    let manifest = read(&snapshot.project_path(), "Project.toml");
    assert!(manifest.contains(first.as_str()));
}

#[test]
fn quoted_author_keeps_manifest_parseable() {
    let dir = TempDir::new().unwrap();
    let snapshot = SnapshotBuilder::valid()
        .name("FullTestPkg")
        .author(r#"Ada "Countess" Lovelace"#)
        .target_dir(&dir.path().display().to_string())
        .only_features(&["docs", "benchmark"])
        .build();
    let identity = IdentityService::new(Box::new(TomlManifestReader::new()));

    let first = identity.resolve_uuid(&snapshot.project_path());
    let report = engine().generate_project(&snapshot.with_uuid(first.clone()), false);
    assert!(report.warnings.is_empty(), "{:#?}", report.warnings);

    let second = identity.resolve_uuid(&snapshot.project_path());
    assert_eq!(first, second);

    let root = snapshot.project_path();
    let manifest: toml::Table = toml::from_str(&read(&root, "Project.toml")).unwrap();
    assert_eq!(
        manifest["authors"][0].as_str(),
        Some(r#"Ada "Countess" Lovelace <ada@example.com>"#)
    );
    for rel in ["docs/Project.toml", "benchmark/Project.toml"] {
        let sub: toml::Table = toml::from_str(&read(&root, rel)).unwrap();
        assert_eq!(sub["deps"]["FullTestPkg"].as_str(), Some(first.as_str()));
    }
}

#[test]
fn env_values_survive_a_reload() {
    let dir = TempDir::new().unwrap();
    let config = SnapshotBuilder::valid()
        .name("FullTestPkg")
        .target_dir(&dir.path().display().to_string())
        .only_features(&[])
        .env_var("GREETING", r#"say "hi" # not a comment $HOME"#)
        .env_var("WINDOWS_PATH", r"C:\tools\julia")
        .resolved();
    engine().generate_project(&config, false);

    let loaded = EnvLoader::new(&config.project_path())
        .with_identity_file(None)
        .without_process_overlay()
        .load()
        .unwrap();
    assert_eq!(
        loaded.get("GREETING").map(String::as_str),
        Some(r#"say "hi" # not a comment $HOME"#)
    );
    assert_eq!(
        loaded.get("WINDOWS_PATH").map(String::as_str),
        Some(r"C:\tools\julia")
    );
}

#[test]
fn unknown_feature_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), &["tests", "quantum"]);
    let report = engine().generate_project(&config, false);

    assert_eq!(report.unavailable, vec!["quantum".to_string()]);
    assert!(dir.path().join("FullTestPkg/test/runtests.jl").is_file());
}

#[test]
fn template_overrides_replace_single_files() {
    let dir = TempDir::new().unwrap();
    let overrides = TempDir::new().unwrap();
    fs::create_dir_all(overrides.path().join("base")).unwrap();
    fs::write(overrides.path().join("base/README.md"), "Custom {{ PKG }}\n").unwrap();

    let store = LayeredStore::new(vec![
        Box::new(DirectoryStore::new(overrides.path())),
        Box::new(BuiltinStore::new()),
    ]);
    let engine = GenerationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(store),
        Box::new(MiniJinjaRenderer::new()),
    );
    let report = engine.generate_project(&config_in(dir.path(), &[]), false);

    assert!(report.warnings.is_empty(), "{:#?}", report.warnings);
    let root = dir.path().join("FullTestPkg");
    assert_eq!(read(&root, "README.md"), "Custom FullTestPkg\n");
    assert!(read(&root, "Project.toml").contains("FullTestPkg"));
}

#[test]
fn memory_filesystem_run_touches_only_the_project() {
    let fs = MemoryFilesystem::new();
    let engine = GenerationService::new(
        Box::new(fs.clone()),
        Box::new(BuiltinStore::new()),
        Box::new(MiniJinjaRenderer::new()),
    )
    .with_year(2026);
    let config = SnapshotBuilder::valid()
        .name("Mem")
        .target_dir("/projects")
        .only_features(&["ci"])
        .resolved();

    let report = engine.generate_project(&config, false);
    assert!(report.warnings.is_empty(), "{:#?}", report.warnings);
    assert_eq!(report.features, vec!["ci", "tagbot", "compathelper"]);
    assert!(fs.list_files().iter().all(|p| p.starts_with("/projects/Mem")));
    assert!(fs
        .contents("/projects/Mem/README.md")
        .unwrap()
        .contains("actions/workflows/CI.yml/badge.svg"));
}

#[test]
fn every_builtin_template_renders_with_all_features() {
    let store = BuiltinStore::new();
    let renderer = MiniJinjaRenderer::new();
    let data = DataBag::from_config(&config_in(Path::new("/p"), ALL_FEATURES), 2026);
    for name in store.names() {
        let text = store.get(name).unwrap();
        let rendered = renderer.render(&text, &data);
        assert!(rendered.is_ok(), "{name}: {:?}", rendered.err());
    }
}

#[test]
fn loaded_sources_merge_validate_and_generate() {
    let work = TempDir::new().unwrap();
    let projects = TempDir::new().unwrap();
    fs::write(
        work.path().join("pkgforge.toml"),
        "[project]\nname = \"FromFiles\"\nlicense = \"BSD-3-Clause\"\n\n[features]\ndocs = true\nformatter_margin = 100\n",
    )
    .unwrap();
    fs::write(
        work.path().join(".env"),
        format!(
            "AUTHOR_NAME=\"Grace Hopper\"\nGITHUB_USER=grace\nAUTHOR_EMAIL=grace@example.com\nPROJECTS_DIR={}\n",
            projects.path().display()
        ),
    )
    .unwrap();

    let loader = ConfigLoader::new(work.path());
    let defaults = loader.load_defaults().unwrap();
    let user = loader.load_user().unwrap();
    let env = EnvLoader::new(work.path())
        .with_identity_file(None)
        .without_process_overlay()
        .load()
        .unwrap();
    let snapshot = merge(&defaults, &user, &env);
    assert_eq!(snapshot.formatter().margin, 100);

    let validation = ValidationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(PathToolLocator::new()),
    );
    validation.validate(&snapshot).unwrap();

    let config = snapshot.with_uuid(
        IdentityService::new(Box::new(TomlManifestReader::new()))
            .resolve_uuid(&snapshot.project_path()),
    );
    let report = engine().generate_project(&config, false);
    assert!(report.warnings.is_empty(), "{:#?}", report.warnings);

    let root = projects.path().join("FromFiles");
    assert!(read(&root, "LICENSE").starts_with("BSD 3-Clause License"));
    assert!(read(&root, ".JuliaFormatter.toml").contains("margin = 100"));
    assert!(read(&root, "docs/make.jl").contains("Grace Hopper"));
}
