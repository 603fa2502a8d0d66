//! End-to-end tests for the `pkgforge` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const CLAIMED: [&str; 4] = ["AUTHOR_NAME", "GITHUB_USER", "AUTHOR_EMAIL", "PROJECTS_DIR"];

/// A command isolated from the caller's identity, defaults and templates.
fn pkgforge(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("pkgforge");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env("PKGFORGE_IDENTITY_FILE", dir.join("identity.env"))
        .env_remove("PKGFORGE_DEFAULTS")
        .env_remove("PKGFORGE_TEMPLATES_DIR")
        .env_remove("RUST_LOG");
    for key in CLAIMED {
        cmd.env_remove(key);
    }
    cmd
}

/// Workspace with a projects directory, a local `.env` and a config naming
/// `package`.
fn workspace(package: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let projects = temp.path().join("projects");
    fs::create_dir(&projects).unwrap();
    fs::write(
        temp.path().join(".env"),
        format!(
            "AUTHOR_NAME=\"Ada Lovelace\"\nGITHUB_USER=ada\nAUTHOR_EMAIL=ada@example.com\nPROJECTS_DIR={}\n",
            projects.display()
        ),
    )
    .unwrap();
    fs::write(
        temp.path().join("pkgforge.toml"),
        format!("[project]\nname = \"{package}\"\n\n[features]\ndocs = true\n"),
    )
    .unwrap();
    temp
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    pkgforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("setup"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    pkgforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    pkgforge(temp.path()).assert().code(2);
}

#[test]
fn init_writes_starter_config_once() {
    let temp = TempDir::new().unwrap();
    pkgforge(temp.path()).arg("init").assert().success();

    let path = temp.path().join("pkgforge.toml");
    let original = fs::read_to_string(&path).unwrap();
    assert!(original.contains("[project]"));

    fs::write(&path, "# edited\n").unwrap();
    pkgforge(temp.path()).arg("init").assert().success();
    assert_eq!(fs::read_to_string(&path).unwrap(), "# edited\n");

    pkgforge(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn generate_creates_package() {
    let temp = workspace("Widgets");
    pkgforge(temp.path())
        .args(["generate", "--no-hooks"])
        .assert()
        .success();

    let root = temp.path().join("projects/Widgets");
    let project = fs::read_to_string(root.join("Project.toml")).unwrap();
    assert!(project.contains("name = \"Widgets\""));
    assert!(project.contains("Ada Lovelace"));
    assert!(root.join("src/Widgets.jl").exists());
    assert!(root.join("test/runtests.jl").exists());
    assert!(root.join("docs/make.jl").exists());
    assert!(!root.join(".git").exists());
}

#[test]
fn regenerate_keeps_edits_unless_forced() {
    let temp = workspace("Widgets");
    pkgforge(temp.path())
        .args(["generate", "--no-hooks"])
        .assert()
        .success();

    let readme = temp.path().join("projects/Widgets/README.md");
    fs::write(&readme, "mine\n").unwrap();

    pkgforge(temp.path())
        .args(["generate", "--no-hooks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&readme).unwrap(), "mine\n");

    pkgforge(temp.path())
        .args(["generate", "--no-hooks", "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&readme).unwrap(), "mine\n");
}

#[test]
fn generate_json_reports_written_files() {
    let temp = workspace("Widgets");
    let out = pkgforge(temp.path())
        .args(["--output-format", "json", "generate", "--no-hooks"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let written = summary["written"].as_array().unwrap();
    assert!(written.iter().any(|p| p == "Project.toml"));
    assert!(summary["hooks"].is_null());
    assert_eq!(summary["uuid"].as_str().unwrap().len(), 36);
}

#[test]
fn invalid_configuration_lists_every_problem() {
    let temp = workspace("bad-name");
    fs::write(
        temp.path().join(".env"),
        "AUTHOR_NAME=Ada\nGITHUB_USER=-ada\nAUTHOR_EMAIL=nope\nPROJECTS_DIR=/definitely/not/here\n",
    )
    .unwrap();

    pkgforge(temp.path())
        .args(["generate", "--no-hooks"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Problems:"))
        .stderr(predicate::str::contains("bad-name"))
        .stderr(predicate::str::contains("nope"))
        .stderr(predicate::str::contains("/definitely/not/here"));
    assert!(!temp.path().join("projects/bad-name").exists());
}

#[test]
fn config_get_reads_merged_values() {
    let temp = workspace("Widgets");
    pkgforge(temp.path())
        .args(["config", "get", "project.name"])
        .assert()
        .success()
        .stdout("Widgets\n");
    pkgforge(temp.path())
        .args(["config", "get", "features.docs"])
        .assert()
        .success()
        .stdout("true\n");
    pkgforge(temp.path())
        .args(["config", "get", "identity.user"])
        .assert()
        .success()
        .stdout("ada\n");
}

#[test]
fn config_get_unknown_key() {
    let temp = workspace("Widgets");
    pkgforge(temp.path())
        .args(["config", "get", "project.nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("project.nope"));
}

#[test]
fn config_show_is_toml() {
    let temp = workspace("Widgets");
    let out = pkgforge(temp.path())
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    let parsed: toml::Table = text.parse().unwrap();
    assert_eq!(parsed["project"]["name"].as_str(), Some("Widgets"));
}

#[test]
fn broken_defaults_file_is_a_configuration_error() {
    let temp = workspace("Widgets");
    let defaults = temp.path().join("defaults.toml");
    fs::write(&defaults, "[project\n").unwrap();

    pkgforge(temp.path())
        .args(["--defaults"])
        .arg(&defaults)
        .args(["config", "show"])
        .assert()
        .code(4);
}

#[test]
fn setup_writes_identity_file() {
    let temp = TempDir::new().unwrap();
    pkgforge(temp.path())
        .args([
            "setup",
            "--name",
            "Ada Lovelace",
            "--user",
            "ada",
            "--email",
            "ada@example.com",
            "--dir",
            "~/julia",
        ])
        .assert()
        .success();

    let identity = fs::read_to_string(temp.path().join("identity.env")).unwrap();
    assert!(identity.contains("AUTHOR_NAME=\"Ada Lovelace\""));
    assert!(identity.contains("GITHUB_USER=\"ada\""));
    assert!(identity.contains("PROJECTS_DIR=\"~/julia\""));
}

#[test]
fn setup_rejects_bad_email() {
    let temp = TempDir::new().unwrap();
    pkgforge(temp.path())
        .args([
            "setup", "--name", "Ada", "--user", "ada", "--email", "ada", "--dir", "/tmp",
        ])
        .assert()
        .code(2);
    assert!(!temp.path().join("identity.env").exists());
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    pkgforge(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pkgforge"));
}
