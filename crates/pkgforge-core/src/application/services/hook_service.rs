//! Post-generation side effects.
//!
//! Version control, dependency installation and remote repository creation
//! all shell out to external tools. Each command is tried once; a failure
//! becomes a warning and the remaining steps still run.

use tracing::{info, instrument, warn};

use crate::{
    application::ports::{CommandRunner, CommandSpec, Filesystem},
    domain::ResolvedConfig,
};

const INSTANTIATE: &str = "using Pkg; Pkg.instantiate()";
const DOCS_INSTANTIATE: &str =
    "using Pkg; Pkg.develop(PackageSpec(path=pwd())); Pkg.instantiate()";

/// Commands that ran and the warnings of those that did not succeed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookReport {
    pub executed: Vec<String>,
    pub warnings: Vec<String>,
}

pub struct HookService {
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
}

impl HookService {
    pub fn new(runner: Box<dyn CommandRunner>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { runner, filesystem }
    }

    /// Run every applicable hook inside the generated project.
    #[instrument(skip_all, fields(project = %config.snapshot().metadata().name))]
    pub fn run(&self, config: &ResolvedConfig) -> HookReport {
        let snapshot = config.snapshot();
        let m = snapshot.metadata();
        let root = config.project_path();
        let mut report = HookReport::default();

        let exec = |spec: CommandSpec, report: &mut HookReport| -> bool {
            let shown = spec.to_string();
            match self.runner.run(&spec, &root) {
                Ok(()) => {
                    info!(command = %shown, "Hook succeeded");
                    report.executed.push(shown);
                    true
                }
                Err(e) => {
                    let message = format!("`{shown}` failed: {e}");
                    warn!("{message}");
                    report.warnings.push(message);
                    false
                }
            }
        };

        if !self.filesystem.exists(&root.join(".git")) {
            let branch = m.default_branch.as_str();
            if exec(CommandSpec::new("git", ["init", "-b", branch]), &mut report) {
                exec(CommandSpec::new("git", ["add", "-A"]), &mut report);
                exec(
                    CommandSpec::new("git", ["commit", "-m", "Initial commit"]),
                    &mut report,
                );
            }
        }

        exec(
            CommandSpec::new("julia", ["--project=.", "-e", INSTANTIATE]),
            &mut report,
        );

        if snapshot.is_enabled("docs") {
            exec(
                CommandSpec::new("julia", ["--project=docs", "-e", DOCS_INSTANTIATE]),
                &mut report,
            );
        }
        if snapshot.is_enabled("dev") && snapshot.dev().auto_setup {
            exec(CommandSpec::new("julia", ["dev/setup.jl"]), &mut report);
        }

        let hosting = snapshot.hosting();
        if hosting.create_repo {
            let repo = format!("{}/{}.jl", m.account, m.name);
            let visibility = if hosting.private {
                "--private"
            } else {
                "--public"
            };
            let created = exec(
                CommandSpec::new(
                    "gh",
                    [
                        "repo",
                        "create",
                        repo.as_str(),
                        visibility,
                        "--source",
                        ".",
                        "--remote",
                        "origin",
                    ],
                ),
                &mut report,
            );
            if created && hosting.auto_push {
                exec(
                    CommandSpec::new("git", ["push", "-u", "origin", m.default_branch.as_str()]),
                    &mut report,
                );
            }
        }

        report
    }
}
