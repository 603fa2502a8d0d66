//! Generation engine - turns a resolved configuration into files.
//!
//! The engine runs after the validation gate and never aborts: every step
//! that fails is logged and recorded in the [`GenerationReport`], and the
//! run continues with the next step. Re-running is always safe:
//!
//! - files are only written when absent, unless `force` is set;
//! - shared accumulator files (`.gitignore`) are extended through
//!   [`GenerationService::append_once`], which adds a block at most once;
//! - each feature handler runs at most once per run, even when it is both
//!   enabled and pulled in by another feature.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Datelike;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        features::FeatureRegistry,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{ConfigSnapshot, DataBag, RelativePath, ResolvedConfig},
    error::{ForgeError, ForgeResult},
};

/// What the write primitive did with one output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was created.
    Written,
    /// The file existed and was replaced (`force`).
    Overwritten,
    /// The file existed and was left untouched.
    Skipped,
    /// No template resolves for the reference; nothing was written.
    NoTemplate,
}

impl WriteOutcome {
    pub fn touched(&self) -> bool {
        matches!(self, Self::Written | Self::Overwritten)
    }
}

/// One file considered during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: RelativePath,
    pub outcome: WriteOutcome,
}

/// Everything a generation run did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub project_path: PathBuf,
    pub files: Vec<FileRecord>,
    pub directories: Vec<RelativePath>,
    /// Files extended by an append-once block.
    pub appended: Vec<RelativePath>,
    /// Features whose handler ran, in execution order.
    pub features: Vec<String>,
    /// Enabled features without a registered handler.
    pub unavailable: Vec<String>,
    pub warnings: Vec<String>,
}

impl GenerationReport {
    fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            ..Self::default()
        }
    }

    pub fn written(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.outcome.touched())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileRecord> {
        self.files
            .iter()
            .filter(|f| f.outcome == WriteOutcome::Skipped)
    }

    pub fn outcome_of(&self, path: impl AsRef<Path>) -> Option<WriteOutcome> {
        self.files
            .iter()
            .rev()
            .find(|f| f.path.as_path() == path.as_ref())
            .map(|f| f.outcome)
    }

    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

/// The generation engine.
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    registry: FeatureRegistry,
    append_lock: Mutex<()>,
    year: Option<i32>,
}

impl GenerationService {
    /// Create an engine with the builtin feature registry.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            filesystem,
            templates,
            renderer,
            registry: FeatureRegistry::builtin(),
            append_lock: Mutex::new(()),
            year: None,
        }
    }

    /// Replace the feature registry.
    pub fn with_registry(mut self, registry: FeatureRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Pin the copyright year instead of reading the clock.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    /// Generate the whole project: base structure, every enabled feature,
    /// then the local `.env` override file.
    #[instrument(skip_all, fields(project = %config.snapshot().metadata().name, force))]
    pub fn generate_project(&self, config: &ResolvedConfig, force: bool) -> GenerationReport {
        let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        let ctx = GenerationContext {
            engine: self,
            config,
            root: config.project_path(),
            data: DataBag::from_config(config, year),
            force,
            report: RefCell::new(GenerationReport::new(config.project_path())),
            done: RefCell::new(BTreeSet::new()),
        };
        info!(path = %ctx.root.display(), "Generating project");

        if let Err(e) = self.filesystem.create_dir_all(&ctx.root) {
            ctx.report
                .borrow_mut()
                .warn(format!("Could not create project directory: {e}"));
            return ctx.report.into_inner();
        }

        self.generate_base_structure(&ctx);

        let enabled: Vec<String> = config
            .snapshot()
            .enabled_features()
            .map(str::to_string)
            .collect();
        for name in &enabled {
            match ctx.generate_feature(name) {
                Ok(()) => {}
                Err(ForgeError::Application(ApplicationError::FeatureUnavailable { name })) => {
                    warn!(feature = %name, "Skipping feature without a generator");
                    ctx.report.borrow_mut().unavailable.push(name);
                }
                Err(e) => ctx
                    .report
                    .borrow_mut()
                    .warn(format!("Feature '{name}' failed: {e}")),
            }
        }

        ctx.step("environment file", || {
            ctx.write("env", ".env")?;
            Ok(())
        });

        let report = ctx.report.into_inner();
        info!(
            written = report.written().count(),
            skipped = report.skipped().count(),
            warnings = report.warnings.len(),
            "Generation finished"
        );
        report
    }

    fn generate_base_structure(&self, ctx: &GenerationContext<'_>) {
        let name = ctx.snapshot().metadata().name.clone();
        let license = ctx.snapshot().metadata().license.clone();

        ctx.step("manifest", || ctx.write("base/Project.toml", "Project.toml").map(drop));
        ctx.step("module", || {
            ctx.write("base/src/Package.jl", &format!("src/{name}.jl"))
                .map(drop)
        });
        ctx.step("readme", || ctx.write("base/README.md", "README.md").map(drop));
        ctx.step("license", || {
            ctx.write(&format!("licenses/{license}"), "LICENSE").map(drop)
        });
        ctx.step("gitignore", || ctx.write("base/gitignore", ".gitignore").map(drop));
    }

    /// Render `template_ref` to `root/out` unless the file already exists.
    ///
    /// A missing template is not an error. With `force`, existing files are
    /// replaced.
    pub fn write_if_absent(
        &self,
        root: &Path,
        template_ref: &str,
        out: &RelativePath,
        data: &DataBag,
        force: bool,
    ) -> ForgeResult<WriteOutcome> {
        let Some(text) = self.templates.get(template_ref) else {
            debug!(template = template_ref, "No template, nothing to write");
            return Ok(WriteOutcome::NoTemplate);
        };

        let target = out.under(root);
        let existed = self.filesystem.exists(&target);
        if existed && !force {
            debug!(path = %out, "Exists, skipping");
            return Ok(WriteOutcome::Skipped);
        }

        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        let rendered = self.renderer.render(&text, data)?;
        self.filesystem.write_file(&target, &rendered)?;

        debug!(path = %out, overwritten = existed, "Wrote file");
        Ok(if existed {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Written
        })
    }

    /// Append `marker` followed by `body` to `root/out`, unless the file
    /// already contains `marker`. Returns whether anything was appended.
    ///
    /// Calls are serialized, so concurrent callers never both append.
    pub fn append_once(
        &self,
        root: &Path,
        out: &RelativePath,
        marker: &str,
        body: &str,
    ) -> ForgeResult<bool> {
        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned {
                resource: "append-once lock",
            })?;

        let target = out.under(root);
        let mut content = if self.filesystem.exists(&target) {
            self.filesystem.read_file(&target)?
        } else {
            String::new()
        };

        if content.contains(marker) {
            debug!(path = %out, marker, "Block already present");
            return Ok(false);
        }

        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push('\n');
        content.push_str(marker);
        content.push('\n');
        content.push_str(body);
        if !body.ends_with('\n') {
            content.push('\n');
        }

        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&target, &content)?;
        debug!(path = %out, marker, "Appended block");
        Ok(true)
    }
}

/// Per-run state handed to feature handlers.
///
/// All paths a handler passes in are relative to the project root and are
/// rejected if they would leave it.
pub struct GenerationContext<'a> {
    engine: &'a GenerationService,
    config: &'a ResolvedConfig,
    root: PathBuf,
    data: DataBag,
    force: bool,
    report: RefCell<GenerationReport>,
    done: RefCell<BTreeSet<String>>,
}

impl GenerationContext<'_> {
    pub fn config(&self) -> &ResolvedConfig {
        self.config
    }

    pub fn snapshot(&self) -> &ConfigSnapshot {
        self.config.snapshot()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data(&self) -> &DataBag {
        &self.data
    }

    pub fn force(&self) -> bool {
        self.force
    }

    /// Write-if-absent from `template_ref` to the relative path `out`.
    pub fn write(&self, template_ref: &str, out: &str) -> ForgeResult<WriteOutcome> {
        let out = RelativePath::try_new(out)?;
        let outcome =
            self.engine
                .write_if_absent(&self.root, template_ref, &out, &self.data, self.force)?;
        self.report.borrow_mut().files.push(FileRecord {
            path: out,
            outcome,
        });
        Ok(outcome)
    }

    /// Create a directory below the project root.
    pub fn create_dir(&self, dir: &str) -> ForgeResult<()> {
        let dir = RelativePath::try_new(dir)?;
        self.engine.filesystem.create_dir_all(&dir.under(&self.root))?;
        self.report.borrow_mut().directories.push(dir);
        Ok(())
    }

    /// Append-once into a shared file below the project root.
    pub fn append_once(&self, out: &str, marker: &str, body: &str) -> ForgeResult<bool> {
        let out = RelativePath::try_new(out)?;
        let appended = self.engine.append_once(&self.root, &out, marker, body)?;
        if appended {
            self.report.borrow_mut().appended.push(out);
        }
        Ok(appended)
    }

    /// Run the handler registered for `name`, at most once per run.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::FeatureUnavailable`] when no handler is
    /// registered, or the handler's own error.
    pub fn generate_feature(&self, name: &str) -> ForgeResult<()> {
        if self.done.borrow().contains(name) {
            return Ok(());
        }
        let handler = self.engine.registry.get(name).ok_or_else(|| {
            ApplicationError::FeatureUnavailable {
                name: name.to_string(),
            }
        })?;
        self.done.borrow_mut().insert(name.to_string());
        info!(feature = name, "Generating feature");
        self.report.borrow_mut().features.push(name.to_string());
        handler(self)
    }

    /// Pull in a sub-feature unless the configuration explicitly disables it.
    pub fn cascade(&self, name: &str) -> ForgeResult<()> {
        if self.snapshot().is_explicitly_disabled(name) {
            debug!(feature = name, "Sub-feature explicitly disabled");
            return Ok(());
        }
        self.generate_feature(name)
    }

    /// Write each `(template_ref, out)` pair, continuing past failures.
    pub fn write_each(&self, files: &[(&str, &str)]) {
        for &(template_ref, out) in files {
            self.step(out, || self.write(template_ref, out).map(drop));
        }
    }

    /// Run one step, recording a failure as a warning instead of stopping.
    pub fn step(&self, label: &str, f: impl FnOnce() -> ForgeResult<()>) {
        if let Err(e) = f() {
            self.report
                .borrow_mut()
                .warn(format!("Could not generate {label}: {e}"));
        }
    }
}
