//! `pkgforge generate`: the full pipeline.
//!
//! Sequence: load and merge sources, validate (the only step that can stop
//! the run), resolve the package UUID, generate files, run hooks.

use serde::Serialize;
use tracing::{info, instrument};

use pkgforge_adapters::{
    LayeredStore, LocalFilesystem, MiniJinjaRenderer, PathToolLocator, ProcessCommandRunner,
    TomlManifestReader,
};
use pkgforge_core::application::{
    GenerationReport, GenerationService, HookReport, HookService, IdentityService,
    ValidationService, WriteOutcome,
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::Sources,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(force = args.force, no_hooks = args.no_hooks))]
pub fn execute(args: GenerateArgs, sources: &Sources, output: &OutputManager) -> CliResult<()> {
    let snapshot = sources.load()?;

    let validation = ValidationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(PathToolLocator::new()),
    );
    let checked = validation.validate(&snapshot)?;

    let identity = IdentityService::new(Box::new(TomlManifestReader::new()));
    let config = snapshot.with_uuid(identity.resolve_uuid(&snapshot.project_path()));
    let name = &snapshot.metadata().name;

    let engine = GenerationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(LayeredStore::discover(args.templates)?),
        Box::new(MiniJinjaRenderer::new()),
    );

    output.header(&format!(
        "Generating {name}.jl in {}",
        config.project_path().display()
    ))?;
    for warning in &checked.warnings {
        output.warning(warning)?;
    }

    let report = engine.generate_project(&config, args.force);

    let hooks = if args.no_hooks {
        info!("Hooks disabled");
        None
    } else {
        let runner = HookService::new(
            Box::new(ProcessCommandRunner::new()),
            Box::new(LocalFilesystem::new()),
        );
        Some(runner.run(&config))
    };

    if output.format() == OutputFormat::Json {
        return output.json(&Summary::new(config.uuid().as_str(), &report, hooks.as_ref()));
    }

    print_report(&report, output)?;
    if let Some(hooks) = &hooks {
        for command in &hooks.executed {
            output.info(&format!("ran {command}"))?;
        }
        for warning in &hooks.warnings {
            output.warning(warning)?;
        }
    }

    output.print("")?;
    output.success(&format!(
        "{name}.jl ready ({} written, {} kept)",
        report.written().count(),
        report.skipped().count()
    ))?;
    if !output.is_quiet() {
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", config.project_path().display()))?;
        output.print("  julia --project -e 'using Pkg; Pkg.test()'")?;
    }
    Ok(())
}

fn print_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    for dir in &report.directories {
        output.success(&format!("created {dir}/"))?;
    }
    for file in &report.files {
        match file.outcome {
            WriteOutcome::Written => output.success(&format!("created {}", file.path))?,
            WriteOutcome::Overwritten => output.success(&format!("overwrote {}", file.path))?,
            WriteOutcome::Skipped => output.skipped(&format!("kept {} (exists)", file.path))?,
            WriteOutcome::NoTemplate => {}
        }
    }
    for path in &report.appended {
        output.success(&format!("extended {path}"))?;
    }
    for name in &report.unavailable {
        output.warning(&format!("feature '{name}' is enabled but pkgforge has no generator for it"))?;
    }
    for warning in &report.warnings {
        output.warning(warning)?;
    }
    Ok(())
}

/// `--output-format json` result.
#[derive(Debug, Serialize)]
struct Summary {
    project_path: String,
    uuid: String,
    written: Vec<String>,
    kept: Vec<String>,
    appended: Vec<String>,
    features: Vec<String>,
    unavailable: Vec<String>,
    warnings: Vec<String>,
    hooks: Option<HookSummary>,
}

#[derive(Debug, Serialize)]
struct HookSummary {
    executed: Vec<String>,
    warnings: Vec<String>,
}

impl Summary {
    fn new(uuid: &str, report: &GenerationReport, hooks: Option<&HookReport>) -> Self {
        Self {
            project_path: report.project_path.display().to_string(),
            uuid: uuid.to_string(),
            written: report.written().map(|f| f.path.to_string()).collect(),
            kept: report.skipped().map(|f| f.path.to_string()).collect(),
            appended: report.appended.iter().map(ToString::to_string).collect(),
            features: report.features.clone(),
            unavailable: report.unavailable.clone(),
            warnings: report.warnings.clone(),
            hooks: hooks.map(|h| HookSummary {
                executed: h.executed.clone(),
                warnings: h.warnings.clone(),
            }),
        }
    }
}
