//! `pkgforge init`: write a starter `pkgforge.toml`.

use pkgforge_adapters::ConfigLoader;

use crate::{
    cli::InitArgs,
    config::Sources,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, sources: &Sources, output: &OutputManager) -> CliResult<()> {
    let path = sources.loader.user_config_path();

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(&path, ConfigLoader::config_template())
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;

    output.success(&format!("Created {}", path.display()))?;
    output.print("Edit [project].name and the [features] table, then run `pkgforge generate`.")?;
    Ok(())
}
