//! GitHub Actions workflows.
//!
//! CI pulls in the release tagging and compat-bump workflows unless the
//! configuration sets them to `false` explicitly.

use crate::{application::services::GenerationContext, error::ForgeResult};

pub(super) fn ci(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write_each(&[("github/workflows/CI.yml", ".github/workflows/CI.yml")]);
    ctx.step("tagbot", || ctx.cascade("tagbot"));
    ctx.cascade("compathelper")
}

pub(super) fn tagbot(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write("github/workflows/TagBot.yml", ".github/workflows/TagBot.yml")?;
    Ok(())
}

pub(super) fn compathelper(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write(
        "github/workflows/CompatHelper.yml",
        ".github/workflows/CompatHelper.yml",
    )?;
    Ok(())
}
