//! Extra modules and the local development workspace.

use crate::{application::services::GenerationContext, error::ForgeResult};

/// `dev/setup.jl`, which installs the configured dev tools.
pub(super) fn dev(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write("dev/setup.jl", "dev/setup.jl")?;
    Ok(())
}

/// Structured logging module, configured at the merged minimum level.
pub(super) fn logging(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write("src/logging.jl", "src/logging.jl")?;
    Ok(())
}

/// Result type with Ok/Err and railway combinators.
pub(super) fn result(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write("src/Result.jl", "src/Result.jl")?;
    Ok(())
}
