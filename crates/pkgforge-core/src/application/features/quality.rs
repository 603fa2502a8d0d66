//! Test suite, formatter and benchmark scaffolding.

use crate::{application::services::GenerationContext, error::ForgeResult};

/// `test/runtests.jl` and the test environment.
pub(super) fn tests(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write_each(&[
        ("test/runtests.jl", "test/runtests.jl"),
        ("test/Project.toml", "test/Project.toml"),
    ]);
    Ok(())
}

/// `.JuliaFormatter.toml` from the merged formatter preferences.
pub(super) fn formatter(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write("formatter/JuliaFormatter.toml", ".JuliaFormatter.toml")?;
    Ok(())
}

/// BenchmarkTools suite and its environment.
pub(super) fn benchmark(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write_each(&[
        ("benchmark/benchmarks.jl", "benchmark/benchmarks.jl"),
        ("benchmark/Project.toml", "benchmark/Project.toml"),
    ]);
    Ok(())
}
