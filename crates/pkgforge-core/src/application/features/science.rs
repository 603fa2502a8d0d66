//! Research project layout.

use crate::{application::services::GenerationContext, error::ForgeResult};

pub const SCIENTIFIC_MARKER: &str = "# pkgforge:scientific";

const SCIENTIFIC_IGNORE: &str = "data/raw/\nresults/\n*.jld2\n";

const RESEARCH_DIRS: [&str; 3] = ["data", "scripts", "results"];

/// `data/`, `scripts/`, `results/` plus an analysis script. Implies
/// notebooks.
pub(super) fn scientific(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    for dir in RESEARCH_DIRS {
        ctx.step(dir, || ctx.create_dir(dir));
    }
    ctx.write_each(&[("scripts/analysis.jl", "scripts/analysis.jl")]);
    ctx.step(".gitignore", || {
        ctx.append_once(".gitignore", SCIENTIFIC_MARKER, SCIENTIFIC_IGNORE).map(drop)
    });
    ctx.cascade("notebooks")
}

/// Pluto notebook stub.
pub(super) fn notebooks(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write("notebooks/analysis.jl", "notebooks/analysis.jl")?;
    Ok(())
}
