//! Documenter.jl skeleton.

use crate::{application::services::GenerationContext, error::ForgeResult};

pub const DOCS_MARKER: &str = "# pkgforge:docs";

const DOCS_IGNORE: &str = "docs/build/\ndocs/site/\n";

pub(super) fn docs(ctx: &GenerationContext<'_>) -> ForgeResult<()> {
    ctx.write_each(&[
        ("docs/make.jl", "docs/make.jl"),
        ("docs/src/index.md", "docs/src/index.md"),
        ("docs/Project.toml", "docs/Project.toml"),
    ]);
    ctx.step(".gitignore", || {
        ctx.append_once(".gitignore", DOCS_MARKER, DOCS_IGNORE).map(drop)
    });
    Ok(())
}
