//! Template renderers.

pub mod minijinja;

pub use self::minijinja::MiniJinjaRenderer;
