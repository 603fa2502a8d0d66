//! Template stores.
//!
//! Templates are addressed by slash-separated references such as
//! `docs/make.jl`. The builtin set is compiled into the binary; a directory
//! named by `--templates` or `PKGFORGE_TEMPLATES_DIR` can override any of
//! them file by file.

pub mod builtin;
pub mod directory;
pub mod layered;

pub use builtin::BuiltinStore;
pub use directory::DirectoryStore;
pub use layered::{LayeredStore, TEMPLATES_DIR_ENV};
