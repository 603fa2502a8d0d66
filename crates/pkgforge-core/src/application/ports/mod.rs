//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pkgforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template text lookup
//!   - `TemplateRenderer`: Template rendering
//!   - `ManifestReader`: Reading an existing package manifest
//!   - `ToolLocator`: `PATH` lookups
//!   - `CommandRunner`: External processes
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandRunner, CommandSpec, Filesystem, ManifestInfo, ManifestReader, TemplateRenderer,
    TemplateStore, ToolLocator,
};

#[cfg(test)]
pub use output::{
    MockCommandRunner, MockFilesystem, MockManifestReader, MockTemplateRenderer,
    MockTemplateStore, MockToolLocator,
};
