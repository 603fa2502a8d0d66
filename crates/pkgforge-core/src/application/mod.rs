//! Application layer for pkgforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (validation gate, identity,
//!   generation engine, post-generation hooks)
//! - **Features**: The open registry of per-feature generators
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer drives the domain layer; rules and the merge
//! itself live in `crate::domain`.

pub mod error;
pub mod features;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    FileRecord, GenerationContext, GenerationReport, GenerationService, HookReport, HookService,
    IdentityService, ValidationReport, ValidationService, WriteOutcome,
};

pub use features::{DOCS_MARKER, FeatureHandler, FeatureRegistry, SCIENTIFIC_MARKER};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandRunner, CommandSpec, Filesystem, ManifestInfo, ManifestReader, TemplateRenderer,
    TemplateStore, ToolLocator,
};

pub use error::ApplicationError;
