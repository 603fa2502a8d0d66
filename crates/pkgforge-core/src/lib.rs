//! pkgforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the pkgforge
//! package scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          pkgforge-cli (CLI)             │
//! │  loads sources, prints progress/errors  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  Validation → Identity → Generation →   │
//! │               Hooks                     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem, TemplateStore, Renderer,    │
//! │ ManifestReader, ToolLocator, Runner     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    pkgforge-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ ConfigTree, Defaults, merge, snapshot,  │
//! │ validation rules, versions, data bag    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Pipeline
//!
//! ```rust,ignore
//! use pkgforge_core::prelude::*;
//!
//! let snapshot = merge(&defaults, &user, &env);
//! let report = validation.validate(&snapshot)?;           // the gate
//! let uuid = identity.resolve_uuid(&snapshot.project_path());
//! let config = snapshot.with_uuid(uuid);
//! let generated = generator.generate_project(&config, false);
//! let hooks = hooks.run(&config);
//! ```

pub mod domain;

pub mod application;

pub mod error;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FeatureRegistry, GenerationReport, GenerationService, HookReport, HookService,
        IdentityService, ValidationReport, ValidationService, WriteOutcome,
        ports::{
            CommandRunner, CommandSpec, Filesystem, ManifestInfo, ManifestReader,
            TemplateRenderer, TemplateStore, ToolLocator,
        },
    };
    pub use crate::domain::{
        ConfigSnapshot, ConfigTree, DataBag, Defaults, EnvMap, ProjectUuid, ResolvedConfig,
        ValidationError, merge,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}
