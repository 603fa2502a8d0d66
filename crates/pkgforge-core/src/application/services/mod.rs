pub mod generation_service;
pub mod hook_service;
pub mod identity_service;
pub mod validation_service;

pub use generation_service::{
    FileRecord, GenerationContext, GenerationReport, GenerationService, WriteOutcome,
};
pub use hook_service::{HookReport, HookService};
pub use identity_service::IdentityService;
pub use validation_service::{HOSTING_TOOL, ValidationReport, ValidationService};
