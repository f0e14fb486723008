//! Application layer for Keel.
//!
//! This layer contains:
//! - **Services**: use case orchestration (GenerateService, ScaffoldService)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, GenerationStage};
pub use ports::{Filesystem, TemplateStore};
pub use services::{GenerateService, ScaffoldService};
