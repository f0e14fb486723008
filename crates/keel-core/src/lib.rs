//! Keel Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Keel
//! project scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            keel-cli (CLI)               │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerateService, ScaffoldService)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: TemplateStore, Fs)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     keel-adapters (Infrastructure)      │
//! │  (InMemoryStore, LocalFilesystem, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (ProjectOptions, templates, upgrade)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keel_core::{
//!     application::GenerateService,
//!     domain::{DatabaseProvider, ProjectOptions},
//! };
//!
//! // 1. Describe the request
//! let options = ProjectOptions::builder("my-service")
//!     .database(DatabaseProvider::Postgres)
//!     .container(true)
//!     .build()
//!     .unwrap();
//!
//! // 2. Use the application service (with an injected store adapter)
//! let service = GenerateService::new(store);
//! let project = service.generate(&options).unwrap();
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Version comparer for the upgrade workflow
pub mod upgrade;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Filesystem, GenerateService, ScaffoldService, TemplateStore,
    };
    pub use crate::domain::{
        Architecture, DatabaseProvider, FeatureToggles, GeneratedFile, GeneratedProject,
        GenerationPlan, ProjectKind, ProjectOptions, TemplateId,
    };
    pub use crate::error::{KeelError, KeelResult};
    pub use crate::upgrade::{
        PackageVersionMap, UpgradeReport, VersionDiff, compare_versions, diff, parse_manifest,
    };
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
