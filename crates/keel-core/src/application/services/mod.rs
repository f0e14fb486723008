//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases: "generate a file tree" and "scaffold a project
//! onto disk".

pub mod generate_service;
pub mod scaffold_service;

pub use generate_service::GenerateService;
pub use scaffold_service::ScaffoldService;
