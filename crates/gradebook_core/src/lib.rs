//! Core domain logic for the gradebook service.
//! This crate is the single source of truth for academic record invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogSink};
pub use model::result::TestResult;
pub use model::student::{Student, StudentId};
pub use model::test::{Test, TestId};
pub use model::validation::ModelValidationError;
pub use repo::records_repo::{
    InMemoryRecordsRepository, RecordKey, RecordsRepository, RepoError, RepoResult,
};
pub use seed::SeedData;
pub use service::records_service::{ErrorKind, RecordsService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
