/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod resolution_request;
mod run_summary;

pub use resolution_request::ResolutionRequest;
pub use run_summary::{RefreshStatus, RunSummary, TargetOutcome, TargetReport};
