/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (package manager CLI, console).
pub mod package_manager_gateway;
pub mod progress_reporter;

pub use package_manager_gateway::PackageManagerGateway;
pub use progress_reporter::ProgressReporter;
