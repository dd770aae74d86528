/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) abstract the package manager CLI and the
/// console so the use case can be exercised with in-memory fakes.
pub mod outbound;
