/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the override resolution domain and coordinates
/// with the package manager and the console through ports.
pub mod dto;
pub mod use_cases;
