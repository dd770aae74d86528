//! dependency-overrider - pin known-problematic transitive NuGet packages
//!
//! For every configured .NET project the tool restores the project, asks
//! `dotnet list package --include-transitive` for the resolved package graph
//! and, when a transitive package resolves to a version listed in an
//! override rule, adds that package as a direct dependency at the rule's
//! version with `dotnet add package`.
//!
//! # Architecture
//!
//! - **Domain Layer** (`override_resolution`): override rules, the package report model and the matcher
//! - **Application Layer** (`application`): the resolution use case and its DTOs
//! - **Ports** (`ports`): interfaces for the package manager and the console
//! - **Adapters** (`adapters`): the `dotnet` CLI and console implementations
//! - **Shared** (`shared`): error types and the Result alias
//!
//! # Example
//!
//! ```no_run
//! use dependency_overrider::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let gateway = DotnetCli::new();
//! gateway.probe().await?;
//!
//! let config = load_config(Path::new("config.json"))?;
//! let use_case = ResolveOverridesUseCase::new(config, gateway, ConsoleProgressReporter::new());
//!
//! let summary = use_case.execute(ResolutionRequest::new(false, false)).await;
//! println!("{} direct dependencies added", summary.applied().count());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod override_resolution;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::ConsoleProgressReporter;
    pub use crate::adapters::outbound::dotnet::DotnetCli;
    pub use crate::application::dto::{
        RefreshStatus, ResolutionRequest, RunSummary, TargetOutcome, TargetReport,
    };
    pub use crate::application::use_cases::ResolveOverridesUseCase;
    pub use crate::config::{load_config, parse_config, OverrideConfig};
    pub use crate::override_resolution::domain::{
        DependencyReport, FrameworkReport, MutationIntent, OverrideRule, Problem, ProjectReport,
        RuleSet, TransitivePackage,
    };
    pub use crate::override_resolution::services::OverrideMatcher;
    pub use crate::ports::outbound::{PackageManagerGateway, ProgressReporter};
    pub use crate::shared::error::{ExitCode, OverriderError};
    pub use crate::shared::Result;
}
