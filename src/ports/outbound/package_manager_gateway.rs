use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// PackageManagerGateway port for the external package manager CLI
///
/// Every operation is a blocking, stateful call against project files on
/// disk; callers must not run operations concurrently.
#[async_trait]
pub trait PackageManagerGateway: Send + Sync {
    /// Checks that the package manager can be invoked at all
    ///
    /// # Errors
    /// Returns `OverriderError::ToolMissing` if the executable cannot be started
    async fn probe(&self) -> Result<()>;

    /// Restores the project so that its lock/assets files match the manifest
    ///
    /// # Arguments
    /// * `project_path` - Path to a project or solution file
    async fn refresh(&self, project_path: &Path) -> Result<()>;

    /// Returns the raw JSON package report including transitive packages
    ///
    /// # Arguments
    /// * `project_path` - Path to a project or solution file
    async fn report(&self, project_path: &Path) -> Result<String>;

    /// Adds `package_id` at `version` as a direct dependency of `project_path`
    ///
    /// # Arguments
    /// * `project_path` - Project path as reported by the package manager
    /// * `package_id` - Package identifier
    /// * `version` - Version to pin
    async fn set_direct(&self, project_path: &str, package_id: &str, version: &str) -> Result<()>;
}
