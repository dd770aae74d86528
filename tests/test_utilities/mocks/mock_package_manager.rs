use async_trait::async_trait;
use dependency_overrider::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A call received by the mock, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Refresh(PathBuf),
    Report(PathBuf),
    SetDirect {
        project_path: String,
        package_id: String,
        version: String,
    },
}

/// Mock PackageManagerGateway returning canned reports keyed by target path
///
/// Targets without a canned report fail the `report` call.
#[derive(Default, Clone)]
pub struct MockPackageManager {
    reports: HashMap<PathBuf, String>,
    failing_packages: Vec<String>,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl MockPackageManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(mut self, target: impl Into<PathBuf>, json: &str) -> Self {
        self.reports.insert(target.into(), json.to_string());
        self
    }

    pub fn with_failing_package(mut self, package_id: &str) -> Self {
        self.failing_packages.push(package_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_direct_calls(&self) -> Vec<(String, String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::SetDirect {
                    project_path,
                    package_id,
                    version,
                } => Some((project_path, package_id, version)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PackageManagerGateway for MockPackageManager {
    async fn probe(&self) -> Result<()> {
        Ok(())
    }

    async fn refresh(&self, project_path: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::Refresh(project_path.to_path_buf()));
        Ok(())
    }

    async fn report(&self, project_path: &Path) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::Report(project_path.to_path_buf()));
        self.reports
            .get(project_path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no report for {}", project_path.display()))
    }

    async fn set_direct(&self, project_path: &str, package_id: &str, version: &str) -> Result<()> {
        self.calls.lock().unwrap().push(GatewayCall::SetDirect {
            project_path: project_path.to_string(),
            package_id: package_id.to_string(),
            version: version.to_string(),
        });
        if self.failing_packages.iter().any(|p| p == package_id) {
            anyhow::bail!("error: NU1102: Unable to find package {}", package_id);
        }
        Ok(())
    }
}
