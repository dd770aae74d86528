use serde::{Deserialize, Deserializer};

/// Package report produced by `dotnet list package --include-transitive --format json`
///
/// Only the parts needed for override decisions are modelled; unknown
/// properties (top-level packages, report version, parameters) are ignored.
/// `null` where a string or list is expected is read as empty, so that a
/// sparse entry turns into an invalid entry instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub problems: Vec<Problem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectReport>,
}

impl DependencyReport {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Projects that have a path and at least one framework entry
    pub fn valid_projects(&self) -> impl Iterator<Item = &ProjectReport> {
        self.projects.iter().filter(|p| p.is_valid())
    }
}

/// A problem reported by the package manager (restore errors, missing assets, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub project: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.level.is_empty() {
            "problem"
        } else {
            self.level.as_str()
        };
        if self.project.is_empty() {
            write!(f, "[{}] {}", level, self.text)
        } else {
            write!(f, "[{}] {}: {}", level, self.project, self.text)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frameworks: Vec<FrameworkReport>,
}

impl ProjectReport {
    pub fn is_valid(&self) -> bool {
        !self.path.is_empty() && !self.frameworks.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkReport {
    /// Target-framework moniker, e.g. `net8.0`
    #[serde(default, deserialize_with = "null_as_default")]
    pub framework: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transitive_packages: Vec<TransitivePackage>,
}

impl FrameworkReport {
    pub fn has_packages(&self) -> bool {
        !self.transitive_packages.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitivePackage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resolved_version: String,
}

impl TransitivePackage {
    pub fn new(id: impl Into<String>, resolved_version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resolved_version: resolved_version.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty() && !self.resolved_version.trim().is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
