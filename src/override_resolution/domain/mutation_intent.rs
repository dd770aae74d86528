use std::fmt;

/// MutationIntent - a decision to add a package as a direct dependency
///
/// Carries everything the package manager needs to pin the package
/// (`project_path`, `package_id`, `new_version`) plus the overridden
/// version and the rule's reason for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationIntent {
    pub project_path: String,
    pub package_id: String,
    pub old_version: String,
    pub new_version: String,
    pub reason: Option<String>,
}

impl fmt::Display for MutationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "direct dependency to {} for {}:{} overriding {}",
            self.project_path, self.package_id, self.new_version, self.old_version
        )?;
        if let Some(reason) = &self.reason {
            write!(f, " (reason: {})", reason)?;
        }
        Ok(())
    }
}
