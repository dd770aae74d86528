/// ResolutionRequest - per-run options for the override resolution use case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Skip the package restore that normally precedes listing packages
    pub skip_refresh: bool,
    /// Log what would be added without asking the package manager to change anything
    pub dry_run: bool,
}

impl ResolutionRequest {
    pub fn new(skip_refresh: bool, dry_run: bool) -> Self {
        Self {
            skip_refresh,
            dry_run,
        }
    }
}
