use crate::override_resolution::domain::MutationIntent;
use std::path::PathBuf;

/// What happened to the refresh step of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// `--no-restore` was given
    Skipped,
    Succeeded,
    /// Logged and ignored; the report step still ran
    Failed,
}

/// Final state of a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The package report could not be obtained or parsed
    SkippedReport,
    /// The package manager reported problems; no package was inspected
    SkippedProblems { problem_count: usize },
    /// The report was walked. In a dry run `applied` holds the planned intents.
    Walked {
        applied: Vec<MutationIntent>,
        failed: Vec<MutationIntent>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub path: PathBuf,
    pub refresh: RefreshStatus,
    pub outcome: TargetOutcome,
}

impl TargetReport {
    pub fn is_skipped(&self) -> bool {
        !matches!(self.outcome, TargetOutcome::Walked { .. })
    }
}

/// RunSummary - result of one override resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// No valid override rule was configured, so no target was touched
    pub nothing_to_do: bool,
    /// The run was interrupted before every target was processed
    pub cancelled: bool,
    pub dry_run: bool,
    /// Processed targets, in processing order
    pub targets: Vec<TargetReport>,
}

impl RunSummary {
    pub fn nothing_to_do() -> Self {
        Self {
            nothing_to_do: true,
            ..Self::default()
        }
    }

    pub fn walked_count(&self) -> usize {
        self.targets.iter().filter(|t| !t.is_skipped()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_skipped()).count()
    }

    /// Intents that were applied (or planned, in a dry run), in order
    pub fn applied(&self) -> impl Iterator<Item = &MutationIntent> {
        self.targets.iter().flat_map(|t| {
            let intents: &[MutationIntent] = match &t.outcome {
                TargetOutcome::Walked { applied, .. } => applied,
                _ => &[],
            };
            intents
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = &MutationIntent> {
        self.targets.iter().flat_map(|t| {
            let intents: &[MutationIntent] = match &t.outcome {
                TargetOutcome::Walked { failed, .. } => failed,
                _ => &[],
            };
            intents
        })
    }
}
