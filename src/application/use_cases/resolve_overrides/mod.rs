use crate::application::dto::{
    RefreshStatus, ResolutionRequest, RunSummary, TargetOutcome, TargetReport,
};
use crate::config::OverrideConfig;
use crate::override_resolution::domain::{DependencyReport, RuleSet};
use crate::override_resolution::services::OverrideMatcher;
use crate::ports::outbound::{PackageManagerGateway, ProgressReporter};
use crate::shared::error::OverriderError;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;


/// ResolveOverridesUseCase - applies override rules to every configured target
///
/// Targets are processed one at a time, in configuration order: optional
/// restore, package listing, then one `set_direct` call per matching
/// transitive package. Failures of a single target or a single package are
/// reported and the run moves on; the use case itself never fails.
///
/// # Type Parameters
/// * `G` - PackageManagerGateway implementation
/// * `PR` - ProgressReporter implementation
pub struct ResolveOverridesUseCase<G, PR> {
    config: OverrideConfig,
    gateway: G,
    progress_reporter: PR,
    cancel_flag: Arc<AtomicBool>,
}

impl<G, PR> ResolveOverridesUseCase<G, PR>
where
    G: PackageManagerGateway,
    PR: ProgressReporter,
{
    /// Creates a new ResolveOverridesUseCase with injected dependencies
    pub fn new(config: OverrideConfig, gateway: G, progress_reporter: PR) -> Self {
        Self {
            config,
            gateway,
            progress_reporter,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares a flag that, once set, stops the run before the next target
    pub fn with_cancel_flag(mut self, cancel_flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = cancel_flag;
        self
    }

    /// Executes the override resolution use case
    ///
    /// # Arguments
    /// * `request` - Per-run options (skip refresh, dry run)
    ///
    /// # Returns
    /// RunSummary describing what happened to every processed target
    pub async fn execute(&self, request: ResolutionRequest) -> RunSummary {
        self.warn_unknown_fields();

        // Step 1: Build the active rule set
        let rules = self.build_rule_set();
        if rules.is_empty() {
            self.progress_reporter
                .report("ℹ️  Config contains no valid overrides. Nothing to do.");
            return RunSummary::nothing_to_do();
        }

        let targets = self.config.target_paths();
        self.progress_reporter.report(&format!(
            "📋 Loaded {} override rule(s) for {} target(s)",
            rules.len(),
            targets.len()
        ));

        let mut summary = RunSummary {
            dry_run: request.dry_run,
            ..RunSummary::default()
        };

        // Step 2: Process targets strictly in order
        for (index, target) in targets.iter().enumerate() {
            if self.cancel_flag.load(Ordering::SeqCst) {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Cancelled: {} target(s) were not processed.",
                    targets.len() - index
                ));
                summary.cancelled = true;
                break;
            }

            let label = target.display().to_string();
            self.progress_reporter
                .report_progress(index, targets.len(), Some(&label));
            let target_report = self.process_target(target, &rules, &request).await;
            summary.targets.push(target_report);
        }

        // Step 3: Summarise
        self.progress_reporter
            .report_completion(&Self::completion_message(&summary));
        summary
    }

    /// Filters out invalid rules and reports what was dropped or replaced
    fn build_rule_set(&self) -> RuleSet {
        let rules = RuleSet::from_rules(&self.config.rules);

        if rules.discarded_count() > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Ignoring {} invalid override(s). \
                 Each override needs a packageId, at least one oldVersion and a newVersion.",
                rules.discarded_count()
            ));
        }
        for package_id in rules.superseded() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Multiple overrides for '{}'; the last one is used.",
                package_id
            ));
        }
        rules
    }

    fn warn_unknown_fields(&self) {
        for key in &self.config.unknown_fields {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Unknown config field '{}' will be ignored.",
                key
            ));
        }
    }

    async fn process_target(
        &self,
        target: &Path,
        rules: &RuleSet,
        request: &ResolutionRequest,
    ) -> TargetReport {
        debug!(target = %target.display(), "processing target");
        self.progress_reporter
            .report(&format!("📦 Processing {}", target.display()));

        let refresh = self.refresh_if_requested(target, request).await;

        let outcome = match self.read_report(target).await {
            None => TargetOutcome::SkippedReport,
            Some(report) if report.has_problems() => {
                for problem in &report.problems {
                    self.progress_reporter
                        .report_error(&format!("❌ Problem occurred: {}", problem));
                }
                self.progress_reporter.report_error(&format!(
                    "   Skipping {} because the package report has problems.",
                    target.display()
                ));
                TargetOutcome::SkippedProblems {
                    problem_count: report.problems.len(),
                }
            }
            Some(report) => self.apply_overrides(rules, &report, request.dry_run).await,
        };

        TargetReport {
            path: target.to_path_buf(),
            refresh,
            outcome,
        }
    }

    /// Restores the target unless asked not to; a failed restore is only a warning
    async fn refresh_if_requested(
        &self,
        target: &Path,
        request: &ResolutionRequest,
    ) -> RefreshStatus {
        if request.skip_refresh {
            return RefreshStatus::Skipped;
        }

        match self.gateway.refresh(target).await {
            Ok(()) => RefreshStatus::Succeeded,
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Restore failed for {}; listing packages anyway.\n   {}",
                    target.display(),
                    e
                ));
                RefreshStatus::Failed
            }
        }
    }

    /// Lists packages and parses the report; `None` means the target is skipped
    async fn read_report(&self, target: &Path) -> Option<DependencyReport> {
        let raw = match self.gateway.report(target).await {
            Ok(raw) => raw,
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "❌ Failed to list packages for {}. Skipping...\n   {}",
                    target.display(),
                    e
                ));
                return None;
            }
        };

        match DependencyReport::from_json(&raw) {
            Ok(report) => Some(report),
            Err(e) => {
                let error = OverriderError::ReportParseError {
                    project: target.display().to_string(),
                    details: e.to_string(),
                };
                self.progress_reporter
                    .report_error(&format!("❌ {}\n   Skipping...", error));
                None
            }
        }
    }

    async fn apply_overrides(
        &self,
        rules: &RuleSet,
        report: &DependencyReport,
        dry_run: bool,
    ) -> TargetOutcome {
        let mut applied = Vec::new();
        let mut failed = Vec::new();

        for intent in OverrideMatcher::collect(rules, report) {
            if dry_run {
                self.progress_reporter
                    .report(&format!("🔎 Would add a {}", intent));
                applied.push(intent);
                continue;
            }

            match self
                .gateway
                .set_direct(&intent.project_path, &intent.package_id, &intent.new_version)
                .await
            {
                Ok(()) => {
                    self.progress_reporter
                        .report(&format!("✅ Added a {}", intent));
                    applied.push(intent);
                }
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "❌ Failed to add a {}\n   {}",
                        intent,
                        e
                    ));
                    failed.push(intent);
                }
            }
        }

        TargetOutcome::Walked { applied, failed }
    }

    fn completion_message(summary: &RunSummary) -> String {
        let verb = if summary.dry_run {
            "would be added"
        } else {
            "added"
        };
        let applied = summary.applied().count();
        let noun = if applied == 1 {
            "dependency"
        } else {
            "dependencies"
        };
        let mut message = format!(
            "Done: {} target(s) processed, {} skipped. {} direct {} {}",
            summary.targets.len(),
            summary.skipped_count(),
            applied,
            noun,
            verb
        );
        let failed = summary.failed().count();
        if failed > 0 {
            message.push_str(&format!(", {} failed", failed));
        }
        message.push('.');
        message
    }
}
