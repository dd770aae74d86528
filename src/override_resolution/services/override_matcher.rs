use crate::override_resolution::domain::{
    DependencyReport, MutationIntent, RuleSet, TransitivePackage,
};

/// OverrideMatcher - decides which transitive packages must be pinned
///
/// Stateless: the same rule set and report always produce the same intents
/// in the same order (report order: project, framework, package).
pub struct OverrideMatcher;

impl OverrideMatcher {
    /// Evaluates a single transitive package reported under `framework` of `project_path`
    ///
    /// Returns an intent only when the package is valid, a rule exists for its
    /// id, its resolved version is one of the rule's old versions (exact string
    /// comparison) and the rule is not scoped to a different framework.
    pub fn evaluate(
        rules: &RuleSet,
        project_path: &str,
        framework: &str,
        package: &TransitivePackage,
    ) -> Option<MutationIntent> {
        if !package.is_valid() {
            return None;
        }

        let rule = rules.get(&package.id)?;
        if !rule.targets_version(&package.resolved_version) {
            return None;
        }
        if !rule.applies_to_framework(framework) {
            return None;
        }

        Some(MutationIntent {
            project_path: project_path.to_string(),
            package_id: package.id.clone(),
            old_version: package.resolved_version.clone(),
            new_version: rule.new_version().to_string(),
            reason: rule.reason().map(str::to_string),
        })
    }

    /// Walks a whole report and collects every intent in report order
    ///
    /// A report carrying problems is not trusted and yields no intents.
    pub fn collect(rules: &RuleSet, report: &DependencyReport) -> Vec<MutationIntent> {
        if report.has_problems() {
            return Vec::new();
        }

        let mut intents = Vec::new();
        for project in report.valid_projects() {
            for framework in project.frameworks.iter().filter(|f| f.has_packages()) {
                intents.extend(framework.transitive_packages.iter().filter_map(|package| {
                    Self::evaluate(rules, &project.path, &framework.framework, package)
                }));
            }
        }
        intents
    }
}
