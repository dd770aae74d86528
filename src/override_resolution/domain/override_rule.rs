use std::collections::{BTreeSet, HashMap};

/// OverrideRule value object
///
/// Maps a set of known-problematic resolved versions of a package to the
/// version that should be forced as a direct dependency. Rules are loaded
/// as-is from configuration; `is_valid` decides whether they take part in
/// matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    package_id: String,
    old_versions: BTreeSet<String>,
    new_version: String,
    framework: Option<String>,
    reason: Option<String>,
}

impl OverrideRule {
    pub fn new<I, S>(
        package_id: impl Into<String>,
        old_versions: I,
        new_version: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            package_id: package_id.into(),
            old_versions: old_versions
                .into_iter()
                .map(Into::into)
                .filter(|v: &String| !v.trim().is_empty())
                .collect(),
            new_version: new_version.into(),
            framework: None,
            reason: None,
        }
    }

    /// Restricts the rule to a single target-framework moniker
    pub fn with_framework(mut self, framework: Option<String>) -> Self {
        self.framework = framework;
        self
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn old_versions(&self) -> &BTreeSet<String> {
        &self.old_versions
    }

    pub fn new_version(&self) -> &str {
        &self.new_version
    }

    pub fn framework(&self) -> Option<&str> {
        self.framework.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// A rule is usable only with a package id, a target version and at least one old version.
    ///
    /// Whitespace-only identifiers count as empty. Blank old versions are
    /// dropped on construction.
    pub fn is_valid(&self) -> bool {
        !self.package_id.trim().is_empty()
            && !self.new_version.trim().is_empty()
            && !self.old_versions.is_empty()
    }

    /// Exact, case-sensitive membership test against the old version set
    pub fn targets_version(&self, resolved_version: &str) -> bool {
        self.old_versions.contains(resolved_version)
    }

    /// True when the rule has no framework qualifier or the qualifier equals `framework`
    pub fn applies_to_framework(&self, framework: &str) -> bool {
        match self.framework.as_deref() {
            Some(scoped) => scoped == framework,
            None => true,
        }
    }
}

/// RuleSet - the active override rules keyed by package id
///
/// Built once per run from the configured rules. Invalid rules are dropped
/// and, when several rules share a package id, the one defined last wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<String, OverrideRule>,
    discarded: usize,
    superseded: Vec<String>,
}

impl RuleSet {
    pub fn from_rules<'a, I>(rules: I) -> Self
    where
        I: IntoIterator<Item = &'a OverrideRule>,
    {
        let mut set = Self::default();
        for rule in rules {
            if !rule.is_valid() {
                set.discarded += 1;
                continue;
            }
            if set
                .rules
                .insert(rule.package_id.clone(), rule.clone())
                .is_some()
            {
                set.superseded.push(rule.package_id.clone());
            }
        }
        set
    }

    pub fn get(&self, package_id: &str) -> Option<&OverrideRule> {
        self.rules.get(package_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of configured rules dropped because they were invalid
    pub fn discarded_count(&self) -> usize {
        self.discarded
    }

    /// Package ids whose earlier definitions were replaced by a later rule
    pub fn superseded(&self) -> &[String] {
        &self.superseded
    }
}
