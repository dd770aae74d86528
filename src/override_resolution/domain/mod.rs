pub mod dependency_report;
pub mod mutation_intent;
pub mod override_rule;

pub use dependency_report::{
    DependencyReport, FrameworkReport, Problem, ProjectReport, TransitivePackage,
};
pub use mutation_intent::MutationIntent;
pub use override_rule::{OverrideRule, RuleSet};
