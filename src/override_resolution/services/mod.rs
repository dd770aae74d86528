mod override_matcher;

pub use override_matcher::OverrideMatcher;
