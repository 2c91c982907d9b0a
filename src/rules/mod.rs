//! Layered ignore-pattern model
//!
//! Global default patterns plus optional per-collection exclusions are
//! compiled into one ordered, gitignore-compatible rule set per collection.

pub mod compiler;
pub mod defaults;
pub mod overrides;

pub use compiler::{CollectionRuleSet, PatternRule, Polarity, RuleCompiler, RuleList};
pub use defaults::GLOBAL_PATTERNS;
pub use overrides::{OverrideRule, OverrideTable, BUILTIN_OVERRIDES};

/// Compile the rule set for `collection_id` from the built-in tables.
pub fn compile(collection_id: &str) -> crate::error::Result<CollectionRuleSet> {
    RuleCompiler::default().compile(collection_id)
}
