//! Per-collection exclude rules.
//!
//! Adding exclusions for a collection is a data change: append an entry to
//! [`BUILTIN_OVERRIDES`] or list it under `[overrides]` in the config file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One collection-specific exclusion and why it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub pattern: String,
    #[serde(default)]
    pub reason: String,
}

impl OverrideRule {
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), reason: reason.into() }
    }
}

/// Built-in exclusions keyed by collection id: `(id, [(pattern, reason)])`.
pub const BUILTIN_OVERRIDES: &[(&str, &[(&str, &str)])] = &[
    (
        "next.js",
        &[
            ("examples/", "hundreds of near-identical starter apps"),
            ("test/", "integration fixtures dwarf the framework source"),
            ("packages/next/src/compiled/", "vendored pre-bundled dependencies"),
        ],
    ),
    (
        "vercel-ai",
        &[
            ("packages/vue/", "Vue bindings are outside the target framework"),
            ("packages/svelte/", "Svelte bindings are outside the target framework"),
            ("examples/", "example apps duplicate package usage"),
        ],
    ),
    (
        "react",
        &[
            ("fixtures/", "manual test harnesses"),
            ("scripts/bench/", "benchmark corpora"),
            ("packages/react-devtools-shell/", "devtools test shell"),
        ],
    ),
];

/// Lookup from collection id to its immutable list of exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, Vec<OverrideRule>>,
}

impl OverrideTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (id, rules) in BUILTIN_OVERRIDES {
            table.extend(
                id,
                rules.iter().map(|(pattern, reason)| OverrideRule::new(*pattern, *reason)),
            );
        }
        table
    }

    /// Append rules for `id` after any it already has.
    pub fn extend<I>(&mut self, id: &str, rules: I)
    where
        I: IntoIterator<Item = OverrideRule>,
    {
        self.entries.entry(id.to_string()).or_default().extend(rules);
    }

    /// Rules for `id`; unknown ids have none.
    pub fn get(&self, id: &str) -> &[OverrideRule] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_has_no_rules() {
        let table = OverrideTable::builtin();
        assert!(table.get("no-such-collection").is_empty());
    }

    #[test]
    fn builtin_entries_keep_declared_order() {
        let table = OverrideTable::builtin();
        let patterns: Vec<&str> =
            table.get("vercel-ai").iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["packages/vue/", "packages/svelte/", "examples/"]);
    }

    #[test]
    fn extend_appends_after_existing_rules() {
        let mut table = OverrideTable::builtin();
        table.extend("react", vec![OverrideRule::new("compiler/", "experimental")]);
        let rules = table.get("react");
        assert_eq!(rules.last().map(|r| r.pattern.as_str()), Some("compiler/"));
        assert_eq!(rules.len(), 4);
    }
}
