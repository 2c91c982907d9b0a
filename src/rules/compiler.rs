//! Compile global and per-collection patterns into one gitignore matcher.

use super::defaults::GLOBAL_PATTERNS;
use super::overrides::{OverrideRule, OverrideTable};
use crate::error::{PlanError, Result};
use crate::utils::normalize_path;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Plain line: matching paths are excluded.
    Exclude,
    /// `!` line: matching paths are re-included.
    Include,
}

/// One gitignore-style line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pattern: String,
    polarity: Polarity,
}

impl PatternRule {
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), polarity: Polarity::Exclude }
    }

    pub fn include(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), polarity: Polarity::Include }
    }

    /// Parse a line, treating a leading `!` as negation.
    pub fn parse(line: &str) -> Self {
        match line.strip_prefix('!') {
            Some(rest) => Self::include(rest),
            None => Self::exclude(line),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Directory-only rules end with `/`.
    pub fn is_dir_only(&self) -> bool {
        self.pattern.ends_with('/')
    }

    /// Render so the rule applies at any depth, keeping `!` as the first
    /// character of negated lines.
    pub fn any_depth_line(&self) -> String {
        let body = if self.pattern.starts_with("**/") || self.pattern.starts_with('/') {
            self.pattern.clone()
        } else {
            format!("**/{}", self.pattern)
        };
        match self.polarity {
            Polarity::Exclude => body,
            Polarity::Include => format!("!{}", body),
        }
    }
}

/// Ordered list of rules. When several rules match a path, the one declared
/// last decides the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList {
    rules: Vec<PatternRule>,
}

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        lines.iter().map(|line| PatternRule::parse(line)).collect()
    }

    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<PatternRule> for RuleList {
    fn from_iter<I: IntoIterator<Item = PatternRule>>(iter: I) -> Self {
        Self { rules: iter.into_iter().collect() }
    }
}

/// Global rules followed by one collection's exclusions, compiled once.
#[derive(Debug, Clone)]
pub struct CollectionRuleSet {
    collection_id: String,
    global: RuleList,
    collection: Vec<OverrideRule>,
    matcher: Gitignore,
}

impl CollectionRuleSet {
    /// Build a rule set from explicit parts.
    ///
    /// Collection rules may only exclude; a negated collection rule is
    /// rejected.
    pub fn from_rules(
        collection_id: &str,
        global: RuleList,
        collection: Vec<OverrideRule>,
    ) -> Result<Self> {
        if let Some(bad) = collection.iter().find(|r| r.pattern.trim_start().starts_with('!')) {
            return Err(PlanError::InvalidPattern {
                pattern: bad.pattern.clone(),
                message: "collection rules may only exclude paths".to_string(),
            });
        }

        let mut builder = GitignoreBuilder::new(".");
        let lines = global
            .iter()
            .map(PatternRule::any_depth_line)
            .chain(collection.iter().map(|r| r.pattern.clone()));
        for line in lines {
            builder.add_line(None, &line).map_err(|e| PlanError::InvalidPattern {
                pattern: line.clone(),
                message: e.to_string(),
            })?;
        }
        let matcher = builder.build().map_err(|e| PlanError::InvalidPattern {
            pattern: collection_id.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { collection_id: collection_id.to_string(), global, collection, matcher })
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn global_rules(&self) -> &RuleList {
        &self.global
    }

    pub fn collection_rules(&self) -> &[OverrideRule] {
        &self.collection
    }

    /// Verdict for this entry alone, assuming its parent directories are
    /// already known to be included. `rel_path` must be `/`-separated.
    ///
    /// Directories are matched as directories, so trailing-`/` rules apply.
    pub fn excludes_entry(&self, rel_path: &str, is_dir: bool) -> bool {
        self.matcher.matched(Path::new(rel_path), is_dir).is_ignore()
    }

    /// Whether `path` is excluded, applying git's rule that nothing below an
    /// excluded directory can be re-included. Either separator is accepted,
    /// and a trailing separator marks the path as a directory.
    pub fn is_excluded(&self, path: &str, is_dir: bool) -> bool {
        let normalized = normalize_path(path);
        let is_dir = is_dir || normalized.ends_with('/');
        let components: Vec<&str> = normalized.split('/').filter(|c| !c.is_empty()).collect();
        if components.is_empty() {
            return false;
        }

        let mut prefix = String::new();
        for (idx, component) in components.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(component);
            let last = idx + 1 == components.len();
            if self.excludes_entry(&prefix, if last { is_dir } else { true }) {
                return true;
            }
        }
        false
    }

    /// Render as gitignore text for the external indexer's ignore file.
    ///
    /// Global rules come first, prefixed with `**/`; collection rules follow
    /// verbatim under a comment header.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in self.global.iter() {
            out.push_str(&rule.any_depth_line());
            out.push('\n');
        }
        if !self.collection.is_empty() {
            out.push('\n');
            out.push_str(&format!("# Collection-specific excludes: {}\n", self.collection_id));
            for rule in &self.collection {
                out.push_str(&rule.pattern);
                out.push('\n');
            }
        }
        out
    }
}

/// Holds the global list and override table; compiles per-collection sets.
#[derive(Debug, Clone)]
pub struct RuleCompiler {
    global: RuleList,
    overrides: OverrideTable,
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self::new(RuleList::from_lines(GLOBAL_PATTERNS), OverrideTable::builtin())
    }
}

impl RuleCompiler {
    pub fn new(global: RuleList, overrides: OverrideTable) -> Self {
        Self { global, overrides }
    }

    /// Default globals with a caller-supplied override table.
    pub fn with_overrides(overrides: OverrideTable) -> Self {
        Self::new(RuleList::from_lines(GLOBAL_PATTERNS), overrides)
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Compile the rule set for `collection_id`. Unknown ids get the global
    /// rules only.
    pub fn compile(&self, collection_id: &str) -> Result<CollectionRuleSet> {
        CollectionRuleSet::from_rules(
            collection_id,
            self.global.clone(),
            self.overrides.get(collection_id).to_vec(),
        )
    }
}
