//! Per-collection and multi-collection planning.

use super::aggregate::{aggregate, summarize};
use crate::domain::{
    CollectionPlan, CollectionSpec, PlanResult, PlanSummary, Thresholds, DEFAULT_MAX_FILE_BYTES,
};
use crate::error::{PlanError, Result};
use crate::rules::RuleCompiler;
use crate::scan::{qualified_paths, TreeWalker};
use rayon::prelude::*;

/// Compiles, walks and aggregates collections against one threshold ladder.
#[derive(Debug, Clone)]
pub struct Planner {
    compiler: RuleCompiler,
    thresholds: Thresholds,
    default_max_file_bytes: u64,
    jobs: usize,
}

impl Planner {
    /// Rejects an invalid threshold ladder up front.
    pub fn new(compiler: RuleCompiler, thresholds: Thresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { compiler, thresholds, default_max_file_bytes: DEFAULT_MAX_FILE_BYTES, jobs: 1 })
    }

    /// Size cap for collections without their own `max_file_bytes`.
    pub fn default_max_file_bytes(mut self, max_bytes: u64) -> Self {
        self.default_max_file_bytes = max_bytes;
        self
    }

    /// Number of collections planned at once. `0` and `1` run sequentially.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn compiler(&self) -> &RuleCompiler {
        &self.compiler
    }

    /// Plan one collection. A missing root is reported, not failed.
    pub fn plan_collection(&self, spec: &CollectionSpec) -> Result<CollectionPlan> {
        if !spec.root.is_dir() {
            tracing::info!("{}: not cloned ({})", spec.id, spec.root.display());
            return Ok(not_cloned(spec));
        }

        let rules = self.compiler.compile(&spec.id)?;
        let max_file_bytes = spec.max_file_bytes.unwrap_or(self.default_max_file_bytes);
        let mut walker = TreeWalker::new(&spec.root, &rules).max_file_bytes(max_file_bytes);
        let files = walker.walk();
        let stats = walker.stats();
        tracing::debug!(
            "{}: skipped {} hidden, {} by rules, {} by size, {} unreadable",
            spec.id,
            stats.skipped_hidden,
            stats.skipped_rules,
            stats.skipped_size,
            stats.unreadable
        );

        let result = aggregate(&files, &self.thresholds);
        tracing::info!(
            "{}: {} files, {} bytes, level {}",
            spec.id,
            result.included_file_count,
            result.included_total_bytes,
            result.warning_level
        );

        Ok(CollectionPlan {
            id: spec.id.clone(),
            local_dir: spec.local_dir.clone(),
            root_exists: true,
            result,
            included_paths: qualified_paths(&spec.local_dir, &files),
        })
    }

    /// Plan every collection and summarize. Output order follows `specs`.
    pub fn plan_all(&self, specs: &[CollectionSpec]) -> Result<PlanSummary> {
        let plans = if self.jobs <= 1 || specs.len() <= 1 {
            specs.iter().map(|spec| self.plan_collection(spec)).collect::<Result<Vec<_>>>()?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(|e| PlanError::ThreadPool(e.to_string()))?;
            pool.install(|| {
                specs.par_iter().map(|spec| self.plan_collection(spec)).collect::<Result<Vec<_>>>()
            })?
        };
        Ok(summarize(plans))
    }
}

/// Zero-valued green plan for a collection whose root does not exist.
pub fn not_cloned(spec: &CollectionSpec) -> CollectionPlan {
    CollectionPlan {
        id: spec.id.clone(),
        local_dir: spec.local_dir.clone(),
        root_exists: false,
        result: PlanResult {
            warnings: vec![format!("Not cloned: {} does not exist", spec.root.display())],
            ..Default::default()
        },
        included_paths: Vec::new(),
    }
}
