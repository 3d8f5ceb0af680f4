//! Sync orchestration
//!
//! For each pipeline: scan its sources, group by category, render the
//! fragment, and merge it into every target document. Pipelines run one
//! after another; a failing target does not stop the others.

use crate::generator::group_by_category;
use crate::merger::{MergeOutcome, update_documentation_file};
use crate::registry::Pipeline;
use crate::rule::RuleRecord;
use crate::scanner::scan_and_parse;
use std::path::{Path, PathBuf};

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Compute outcomes without writing any target
    pub dry_run: bool,
    /// Target documents replacing every pipeline's own targets
    pub targets: Option<Vec<String>>,
}

/// Merge result for one target document
#[derive(Debug)]
pub struct TargetReport {
    pub path: PathBuf,
    pub outcome: std::result::Result<MergeOutcome, String>,
}

/// What happened to one pipeline
#[derive(Debug)]
pub struct PipelineReport {
    pub name: String,
    pub rules: usize,
    pub categories: usize,
    pub targets: Vec<TargetReport>,
}

impl PipelineReport {
    /// Pipelines that found no rules are skipped without touching targets
    pub fn is_skipped(&self) -> bool {
        self.rules == 0
    }

    pub fn failures(&self) -> usize {
        self.targets.iter().filter(|t| t.outcome.is_err()).count()
    }
}

/// Outcome of a whole sync run
#[derive(Debug, Default)]
pub struct SyncReport {
    pub pipelines: Vec<PipelineReport>,
}

impl SyncReport {
    pub fn total_rules(&self) -> usize {
        self.pipelines.iter().map(|p| p.rules).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.pipelines.iter().map(PipelineReport::failures).sum()
    }

    /// Whether any target was (or, in dry-run mode, would be) changed
    pub fn has_changes(&self) -> bool {
        self.pipelines
            .iter()
            .flat_map(|p| &p.targets)
            .any(|t| matches!(&t.outcome, Ok(outcome) if outcome.action.is_change()))
    }
}

/// Scan every source directory of `pipeline`
///
/// Categories are relative to the individual source directory a file was
/// found in.
pub fn collect_rules(pipeline: &Pipeline, project_root: &Path) -> Vec<RuleRecord> {
    let mut rules = Vec::new();
    for rel_dir in pipeline.source_dirs() {
        let source_dir = project_root.join(&rel_dir);
        tracing::info!("[{}] Scanning {}...", pipeline.name, rel_dir);
        rules.extend(scan_and_parse(pipeline.parser.as_ref(), &source_dir, project_root));
    }
    rules
}

/// Run a single pipeline end to end
pub fn run_pipeline(pipeline: &Pipeline, project_root: &Path, options: &SyncOptions) -> PipelineReport {
    let rules = collect_rules(pipeline, project_root);
    let mut report = PipelineReport {
        name: pipeline.name.clone(),
        rules: rules.len(),
        categories: 0,
        targets: Vec::new(),
    };

    if rules.is_empty() {
        tracing::warn!("[{}] No rules found, skipping", pipeline.name);
        return report;
    }

    let grouped = group_by_category(rules);
    report.categories = grouped.len();
    tracing::info!(
        "[{}] Found {} rules in {} categories",
        pipeline.name,
        report.rules,
        report.categories
    );

    let fragment = pipeline.generator.generate(&grouped, &pipeline.options);
    let markers = pipeline.generator.section_markers();
    let targets = options
        .targets
        .clone()
        .unwrap_or_else(|| pipeline.target_files());

    for target in targets {
        let path = project_root.join(&target);
        let outcome = update_documentation_file(&path, &fragment, markers, options.dry_run)
            .map_err(|e| {
                tracing::error!("[{}] Failed to update {}: {}", pipeline.name, target, e);
                e.to_string()
            });
        report.targets.push(TargetReport { path, outcome });
    }

    report
}

/// Run every pipeline in order
pub fn run_sync(pipelines: &[Pipeline], project_root: &Path, options: &SyncOptions) -> SyncReport {
    SyncReport {
        pipelines: pipelines
            .iter()
            .map(|p| run_pipeline(p, project_root, options))
            .collect(),
    }
}
