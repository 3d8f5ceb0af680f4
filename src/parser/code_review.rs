//! Code review guideline parser
//!
//! Guidelines are Markdown files under `.code_review/` that open with an
//! HTML comment block:
//!
//! ```text
//! <!--
//! name: Error Handling
//! description: Propagate errors instead of swallowing them
//! -->
//! ```
//!
//! A guideline without this block is not indexed.

use super::RuleParser;
use super::frontmatter::parse_html_comment;
use crate::rule::{ParseContext, RuleRecord, title_from_filename};
use serde_yaml::Value;
use std::path::{Component, Path};

/// Directory segment every code review guideline lives under
const CODE_REVIEW_DIR: &str = ".code_review";

/// Parser for `.code_review/**/*.md` guidelines
#[derive(Debug, Default)]
pub struct CodeReviewParser;

impl CodeReviewParser {
    pub fn new() -> Self {
        Self
    }
}

impl RuleParser for CodeReviewParser {
    fn name(&self) -> &str {
        "code-review"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md"]
    }

    fn source_directories(&self) -> &[&str] {
        &[CODE_REVIEW_DIR]
    }

    fn can_parse(&self, path: &Path) -> bool {
        let under_review_dir = path
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == CODE_REVIEW_DIR));
        under_review_dir && path.extension().is_some_and(|ext| ext == "md")
    }

    fn parse(&self, path: &Path, context: &ParseContext) -> Option<RuleRecord> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        let fields = parse_html_comment(&content);
        if fields.is_empty() {
            tracing::debug!("Skipping {}: no front-matter block", path.display());
            return None;
        }

        let title = match fields.get("name") {
            Some(name) => name.clone(),
            None => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                title_from_filename(&file_name, ".md")
            }
        };

        Some(RuleRecord {
            file_path: path.to_path_buf(),
            relative_path: context.relative_path.clone(),
            title,
            description: fields.get("description").cloned().unwrap_or_default(),
            scope_patterns: Vec::new(),
            always_apply: false,
            category: context.category.clone(),
            raw_content: content,
            metadata: fields
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        })
    }
}
