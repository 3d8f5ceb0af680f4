//! Cursor `.mdc` rule parser
//!
//! `.mdc` files carry optional YAML front-matter with `description`, `globs`
//! and `alwaysApply`. Files without usable front-matter are still indexed
//! with default values.

use super::RuleParser;
use super::frontmatter::{parse_yaml_mapping, scalar_to_string, split_yaml, string_list};
use crate::rule::{ParseContext, RuleRecord, title_from_filename};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Parser for Cursor `.mdc` rule files
#[derive(Debug, Default)]
pub struct MdcParser;

impl MdcParser {
    pub fn new() -> Self {
        Self
    }
}

impl RuleParser for MdcParser {
    fn name(&self) -> &str {
        "mdc"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mdc"]
    }

    fn source_directories(&self) -> &[&str] {
        &[".cursor/rules"]
    }

    fn parse(&self, path: &Path, context: &ParseContext) -> Option<RuleRecord> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        let frontmatter = split_yaml(&content).and_then(|(block, _)| parse_yaml_mapping(block));

        let (description, scope_patterns, always_apply) = match &frontmatter {
            Some(fm) => (
                fm.get("description").and_then(scalar_to_string).unwrap_or_default(),
                string_list(fm.get("globs")),
                fm.get("alwaysApply").and_then(Value::as_bool).unwrap_or(false),
            ),
            None => (String::new(), Vec::new(), false),
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut metadata = BTreeMap::new();
        if let Some(fm) = frontmatter {
            metadata.insert("frontmatter".to_string(), Value::Mapping(fm));
        }

        Some(RuleRecord {
            file_path: path.to_path_buf(),
            relative_path: context.relative_path.clone(),
            title: title_from_filename(&file_name, ".mdc"),
            description,
            scope_patterns,
            always_apply,
            category: context.category.clone(),
            raw_content: content,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_rule(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn context(dir: &TempDir, name: &str) -> ParseContext {
        ParseContext {
            project_root: dir.path().to_path_buf(),
            relative_path: name.to_string(),
            category: "root".to_string(),
        }
    }

    #[test]
    fn test_parse_full_frontmatter() {
        let dir = TempDir::new().unwrap();
        let path = write_rule(
            &dir,
            "api-design.mdc",
            "---\ndescription: REST conventions\nglobs:\n  - \"src/api/**\"\n  - \"*.rs\"\nalwaysApply: true\n---\n# API\n",
        );

        let rule = MdcParser::new().parse(&path, &context(&dir, "api-design.mdc")).unwrap();
        assert_eq!(rule.title, "Api Design");
        assert_eq!(rule.description, "REST conventions");
        assert_eq!(rule.scope_patterns, vec!["src/api/**", "*.rs"]);
        assert!(rule.always_apply);
        assert_eq!(rule.relative_path, "api-design.mdc");
        assert!(rule.metadata.contains_key("frontmatter"));
        assert!(rule.raw_content.ends_with("# API\n"));
    }

    #[test]
    fn test_single_string_glob_is_wrapped() {
        let dir = TempDir::new().unwrap();
        let path = write_rule(&dir, "ts.mdc", "---\nglobs: \"*.ts\"\n---\n");

        let rule = MdcParser::new().parse(&path, &context(&dir, "ts.mdc")).unwrap();
        assert_eq!(rule.scope_patterns, vec!["*.ts"]);
        assert_eq!(rule.description, "");
        assert!(!rule.always_apply);
    }

    #[test]
    fn test_missing_frontmatter_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_rule(&dir, "code-style.mdc", "# Just a body\n");

        let rule = MdcParser::new().parse(&path, &context(&dir, "code-style.mdc")).unwrap();
        assert_eq!(rule.title, "Code Style");
        assert_eq!(rule.description, "");
        assert!(rule.scope_patterns.is_empty());
        assert!(!rule.always_apply);
        assert!(rule.metadata.is_empty());
    }

    #[test]
    fn test_malformed_frontmatter_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_rule(&dir, "broken.mdc", "---\ndescription: [oops\n---\nbody\n");

        let rule = MdcParser::new().parse(&path, &context(&dir, "broken.mdc")).unwrap();
        assert_eq!(rule.description, "");
        assert!(rule.metadata.is_empty());
    }

    #[test]
    fn test_non_list_globs_coerced_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_rule(&dir, "odd.mdc", "---\nglobs: 42\nalwaysApply: yes-please\n---\n");

        let rule = MdcParser::new().parse(&path, &context(&dir, "odd.mdc")).unwrap();
        assert!(rule.scope_patterns.is_empty());
        assert!(!rule.always_apply);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.mdc");
        assert!(MdcParser::new().parse(&missing, &context(&dir, "missing.mdc")).is_none());
    }

    #[test]
    fn test_can_parse() {
        let parser = MdcParser::new();
        assert!(parser.can_parse(Path::new(".cursor/rules/a.mdc")));
        assert!(!parser.can_parse(Path::new(".cursor/rules/a.md")));
    }
}
