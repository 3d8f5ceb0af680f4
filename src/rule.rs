//! Rule records
//!
//! The normalized, format-agnostic representation every parser produces and
//! every generator consumes.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Category assigned to files sitting directly under a source root
pub const ROOT_CATEGORY: &str = "root";

/// A single parsed rule file
///
/// Built once by a parser during a scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRecord {
    /// Absolute location of the source file
    pub file_path: PathBuf,
    /// Path relative to the project root, used as the reference key in output
    pub relative_path: String,
    /// Human-readable name
    pub title: String,
    /// Free-text summary, may be empty
    pub description: String,
    /// Globs the rule applies to
    pub scope_patterns: Vec<String>,
    /// Apply regardless of `scope_patterns`
    pub always_apply: bool,
    /// Grouping label derived from the containing directory
    pub category: String,
    /// Full original file text
    #[serde(skip_serializing)]
    pub raw_content: String,
    /// Format-specific extras (raw front-matter etc.)
    pub metadata: BTreeMap<String, serde_yaml::Value>,
}

/// Per-file information precomputed by the scanner and handed to parsers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    pub project_root: PathBuf,
    pub relative_path: String,
    pub category: String,
}

impl ParseContext {
    /// Build a context for `file` found under `source_dir`
    ///
    /// Falls back to the file path itself and the root category when the
    /// relative paths cannot be derived.
    pub fn new(project_root: &Path, source_dir: &Path, file: &Path) -> Self {
        let relative_path = file
            .strip_prefix(project_root)
            .map(display_path)
            .unwrap_or_else(|_| display_path(file));

        Self {
            project_root: project_root.to_path_buf(),
            relative_path,
            category: category_for(file, source_dir),
        }
    }
}

/// Derive a file's category: its directory relative to `source_dir`
pub fn category_for(file: &Path, source_dir: &Path) -> String {
    let parent = file
        .strip_prefix(source_dir)
        .ok()
        .and_then(Path::parent)
        .map(display_path)
        .unwrap_or_default();

    if parent.is_empty() || parent == "." {
        ROOT_CATEGORY.to_string()
    } else {
        parent
    }
}

/// Convert a kebab-case file name into Title Case, dropping `extension`
///
/// `"api-design.mdc"` becomes `"Api Design"`.
pub fn title_from_filename(file_name: &str, extension: &str) -> String {
    let stem = file_name.strip_suffix(extension).unwrap_or(file_name);
    stem.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Render a path with forward slashes regardless of platform
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_nested_file() {
        let source = Path::new("/proj/.cursor/rules");
        let file = source.join("foo").join("bar.mdc");
        assert_eq!(category_for(&file, source), "foo");
    }

    #[test]
    fn test_category_for_root_file() {
        let source = Path::new("/proj/.cursor/rules");
        assert_eq!(category_for(&source.join("baz.mdc"), source), "root");
    }

    #[test]
    fn test_category_for_deep_file_keeps_full_dir() {
        let source = Path::new("/proj/rules");
        let file = source.join("a").join("b").join("c.mdc");
        assert_eq!(category_for(&file, source), "a/b");
    }

    #[test]
    fn test_category_outside_source_falls_back_to_root() {
        assert_eq!(category_for(Path::new("/elsewhere/x.mdc"), Path::new("/proj/rules")), "root");
    }

    #[test]
    fn test_context_relative_path_fallback() {
        let ctx = ParseContext::new(
            Path::new("/proj"),
            Path::new("/other/rules"),
            Path::new("/other/rules/x.mdc"),
        );
        assert_eq!(ctx.relative_path, "/other/rules/x.mdc");
        assert_eq!(ctx.category, "root");
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("api-design.mdc", ".mdc"), "Api Design");
        assert_eq!(title_from_filename("TESTING.mdc", ".mdc"), "Testing");
        assert_eq!(title_from_filename("notes", ".mdc"), "Notes");
    }
}
