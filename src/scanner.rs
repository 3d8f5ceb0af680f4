//! Source directory scanner
//!
//! Walks a source directory, hands every file the parser accepts to
//! [`RuleParser::parse`], and collects the records it returns.

use crate::parser::RuleParser;
use crate::rule::{ParseContext, RuleRecord};
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Directory names whose subtrees are never scanned
pub const EXCLUDED_DIRS: &[&str] = &["generated", "personal"];

/// Whether `path` sits in an excluded directory
///
/// Segments are matched relative to the project root, so the source
/// directory's own name counts but the directories above the project do not.
fn is_excluded(path: &Path, is_dir: bool, source_dir: &Path, project_root: &Path) -> bool {
    let rel = path
        .strip_prefix(project_root)
        .or_else(|_| path.strip_prefix(source_dir))
        .unwrap_or(path);
    let dirs = if is_dir { Some(rel) } else { rel.parent() };

    dirs.into_iter().flat_map(Path::components).any(|c| match c {
        Component::Normal(name) => name.to_str().is_some_and(|n| EXCLUDED_DIRS.contains(&n)),
        _ => false,
    })
}

/// Scan `source_dir` with `parser`
///
/// Records come back in traversal order (entries sorted by file name within
/// each directory). Symlinked files and directories are followed. A missing
/// source directory yields no records.
pub fn scan_and_parse(
    parser: &dyn RuleParser,
    source_dir: &Path,
    project_root: &Path,
) -> Vec<RuleRecord> {
    let mut rules = Vec::new();

    if !source_dir.is_dir() {
        tracing::debug!("Source directory {} does not exist", source_dir.display());
        return rules;
    }

    let walker = WalkDir::new(source_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e.path(), e.file_type().is_dir(), source_dir, project_root));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", source_dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !parser.can_parse(entry.path()) {
            continue;
        }

        let context = ParseContext::new(project_root, source_dir, entry.path());
        match parser.parse(entry.path(), &context) {
            Some(rule) => rules.push(rule),
            None => tracing::debug!("Parser {} skipped {}", parser.name(), context.relative_path),
        }
    }

    rules
}
