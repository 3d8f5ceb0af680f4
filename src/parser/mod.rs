//! Rule Parser Framework
//!
//! Each rule format provides a parser that recognizes its files and turns
//! them into [`RuleRecord`]s. The scanner never sees format-specific logic.

pub mod frontmatter;
pub mod mdc;
pub mod code_review;

pub use code_review::CodeReviewParser;
pub use mdc::MdcParser;

use crate::rule::{ParseContext, RuleRecord};
use std::path::Path;

/// Trait for rule parsers
///
/// Each parser is responsible for:
/// 1. Naming the directories its rules live in
/// 2. Identifying files it can parse, without opening them
/// 3. Extracting front-matter and building a [`RuleRecord`]
pub trait RuleParser: Send + Sync {
    /// Get the parser name (for display)
    fn name(&self) -> &str;

    /// Get file extensions this parser handles, without the leading dot
    fn file_extensions(&self) -> &[&str];

    /// Directories, relative to the project root, scanned when a pipeline
    /// does not configure its own sources
    fn source_directories(&self) -> &[&str] {
        &[]
    }

    /// Check if this parser can handle a file
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.file_extensions().contains(&ext))
    }

    /// Parse a file into a rule record
    ///
    /// Returns `None` when the file is unreadable or excluded by the format's
    /// front-matter policy. This is a soft skip, never a failure.
    fn parse(&self, path: &Path, context: &ParseContext) -> Option<RuleRecord>;
}
