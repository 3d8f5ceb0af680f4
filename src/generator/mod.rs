//! Documentation Generator Framework
//!
//! A generator renders rules grouped by category into a text fragment
//! bounded by its own pair of marker lines. The merger uses those markers
//! to find and replace the fragment in target documents.

pub mod rules_index;
pub mod code_review_guidelines;

pub use code_review_guidelines::CodeReviewGuidelinesGenerator;
pub use rules_index::RulesIndexGenerator;

use crate::rule::{ROOT_CATEGORY, RuleRecord};
use std::collections::BTreeMap;

/// Rules keyed by category name
pub type GroupedRules = BTreeMap<String, Vec<RuleRecord>>;

/// Free-form per-pipeline options from `plugins.yaml`
pub type GeneratorOptions = serde_yaml::Mapping;

/// Placeholder used when a rule has no description
pub const NO_DESCRIPTION: &str = "No description provided";

/// Trait for documentation generators
pub trait RuleGenerator: Send + Sync {
    /// Get the generator name (for display)
    fn name(&self) -> &str;

    /// Documents, relative to the project root, the fragment is spliced into
    fn default_filenames(&self) -> &[&str] {
        &["CLAUDE.md", "AGENTS.md", ".github/copilot-instructions.md"]
    }

    /// Start and end marker lines bounding the generated fragment
    ///
    /// Generators writing to the same document must use disjoint markers.
    fn section_markers(&self) -> (&str, &str);

    /// Render the fragment, markers included
    fn generate(&self, rules: &GroupedRules, options: &GeneratorOptions) -> String;
}

/// Group rules by their category, preserving scan order within a group
pub fn group_by_category(rules: Vec<RuleRecord>) -> GroupedRules {
    let mut groups = GroupedRules::new();
    for rule in rules {
        groups.entry(rule.category.clone()).or_default().push(rule);
    }
    groups
}

/// Category names in rendering order: alphabetical, `root` last
pub fn ordered_categories(rules: &GroupedRules) -> Vec<&str> {
    let mut categories: Vec<&str> = rules.keys().map(String::as_str).collect();
    categories.sort_by_key(|c| (*c == ROOT_CATEGORY, *c));
    categories
}

/// Rules of one category sorted by title
pub fn sorted_by_title(rules: &[RuleRecord]) -> Vec<&RuleRecord> {
    let mut sorted: Vec<&RuleRecord> = rules.iter().collect();
    sorted.sort_by(|a, b| {
        a.title
            .cmp(&b.title)
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
    sorted
}

/// Heading text for a category
///
/// `root` becomes "Root Rules"; other names have `-`/`_` turned into spaces
/// and every letter following a non-letter uppercased (`a/b-c` → `A/B C`).
pub fn category_heading(category: &str) -> String {
    if category == ROOT_CATEGORY {
        return "Root Rules".to_string();
    }

    let mut heading = String::with_capacity(category.len());
    let mut word_start = true;
    for ch in category.replace(['-', '_'], " ").chars() {
        if word_start {
            heading.extend(ch.to_uppercase());
        } else {
            heading.extend(ch.to_lowercase());
        }
        word_start = !ch.is_alphabetic();
    }
    heading
}

/// Read a string option, if present
pub fn string_option<'a>(options: &'a GeneratorOptions, key: &str) -> Option<&'a str> {
    options.get(key).and_then(serde_yaml::Value::as_str)
}

/// Description text or the placeholder
pub fn description_or_placeholder(rule: &RuleRecord) -> &str {
    if rule.description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        &rule.description
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::rule;
    use super::*;

    #[test]
    fn test_root_category_sorted_last() {
        let grouped = group_by_category(vec![
            rule("R", "root", "r.mdc"),
            rule("B", "b", "b/b.mdc"),
            rule("A", "a", "a/a.mdc"),
        ]);
        assert_eq!(ordered_categories(&grouped), vec!["a", "b", "root"]);
    }

    #[test]
    fn test_group_by_category_keeps_scan_order() {
        let grouped = group_by_category(vec![
            rule("Z", "x", "x/z.mdc"),
            rule("A", "x", "x/a.mdc"),
        ]);
        let titles: Vec<_> = grouped["x"].iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Z", "A"]);
    }

    #[test]
    fn test_sorted_by_title() {
        let rules = vec![rule("Zeta", "x", "1"), rule("Alpha", "x", "3"), rule("Alpha", "x", "2")];
        let paths: Vec<_> = sorted_by_title(&rules)
            .iter()
            .map(|r| r.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_category_heading() {
        assert_eq!(category_heading("root"), "Root Rules");
        assert_eq!(category_heading("error-handling"), "Error Handling");
        assert_eq!(category_heading("api_design"), "Api Design");
        assert_eq!(category_heading("sub"), "Sub");
        assert_eq!(category_heading("backend/db-access"), "Backend/Db Access");
    }
}
