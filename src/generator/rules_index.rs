//! Rules index generator
//!
//! Renders an `<ai-rules>` section listing every rule with its reference
//! path, description and scope, so assistant instruction files point at the
//! rule sources.

use super::{
    GeneratorOptions, GroupedRules, RuleGenerator, category_heading, description_or_placeholder,
    ordered_categories, sorted_by_title, string_option,
};
use crate::rule::RuleRecord;

const START_MARKER: &str = "<ai-rules>";
const END_MARKER: &str = "</ai-rules>";

/// Generator for the project rules index
#[derive(Debug, Default)]
pub struct RulesIndexGenerator;

impl RulesIndexGenerator {
    pub fn new() -> Self {
        Self
    }

    fn format_rule(rule: &RuleRecord) -> Vec<String> {
        let mut lines = vec![
            format!("**{}** → `@{}`", rule.title, rule.relative_path),
            String::new(),
            format!("- **Description**: {}", description_or_placeholder(rule)),
        ];

        if rule.always_apply {
            lines.push("- **Always applied**".to_string());
        } else if !rule.scope_patterns.is_empty() {
            let patterns: Vec<String> = rule
                .scope_patterns
                .iter()
                .map(|p| format!("`{}`", p))
                .collect();
            lines.push(format!("- **Applies to**: {}", patterns.join(", ")));
        }
        lines
    }
}

impl RuleGenerator for RulesIndexGenerator {
    fn name(&self) -> &str {
        "rules-index"
    }

    fn section_markers(&self) -> (&str, &str) {
        (START_MARKER, END_MARKER)
    }

    fn generate(&self, rules: &GroupedRules, options: &GeneratorOptions) -> String {
        let mut lines = vec![
            START_MARKER.to_string(),
            "<!-- DO NOT EDIT THIS SECTION - Auto-generated by rulesync -->".to_string(),
            String::new(),
        ];

        // An optional document heading pushes category headings one level down
        let category_level = match string_option(options, "heading") {
            Some(heading) => {
                lines.push(format!("## {}", heading));
                lines.push(String::new());
                "###"
            }
            None => "##",
        };

        for category in ordered_categories(rules) {
            lines.push(format!("{} {}", category_level, category_heading(category)));
            lines.push(String::new());

            for rule in sorted_by_title(&rules[category]) {
                lines.extend(Self::format_rule(rule));
                lines.push(String::new());
            }
        }

        lines.push(END_MARKER.to_string());
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::group_by_category;
    use crate::generator::test_support::rule;

    #[test]
    fn test_generate_orders_categories_with_root_last() {
        let grouped = group_by_category(vec![
            rule("Root One", "root", ".cursor/rules/root-one.mdc"),
            rule("Bee", "b", ".cursor/rules/b/bee.mdc"),
            rule("Ay", "a", ".cursor/rules/a/ay.mdc"),
        ]);

        let out = RulesIndexGenerator::new().generate(&grouped, &GeneratorOptions::new());
        let a = out.find("## A\n").unwrap();
        let b = out.find("## B\n").unwrap();
        let root = out.find("## Root Rules\n").unwrap();
        assert!(a < b && b < root);
        assert!(out.starts_with("<ai-rules>\n"));
        assert!(out.ends_with("</ai-rules>\n"));
    }

    #[test]
    fn test_format_rule_block() {
        let mut r = rule("Testing", "root", ".cursor/rules/testing.mdc");
        r.description = "How to test".to_string();
        r.scope_patterns = vec!["*.rs".to_string(), "tests/**".to_string()];

        let out = RulesIndexGenerator::new()
            .generate(&group_by_category(vec![r]), &GeneratorOptions::new());
        assert!(out.contains("**Testing** → `@.cursor/rules/testing.mdc`\n\n- **Description**: How to test\n"));
        assert!(out.contains("- **Applies to**: `*.rs`, `tests/**`"));
    }

    #[test]
    fn test_always_apply_and_placeholder() {
        let mut r = rule("Core", "root", "core.mdc");
        r.always_apply = true;
        r.scope_patterns = vec!["*.ts".to_string()];

        let out = RulesIndexGenerator::new()
            .generate(&group_by_category(vec![r]), &GeneratorOptions::new());
        assert!(out.contains("- **Description**: No description provided"));
        assert!(out.contains("- **Always applied**"));
        assert!(!out.contains("Applies to"));
    }

    #[test]
    fn test_heading_option_demotes_categories() {
        let mut options = GeneratorOptions::new();
        options.insert("heading".into(), "Project rules".into());

        let out = RulesIndexGenerator::new()
            .generate(&group_by_category(vec![rule("X", "root", "x.mdc")]), &options);
        assert!(out.contains("## Project rules\n"));
        assert!(out.contains("### Root Rules\n"));
    }
}
