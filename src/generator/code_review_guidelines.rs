//! Code review guidelines generator

use super::{
    GeneratorOptions, GroupedRules, RuleGenerator, category_heading, description_or_placeholder,
    ordered_categories, sorted_by_title, string_option,
};
use crate::rule::RuleRecord;

const START_MARKER: &str = "<code-review-guidelines>";
const END_MARKER: &str = "</code-review-guidelines>";
const DEFAULT_HEADING: &str = "Review guidelines";

/// Generator for the `<code-review-guidelines>` section of `AGENTS.md`
#[derive(Debug, Default)]
pub struct CodeReviewGuidelinesGenerator;

impl CodeReviewGuidelinesGenerator {
    pub fn new() -> Self {
        Self
    }

    fn format_rule(rule: &RuleRecord) -> [String; 3] {
        [
            format!("**{}** → `@{}`", rule.title, rule.relative_path),
            String::new(),
            format!("- **Description**: {}", description_or_placeholder(rule)),
        ]
    }
}

impl RuleGenerator for CodeReviewGuidelinesGenerator {
    fn name(&self) -> &str {
        "code-review-guidelines"
    }

    fn default_filenames(&self) -> &[&str] {
        &["AGENTS.md"]
    }

    fn section_markers(&self) -> (&str, &str) {
        (START_MARKER, END_MARKER)
    }

    fn generate(&self, rules: &GroupedRules, options: &GeneratorOptions) -> String {
        let heading = string_option(options, "heading").unwrap_or(DEFAULT_HEADING);
        let mut lines = vec![
            START_MARKER.to_string(),
            "<!-- DO NOT EDIT THIS SECTION - Auto-generated from .code_review/ -->".to_string(),
            String::new(),
            format!("## {}", heading),
            String::new(),
        ];

        for category in ordered_categories(rules) {
            lines.push(format!("### {}", category_heading(category)));
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
    fn test_generate_guidelines() {
        let mut validation = rule("Validate Inputs", "security", ".code_review/security/input.md");
        validation.description = "Reject unchecked input".to_string();
        let grouped = group_by_category(vec![
            rule("General", "root", ".code_review/general.md"),
            validation,
        ]);

        let out = CodeReviewGuidelinesGenerator::new().generate(&grouped, &GeneratorOptions::new());
        let expected = "\
<code-review-guidelines>
<!-- DO NOT EDIT THIS SECTION - Auto-generated from .code_review/ -->

## Review guidelines

### Security

**Validate Inputs** → `@.code_review/security/input.md`

- **Description**: Reject unchecked input

### Root Rules

**General** → `@.code_review/general.md`

- **Description**: No description provided

</code-review-guidelines>
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_markers_and_targets() {
        let generator = CodeReviewGuidelinesGenerator::new();
        assert_eq!(
            generator.section_markers(),
            ("<code-review-guidelines>", "</code-review-guidelines>")
        );
        assert_eq!(generator.default_filenames(), &["AGENTS.md"]);
    }
}
